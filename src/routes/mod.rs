pub mod feedback_forms;

pub use feedback_forms::configure_feedback_form_routes;
