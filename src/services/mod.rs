pub mod feedback_forms;

pub use feedback_forms::FeedbackFormService;
