//! 预导入模块，方便使用

pub use super::feedback_answers::{
    ActiveModel as FeedbackAnswerActiveModel, Entity as FeedbackAnswers,
    Model as FeedbackAnswerModel,
};
pub use super::feedback_forms::{
    ActiveModel as FeedbackFormActiveModel, Entity as FeedbackForms, Model as FeedbackFormModel,
};
pub use super::feedback_questions::{
    ActiveModel as FeedbackQuestionActiveModel, Entity as FeedbackQuestions,
    Model as FeedbackQuestionModel,
};
pub use super::feedback_responses::{
    ActiveModel as FeedbackResponseActiveModel, Entity as FeedbackResponses,
    Model as FeedbackResponseModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
