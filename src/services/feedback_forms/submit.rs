use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::validate::validate_answers;
use super::{FeedbackAction, FeedbackFormService, error_response, missing_user_response};
use crate::errors::{FeedbackError, Result};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::feedback_forms::{
    entities::NewFeedbackResponse, requests::SubmitFeedbackRequest,
    responses::FeedbackSubmittedResponse,
};
use crate::storage::Storage;

/// 提交一份反馈，返回提交 ID
///
/// 答案先按表单题目校验，再在一个事务中写入；同一 (表单, 学生, 活动) 只能提交一次。
pub async fn submit_response(
    storage: &dyn Storage,
    student_id: i64,
    submission: SubmitFeedbackRequest,
) -> Result<i64> {
    let form = storage
        .get_feedback_form_by_id(submission.form_id)
        .await?
        .ok_or_else(|| {
            FeedbackError::not_found(format!(
                "Feedback form {} not found",
                submission.form_id
            ))
        })?;

    let answers = validate_answers(&form, submission.event_id, submission.answers)?;

    storage
        .submit_feedback_response(NewFeedbackResponse {
            form_id: form.id,
            event_id: submission.event_id,
            student_id,
            answers,
        })
        .await
}

pub async fn submit_feedback(
    service: &FeedbackFormService,
    request: &HttpRequest,
    submission: SubmitFeedbackRequest,
) -> ActixResult<HttpResponse> {
    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => return Ok(missing_user_response()),
    };
    let storage = service.get_storage(request);

    match submit_response(storage.as_ref(), uid, submission).await {
        Ok(response_id) => Ok(HttpResponse::Created().json(ApiResponse::success(
            FeedbackSubmittedResponse { response_id },
            "Thank you for your feedback!",
        ))),
        Err(e) => Ok(error_response(&e, FeedbackAction::SubmitResponse)),
    }
}
