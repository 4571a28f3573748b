use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeedbackAction, FeedbackFormService, error_response};
use crate::errors::{FeedbackError, Result};
use crate::models::ApiResponse;
use crate::storage::Storage;

/// 删除反馈表及其题目、提交和答案
pub async fn delete_form(storage: &dyn Storage, form_id: i64) -> Result<()> {
    if storage.delete_feedback_form(form_id).await? {
        Ok(())
    } else {
        Err(FeedbackError::not_found(format!(
            "Feedback form {form_id} not found"
        )))
    }
}

pub async fn delete_feedback_form(
    service: &FeedbackFormService,
    request: &HttpRequest,
    form_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match delete_form(storage.as_ref(), form_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Feedback form deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e, FeedbackAction::DeleteForm)),
    }
}
