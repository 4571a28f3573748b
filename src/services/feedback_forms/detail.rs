use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeedbackAction, FeedbackFormService, error_response};
use crate::errors::{FeedbackError, Result};
use crate::models::ApiResponse;
use crate::models::feedback_forms::entities::FeedbackForm;
use crate::storage::Storage;

/// 获取活动的反馈表，题目按顺序排列
pub async fn get_form_by_event(storage: &dyn Storage, event_id: i64) -> Result<FeedbackForm> {
    storage
        .get_feedback_form_by_event(event_id)
        .await?
        .ok_or_else(|| {
            FeedbackError::not_found(format!("No feedback form found for event {event_id}"))
        })
}

pub async fn get_feedback_form(
    service: &FeedbackFormService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match get_form_by_event(storage.as_ref(), event_id).await {
        Ok(form) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            form,
            "Feedback form retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, FeedbackAction::GetForm)),
    }
}
