use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeedbackAction, FeedbackFormService, error_response};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::feedback_forms::responses::FeedbackResponseItem;
use crate::storage::Storage;

/// 表单的全部提交，按提交时间倒序；表单不存在时返回空列表
pub async fn responses_for_form(
    storage: &dyn Storage,
    form_id: i64,
) -> Result<Vec<FeedbackResponseItem>> {
    storage.list_feedback_responses(form_id).await
}

/// 活动的全部提交；活动没有反馈表时返回空列表
pub async fn responses_for_event(
    storage: &dyn Storage,
    event_id: i64,
) -> Result<Vec<FeedbackResponseItem>> {
    match storage.get_feedback_form_by_event(event_id).await? {
        Some(form) => storage.list_feedback_responses(form.id).await,
        None => Ok(Vec::new()),
    }
}

pub async fn list_form_responses(
    service: &FeedbackFormService,
    request: &HttpRequest,
    form_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match responses_for_form(storage.as_ref(), form_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Feedback responses retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, FeedbackAction::ListResponses)),
    }
}

pub async fn list_event_responses(
    service: &FeedbackFormService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match responses_for_event(storage.as_ref(), event_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Feedback responses retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, FeedbackAction::ListResponses)),
    }
}
