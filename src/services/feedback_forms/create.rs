use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::validate::{normalize_title, validate_event_id, validate_questions};
use super::{FeedbackAction, FeedbackFormService, error_response, missing_user_response};
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::feedback_forms::{
    entities::NewFeedbackForm, requests::CreateFeedbackFormRequest,
    responses::FeedbackFormCreatedResponse,
};
use crate::storage::Storage;

/// 创建反馈表，返回表单 ID
///
/// 活动是否存在由调用方保证；同一活动已有表单时返回 Conflict。
pub async fn create_form(
    storage: &dyn Storage,
    created_by: i64,
    form_data: CreateFeedbackFormRequest,
) -> Result<i64> {
    validate_event_id(form_data.event_id)?;
    let questions = validate_questions(form_data.questions)?;

    storage
        .create_feedback_form(NewFeedbackForm {
            event_id: form_data.event_id,
            title: normalize_title(form_data.title),
            description: form_data.description.unwrap_or_default(),
            created_by,
            questions,
        })
        .await
}

pub async fn create_feedback_form(
    service: &FeedbackFormService,
    request: &HttpRequest,
    form_data: CreateFeedbackFormRequest,
) -> ActixResult<HttpResponse> {
    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => return Ok(missing_user_response()),
    };
    let storage = service.get_storage(request);

    match create_form(storage.as_ref(), uid, form_data).await {
        Ok(form_id) => {
            info!("Feedback form {} created by {}", form_id, uid);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                FeedbackFormCreatedResponse { form_id },
                "Feedback form created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, FeedbackAction::CreateForm)),
    }
}
