use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::validate::{normalize_title, validate_questions};
use super::{FeedbackAction, FeedbackFormService, error_response};
use crate::errors::{FeedbackError, Result};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::feedback_forms::{
    entities::FeedbackFormUpdate, requests::UpdateFeedbackFormRequest,
};
use crate::storage::Storage;

/// 更新标题、描述并整体替换题目
///
/// 旧题目 ID 不保留，已有答案会失去与题目的关联。
pub async fn update_form(
    storage: &dyn Storage,
    form_id: i64,
    update_data: UpdateFeedbackFormRequest,
) -> Result<()> {
    let questions = validate_questions(update_data.questions)?;

    let updated = storage
        .update_feedback_form(
            form_id,
            FeedbackFormUpdate {
                title: normalize_title(update_data.title),
                description: update_data.description.unwrap_or_default(),
                questions,
            },
        )
        .await?;

    if updated {
        Ok(())
    } else {
        Err(FeedbackError::not_found(format!(
            "Feedback form {form_id} not found"
        )))
    }
}

pub async fn update_feedback_form(
    service: &FeedbackFormService,
    request: &HttpRequest,
    form_id: i64,
    update_data: UpdateFeedbackFormRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match update_form(storage.as_ref(), form_id, update_data).await {
        Ok(()) => {
            info!(
                "Feedback form {} updated by {:?}",
                form_id,
                RequireJWT::extract_user_id(request)
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Feedback form updated successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, FeedbackAction::UpdateForm)),
    }
}
