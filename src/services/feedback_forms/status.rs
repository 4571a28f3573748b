use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeedbackAction, FeedbackFormService, error_response, missing_user_response};
use crate::errors::{FeedbackError, Result};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::feedback_forms::responses::FeedbackStatusResponse;
use crate::models::users::entities::AuthUser;
use crate::storage::Storage;

/// 学生是否已提交过该活动的反馈
pub async fn has_submitted(storage: &dyn Storage, event_id: i64, student_id: i64) -> Result<bool> {
    storage.has_submitted_feedback(event_id, student_id).await
}

/// 学生只能查询自己的提交状态
fn check_status_permission(user: &AuthUser, student_id: i64) -> Result<()> {
    if user.is_faculty() || user.id == student_id {
        Ok(())
    } else {
        Err(FeedbackError::authorization(
            "You can only check your own feedback status",
        ))
    }
}

pub async fn check_feedback_status(
    service: &FeedbackFormService,
    request: &HttpRequest,
    event_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user(request) {
        Some(user) => user,
        None => return Ok(missing_user_response()),
    };
    if let Err(e) = check_status_permission(&user, student_id) {
        return Ok(error_response(&e, FeedbackAction::CheckStatus));
    }

    let storage = service.get_storage(request);
    match has_submitted(storage.as_ref(), event_id, student_id).await {
        Ok(has_submitted) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            FeedbackStatusResponse { has_submitted },
            "Feedback status retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, FeedbackAction::CheckStatus)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    #[test]
    fn test_status_permission() {
        let student = AuthUser {
            id: 5,
            role: UserRole::Student,
        };
        let faculty = AuthUser {
            id: 1,
            role: UserRole::Faculty,
        };
        assert!(check_status_permission(&student, 5).is_ok());
        assert!(check_status_permission(&student, 6).is_err());
        assert!(check_status_permission(&faculty, 6).is_ok());
    }
}
