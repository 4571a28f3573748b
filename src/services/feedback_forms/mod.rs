//! 反馈表业务逻辑
//!
//! 每个子模块提供一个与 HTTP 无关的核心操作 `(storage, 已校验输入) -> Result<T>`，
//! 以及把结果转换为 `HttpResponse` 的薄适配函数。

pub mod create;
pub mod delete;
pub mod detail;
pub mod responses;
pub mod status;
pub mod submit;
pub mod summary;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, warn};

use crate::errors::FeedbackError;
use crate::models::feedback_forms::requests::{
    CreateFeedbackFormRequest, SubmitFeedbackRequest, UpdateFeedbackFormRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct FeedbackFormService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeedbackFormService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建反馈表
    pub async fn create_form(
        &self,
        request: &HttpRequest,
        form_data: CreateFeedbackFormRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_feedback_form(self, request, form_data).await
    }

    // 根据活动 ID 获取反馈表
    pub async fn get_form_by_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_feedback_form(self, request, event_id).await
    }

    // 更新反馈表
    pub async fn update_form(
        &self,
        request: &HttpRequest,
        form_id: i64,
        update_data: UpdateFeedbackFormRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_feedback_form(self, request, form_id, update_data).await
    }

    // 删除反馈表
    pub async fn delete_form(
        &self,
        request: &HttpRequest,
        form_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_feedback_form(self, request, form_id).await
    }

    // 提交反馈
    pub async fn submit_response(
        &self,
        request: &HttpRequest,
        submission: SubmitFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_feedback(self, request, submission).await
    }

    // 查询提交状态
    pub async fn check_status(
        &self,
        request: &HttpRequest,
        event_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        status::check_feedback_status(self, request, event_id, student_id).await
    }

    // 列出表单的全部提交
    pub async fn list_form_responses(
        &self,
        request: &HttpRequest,
        form_id: i64,
    ) -> ActixResult<HttpResponse> {
        responses::list_form_responses(self, request, form_id).await
    }

    // 列出活动的全部提交
    pub async fn list_event_responses(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        responses::list_event_responses(self, request, event_id).await
    }

    // 表单统计
    pub async fn get_summary(
        &self,
        request: &HttpRequest,
        form_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::get_feedback_summary(self, request, form_id).await
    }
}

/// 对外操作，决定失败时使用的错误码与提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FeedbackAction {
    CreateForm,
    GetForm,
    UpdateForm,
    DeleteForm,
    SubmitResponse,
    CheckStatus,
    ListResponses,
    Summarize,
}

impl FeedbackAction {
    fn describe(self) -> &'static str {
        match self {
            FeedbackAction::CreateForm => "create feedback form",
            FeedbackAction::GetForm => "get feedback form",
            FeedbackAction::UpdateForm => "update feedback form",
            FeedbackAction::DeleteForm => "delete feedback form",
            FeedbackAction::SubmitResponse => "submit feedback",
            FeedbackAction::CheckStatus => "check feedback status",
            FeedbackAction::ListResponses => "get feedback responses",
            FeedbackAction::Summarize => "summarize feedback responses",
        }
    }

    fn failure_code(self) -> ErrorCode {
        match self {
            FeedbackAction::CreateForm => ErrorCode::FeedbackFormCreationFailed,
            FeedbackAction::UpdateForm => ErrorCode::FeedbackFormUpdateFailed,
            FeedbackAction::DeleteForm => ErrorCode::FeedbackFormDeleteFailed,
            FeedbackAction::SubmitResponse => ErrorCode::FeedbackSubmitFailed,
            _ => ErrorCode::InternalServerError,
        }
    }

    fn conflict_code(self) -> ErrorCode {
        match self {
            FeedbackAction::SubmitResponse => ErrorCode::FeedbackAlreadySubmitted,
            _ => ErrorCode::FeedbackFormAlreadyExists,
        }
    }

    fn invalid_code(self) -> ErrorCode {
        match self {
            FeedbackAction::SubmitResponse => ErrorCode::FeedbackAnswerInvalid,
            FeedbackAction::CreateForm | FeedbackAction::UpdateForm => {
                ErrorCode::FeedbackFormInvalid
            }
            _ => ErrorCode::BadRequest,
        }
    }
}

/// 把核心操作的错误转换为 HTTP 响应
///
/// 内部错误只写日志，对外返回固定提示。
pub(crate) fn error_response(err: &FeedbackError, action: FeedbackAction) -> HttpResponse {
    match err {
        FeedbackError::NotFound(msg) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackFormNotFound,
            msg.as_str(),
        )),
        FeedbackError::Conflict(msg) => {
            warn!("Failed to {}: {}", action.describe(), msg);
            HttpResponse::Conflict().json(ApiResponse::error_empty(action.conflict_code(), msg.as_str()))
        }
        FeedbackError::Validation(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(action.invalid_code(), msg.as_str()),
        ),
        FeedbackError::Authorization(msg) => HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::Forbidden, msg.as_str()),
        ),
        FeedbackError::Authentication(msg) => HttpResponse::Unauthorized().json(
            ApiResponse::error_empty(ErrorCode::Unauthorized, msg.as_str()),
        ),
        _ => {
            error!("Failed to {}: {}", action.describe(), err.format_simple());
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                action.failure_code(),
                format!("Failed to {}", action.describe()),
            ))
        }
    }
}

/// 缺少用户信息时的响应
pub(crate) fn missing_user_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized: missing user id",
    ))
}
