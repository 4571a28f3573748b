//! 数据模型定义
//!
//! - `common`: 统一响应结构
//! - `users`: 调用方身份（由外部身份服务提供）
//! - `feedback_forms`: 反馈表单、题目、提交与统计

pub mod common;
pub mod feedback_forms;
pub mod users;

pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码，写入 `ApiResponse.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 反馈表单
    FeedbackFormNotFound = 7000,
    FeedbackFormAlreadyExists = 7001,
    FeedbackFormInvalid = 7002,
    FeedbackFormCreationFailed = 7003,
    FeedbackFormUpdateFailed = 7004,
    FeedbackFormDeleteFailed = 7005,

    // 反馈提交
    FeedbackAlreadySubmitted = 7100,
    FeedbackAnswerInvalid = 7101,
    FeedbackSubmitFailed = 7102,
}
