use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::feedback_forms::entities::{AnswerValue, QuestionType};

/// 创建反馈表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackFormCreatedResponse {
    pub form_id: i64,
}

/// 提交反馈响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackSubmittedResponse {
    pub response_id: i64,
}

/// 提交状态
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackStatusResponse {
    pub has_submitted: bool,
}

/// 提交中的单个答案，附带题目信息
///
/// 题目被替换后，旧答案的 `question_text` / `question_type` / `value` 为空。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackAnswerItem {
    pub id: i64,
    pub question_id: i64,
    pub answer_text: String,
    pub question_text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub value: Option<AnswerValue>,
}

/// 一次提交（含提交者信息与答案）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackResponseItem {
    pub id: i64,
    pub form_id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub answers: Vec<FeedbackAnswerItem>,
}

/// 评分统计
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct RatingStats {
    pub average: Option<f64>,
    /// 下标 0..5 对应 1..=5 分
    pub distribution: [i64; 5],
}

/// 单个选项的计数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct ChoiceCount {
    pub option: String,
    pub count: i64,
}

/// 单题统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct QuestionSummary {
    pub question_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub answered_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceCount>,
}

/// 表单统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackSummaryResponse {
    pub form_id: i64,
    pub total_responses: i64,
    pub questions: Vec<QuestionSummary>,
}
