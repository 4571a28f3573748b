use serde::Deserialize;
use ts_rs::TS;

use crate::models::feedback_forms::entities::QuestionType;

/// 题目输入
///
/// 同时接受 snake_case 与旧版前端使用的 camelCase 字段名。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackQuestionInput {
    #[serde(default, alias = "questionText", alias = "text")]
    pub question_text: String,
    #[serde(default, alias = "questionType", alias = "type")]
    pub question_type: Option<QuestionType>, // 缺省为 short_text
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default, alias = "isRequired", alias = "required")]
    pub is_required: Option<bool>, // 缺省为 true
    #[serde(default, alias = "orderIndex", alias = "order")]
    pub order_index: Option<i32>, // 缺省为输入位置
}

/// 创建反馈表请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct CreateFeedbackFormRequest {
    #[serde(alias = "eventId")]
    pub event_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<FeedbackQuestionInput>,
}

/// 更新反馈表请求（题目整体替换）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct UpdateFeedbackFormRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<FeedbackQuestionInput>,
}

/// 单个答案输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackAnswerInput {
    #[serde(alias = "questionId")]
    pub question_id: i64,
    #[serde(
        default,
        alias = "answerText",
        deserialize_with = "deserialize_answer_text"
    )]
    pub answer_text: String,
}

/// 提交反馈请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct SubmitFeedbackRequest {
    #[serde(alias = "formId")]
    pub form_id: i64,
    #[serde(alias = "eventId")]
    pub event_id: i64,
    #[serde(default)]
    pub answers: Vec<FeedbackAnswerInput>,
}

// 评分控件会直接发送数字，这里统一转成字符串
fn deserialize_answer_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Visitor};
    use std::fmt;

    struct AnswerTextVisitor;

    impl<'de> Visitor<'de> for AnswerTextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value.fract() == 0.0 && value.abs() < 1e15 {
                Ok(format!("{}", value as i64))
            } else {
                Ok(value.to_string())
            }
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(AnswerTextVisitor)
}
