use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 最低评分
pub const RATING_MIN: u8 = 1;
/// 最高评分
pub const RATING_MAX: u8 = 5;

/// 题目类型
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "feedback_form.ts")]
pub enum QuestionType {
    #[default]
    ShortText,      // 单行文本
    LongText,       // 多行文本
    Rating,         // 1-5 评分
    MultipleChoice, // 单选
}

impl QuestionType {
    pub const SHORT_TEXT: &'static str = "short_text";
    pub const LONG_TEXT: &'static str = "long_text";
    pub const RATING: &'static str = "rating";
    pub const MULTIPLE_CHOICE: &'static str = "multiple_choice";

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::ShortText => Self::SHORT_TEXT,
            QuestionType::LongText => Self::LONG_TEXT,
            QuestionType::Rating => Self::RATING,
            QuestionType::MultipleChoice => Self::MULTIPLE_CHOICE,
        }
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<QuestionType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的题目类型: '{s}'. 支持的类型: short_text, long_text, rating, multiple_choice"
            ))
        })
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    // text / textarea 是旧版表单构建器使用的名称
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::SHORT_TEXT | "text" => Ok(QuestionType::ShortText),
            Self::LONG_TEXT | "textarea" => Ok(QuestionType::LongText),
            Self::RATING => Ok(QuestionType::Rating),
            Self::MULTIPLE_CHOICE => Ok(QuestionType::MultipleChoice),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

/// 反馈题目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackQuestion {
    pub id: i64,
    pub form_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    /// 只有单选题有选项
    pub options: Option<Vec<String>>,
    pub is_required: bool,
    pub order_index: i32,
}

/// 反馈表单（含按顺序排列的题目）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "feedback_form.ts")]
pub struct FeedbackForm {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub questions: Vec<FeedbackQuestion>,
}

impl FeedbackForm {
    pub fn question(&self, question_id: i64) -> Option<&FeedbackQuestion> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// 已校验、待写入的题目
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedbackQuestion {
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Option<Vec<String>>,
    pub is_required: bool,
    pub order_index: i32,
}

/// 已校验、待写入的表单
#[derive(Debug, Clone)]
pub struct NewFeedbackForm {
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub created_by: i64,
    pub questions: Vec<NewFeedbackQuestion>,
}

/// 表单整体替换（题目集合全部删除后重新插入）
#[derive(Debug, Clone)]
pub struct FeedbackFormUpdate {
    pub title: String,
    pub description: String,
    pub questions: Vec<NewFeedbackQuestion>,
}

/// 按题目类型解析后的答案
///
/// 持久化时统一写成字符串：评分写数字，单选写选项原文。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export, export_to = "feedback_form.ts")]
pub enum AnswerValue {
    Text(String),
    Rating(u8),
    Choice(String),
}

impl AnswerValue {
    /// 按题目解析原始答案。空白答案返回 `Ok(None)`。
    pub fn parse(question: &FeedbackQuestion, raw: &str) -> Result<Option<Self>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match question.question_type {
            QuestionType::ShortText | QuestionType::LongText => {
                Ok(Some(AnswerValue::Text(raw.to_string())))
            }
            QuestionType::Rating => match trimmed.parse::<u8>() {
                Ok(score) if (RATING_MIN..=RATING_MAX).contains(&score) => {
                    Ok(Some(AnswerValue::Rating(score)))
                }
                _ => Err(format!(
                    "Rating for question {} must be an integer between {RATING_MIN} and {RATING_MAX}, got '{trimmed}'",
                    question.id
                )),
            },
            QuestionType::MultipleChoice => {
                let options = question.options.as_deref().unwrap_or_default();
                if options.iter().any(|opt| opt == trimmed) {
                    Ok(Some(AnswerValue::Choice(trimmed.to_string())))
                } else {
                    Err(format!(
                        "'{trimmed}' is not an option of question {}",
                        question.id
                    ))
                }
            }
        }
    }

    /// 持久化使用的字符串形式
    pub fn to_answer_text(&self) -> String {
        match self {
            AnswerValue::Text(text) | AnswerValue::Choice(text) => text.clone(),
            AnswerValue::Rating(score) => score.to_string(),
        }
    }
}

/// 待写入的答案
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedbackAnswer {
    pub question_id: i64,
    pub value: Option<AnswerValue>,
}

impl NewFeedbackAnswer {
    pub fn answer_text(&self) -> String {
        self.value
            .as_ref()
            .map(AnswerValue::to_answer_text)
            .unwrap_or_default()
    }
}

/// 待写入的一次提交
#[derive(Debug, Clone)]
pub struct NewFeedbackResponse {
    pub form_id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub answers: Vec<NewFeedbackAnswer>,
}
