//! 表单与答案校验
//!
//! 所有校验都在写入之前完成，失败时不会产生任何数据库写入。

use std::collections::HashSet;

use crate::errors::{FeedbackError, Result};
use crate::models::feedback_forms::{
    entities::{
        AnswerValue, FeedbackForm, NewFeedbackAnswer, NewFeedbackQuestion, QuestionType,
    },
    requests::{FeedbackAnswerInput, FeedbackQuestionInput},
};

/// 未填写标题时使用的默认标题
pub const DEFAULT_FORM_TITLE: &str = "Event Feedback Form";
/// 单选题最少选项数
pub const MIN_CHOICE_OPTIONS: usize = 2;

pub fn normalize_title(title: Option<String>) -> String {
    title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_FORM_TITLE.to_string())
}

pub fn validate_event_id(event_id: i64) -> Result<()> {
    if event_id <= 0 {
        return Err(FeedbackError::validation(format!(
            "Invalid event id: {event_id}"
        )));
    }
    Ok(())
}

/// 校验题目列表并补全默认值
///
/// 未指定顺序时使用题目在输入中的位置。
pub fn validate_questions(inputs: Vec<FeedbackQuestionInput>) -> Result<Vec<NewFeedbackQuestion>> {
    if inputs.is_empty() {
        return Err(FeedbackError::validation(
            "A feedback form needs at least one question",
        ));
    }

    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| validate_question(index, input))
        .collect()
}

fn validate_question(index: usize, input: FeedbackQuestionInput) -> Result<NewFeedbackQuestion> {
    let position = index + 1;
    let question_text = input.question_text.trim().to_string();
    if question_text.is_empty() {
        return Err(FeedbackError::validation(format!(
            "Question {position}: text must not be empty"
        )));
    }

    let question_type = input.question_type.unwrap_or_default();
    let options = match question_type {
        QuestionType::MultipleChoice => {
            let options: Vec<String> = input
                .options
                .unwrap_or_default()
                .into_iter()
                .map(|opt| opt.trim().to_string())
                .filter(|opt| !opt.is_empty())
                .collect();
            if options.len() < MIN_CHOICE_OPTIONS {
                return Err(FeedbackError::validation(format!(
                    "Question {position}: multiple choice questions need at least {MIN_CHOICE_OPTIONS} options"
                )));
            }
            let unique: HashSet<&str> = options.iter().map(String::as_str).collect();
            if unique.len() != options.len() {
                return Err(FeedbackError::validation(format!(
                    "Question {position}: options must be unique"
                )));
            }
            Some(options)
        }
        _ => None,
    };

    Ok(NewFeedbackQuestion {
        question_text,
        question_type,
        options,
        is_required: input.is_required.unwrap_or(true),
        order_index: input.order_index.unwrap_or(index as i32),
    })
}

/// 按表单题目校验答案
///
/// 空白答案允许提交并保存为空字符串；必答题是否作答由前端负责。
pub fn validate_answers(
    form: &FeedbackForm,
    event_id: i64,
    inputs: Vec<FeedbackAnswerInput>,
) -> Result<Vec<NewFeedbackAnswer>> {
    if form.event_id != event_id {
        return Err(FeedbackError::validation(format!(
            "Feedback form {} does not belong to event {event_id}",
            form.id
        )));
    }

    let mut seen = HashSet::with_capacity(inputs.len());
    inputs
        .into_iter()
        .map(|input| {
            let question = form.question(input.question_id).ok_or_else(|| {
                FeedbackError::validation(format!(
                    "Question {} is not part of feedback form {}",
                    input.question_id, form.id
                ))
            })?;
            if !seen.insert(input.question_id) {
                return Err(FeedbackError::validation(format!(
                    "Question {} is answered more than once",
                    input.question_id
                )));
            }
            let value =
                AnswerValue::parse(question, &input.answer_text).map_err(FeedbackError::validation)?;
            Ok(NewFeedbackAnswer {
                question_id: input.question_id,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback_forms::entities::FeedbackQuestion;

    fn input(text: &str, question_type: Option<QuestionType>, options: &[&str]) -> FeedbackQuestionInput {
        FeedbackQuestionInput {
            question_text: text.to_string(),
            question_type,
            options: if options.is_empty() {
                None
            } else {
                Some(options.iter().map(|o| o.to_string()).collect())
            },
            is_required: None,
            order_index: None,
        }
    }

    fn form() -> FeedbackForm {
        let now = chrono::Utc::now();
        FeedbackForm {
            id: 3,
            event_id: 9,
            title: DEFAULT_FORM_TITLE.into(),
            description: String::new(),
            created_by: 1,
            created_at: now,
            updated_at: now,
            questions: vec![
                FeedbackQuestion {
                    id: 10,
                    form_id: 3,
                    question_text: "Rate the event".into(),
                    question_type: QuestionType::Rating,
                    options: None,
                    is_required: true,
                    order_index: 0,
                },
                FeedbackQuestion {
                    id: 11,
                    form_id: 3,
                    question_text: "Venue".into(),
                    question_type: QuestionType::MultipleChoice,
                    options: Some(vec!["Good".into(), "Bad".into()]),
                    is_required: true,
                    order_index: 1,
                },
            ],
        }
    }

    fn answer(question_id: i64, text: &str) -> FeedbackAnswerInput {
        FeedbackAnswerInput {
            question_id,
            answer_text: text.to_string(),
        }
    }

    #[test]
    fn test_defaults_are_filled_in() {
        let questions = validate_questions(vec![
            input("  How was it? ", None, &[]),
            input("Stars", Some(QuestionType::Rating), &["ignored", "too"]),
        ])
        .unwrap();
        assert_eq!(questions[0].question_text, "How was it?");
        assert_eq!(questions[0].question_type, QuestionType::ShortText);
        assert!(questions[0].is_required);
        assert_eq!(questions[0].order_index, 0);
        assert_eq!(questions[1].order_index, 1);
        assert_eq!(questions[1].options, None);
    }

    #[test]
    fn test_multiple_choice_needs_two_options() {
        for opts in [&[][..], &["OnlyOne"][..], &["A", "  "][..]] {
            let err = validate_questions(vec![input(
                "Venue",
                Some(QuestionType::MultipleChoice),
                opts,
            )])
            .unwrap_err();
            assert_eq!(err.code(), "E004");
        }
        let ok = validate_questions(vec![input(
            "Venue",
            Some(QuestionType::MultipleChoice),
            &[" Good ", "Bad"],
        )])
        .unwrap();
        assert_eq!(ok[0].options, Some(vec!["Good".to_string(), "Bad".to_string()]));
    }

    #[test]
    fn test_rejects_empty_forms_and_blank_text() {
        assert!(validate_questions(vec![]).is_err());
        assert!(validate_questions(vec![input("   ", None, &[])]).is_err());
        assert!(
            validate_questions(vec![input(
                "Pick",
                Some(QuestionType::MultipleChoice),
                &["A", "A"]
            )])
            .is_err()
        );
    }

    #[test]
    fn test_title_defaults() {
        assert_eq!(normalize_title(None), DEFAULT_FORM_TITLE);
        assert_eq!(normalize_title(Some("  ".into())), DEFAULT_FORM_TITLE);
        assert_eq!(normalize_title(Some(" Demo Day ".into())), "Demo Day");
    }

    #[test]
    fn test_valid_answers() {
        let answers =
            validate_answers(&form(), 9, vec![answer(10, "4"), answer(11, "Good")]).unwrap();
        assert_eq!(answers[0].value, Some(AnswerValue::Rating(4)));
        assert_eq!(answers[1].answer_text(), "Good");
    }

    #[test]
    fn test_invalid_answers() {
        let form = form();
        // 活动不匹配
        assert!(validate_answers(&form, 8, vec![answer(10, "4")]).is_err());
        // 不属于该表单的题目
        assert!(validate_answers(&form, 9, vec![answer(99, "x")]).is_err());
        // 重复作答
        assert!(validate_answers(&form, 9, vec![answer(10, "4"), answer(10, "5")]).is_err());
        // 评分越界
        assert!(validate_answers(&form, 9, vec![answer(10, "9")]).is_err());
        // 选项不存在
        assert!(validate_answers(&form, 9, vec![answer(11, "Meh")]).is_err());
    }

    #[test]
    fn test_blank_answer_is_kept_as_empty_string() {
        let answers = validate_answers(&form(), 9, vec![answer(10, "")]).unwrap();
        assert_eq!(answers[0].value, None);
        assert_eq!(answers[0].answer_text(), "");
    }
}
