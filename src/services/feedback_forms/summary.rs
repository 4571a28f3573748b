use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FeedbackAction, FeedbackFormService, error_response};
use crate::errors::{FeedbackError, Result};
use crate::models::ApiResponse;
use crate::models::feedback_forms::{
    entities::{AnswerValue, FeedbackForm, FeedbackQuestion, QuestionType, RATING_MIN},
    responses::{
        ChoiceCount, FeedbackResponseItem, FeedbackSummaryResponse, QuestionSummary, RatingStats,
    },
};
use crate::storage::Storage;

/// 表单统计：每道题的作答数、评分分布与平均分、各选项计数
pub async fn form_summary(storage: &dyn Storage, form_id: i64) -> Result<FeedbackSummaryResponse> {
    let form = storage
        .get_feedback_form_by_id(form_id)
        .await?
        .ok_or_else(|| FeedbackError::not_found(format!("Feedback form {form_id} not found")))?;
    let responses = storage.list_feedback_responses(form_id).await?;

    Ok(summarize(&form, &responses))
}

/// 按当前题目统计；已被替换的题目的答案不计入
pub fn summarize(form: &FeedbackForm, responses: &[FeedbackResponseItem]) -> FeedbackSummaryResponse {
    let questions = form
        .questions
        .iter()
        .map(|question| {
            let values: Vec<&AnswerValue> = responses
                .iter()
                .flat_map(|r| r.answers.iter())
                .filter(|a| a.question_id == question.id)
                .filter_map(|a| a.value.as_ref())
                .collect();
            summarize_question(question, &values)
        })
        .collect();

    FeedbackSummaryResponse {
        form_id: form.id,
        total_responses: responses.len() as i64,
        questions,
    }
}

fn summarize_question(question: &FeedbackQuestion, values: &[&AnswerValue]) -> QuestionSummary {
    let rating = (question.question_type == QuestionType::Rating).then(|| {
        let mut distribution = [0i64; 5];
        let mut total = 0u64;
        let mut count = 0u64;
        for value in values {
            if let AnswerValue::Rating(score) = value {
                distribution[(score - RATING_MIN) as usize] += 1;
                total += u64::from(*score);
                count += 1;
            }
        }
        RatingStats {
            average: (count > 0).then(|| total as f64 / count as f64),
            distribution,
        }
    });

    let choices = match (&question.question_type, &question.options) {
        (QuestionType::MultipleChoice, Some(options)) => options
            .iter()
            .map(|option| ChoiceCount {
                option: option.clone(),
                count: values
                    .iter()
                    .filter(|v| matches!(v, AnswerValue::Choice(c) if c == option))
                    .count() as i64,
            })
            .collect(),
        _ => Vec::new(),
    };

    QuestionSummary {
        question_id: question.id,
        question_text: question.question_text.clone(),
        question_type: question.question_type,
        answered_count: values.len() as i64,
        rating,
        choices,
    }
}

pub async fn get_feedback_summary(
    service: &FeedbackFormService,
    request: &HttpRequest,
    form_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match form_summary(storage.as_ref(), form_id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Feedback summary retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, FeedbackAction::Summarize)),
    }
}
