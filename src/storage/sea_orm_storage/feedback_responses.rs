//! 反馈提交存储操作

use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, is_unique_violation, transaction_error};
use crate::entity::feedback_answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as FeedbackAnswers,
};
use crate::entity::feedback_questions::{Column as QuestionColumn, Entity as FeedbackQuestions};
use crate::entity::feedback_responses::{ActiveModel, Column, Entity as FeedbackResponses};
use crate::errors::{FeedbackError, Result};
use crate::models::feedback_forms::{
    entities::{AnswerValue, FeedbackQuestion, NewFeedbackResponse},
    responses::{FeedbackAnswerItem, FeedbackResponseItem},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, warn};

const SUBMIT_RESPONSE: &str = "提交反馈";

impl SeaOrmStorage {
    /// 学生是否已提交过该活动的反馈
    pub async fn has_submitted_feedback_impl(&self, event_id: i64, student_id: i64) -> Result<bool> {
        let count = FeedbackResponses::find()
            .filter(Column::EventId.eq(event_id))
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| FeedbackError::database_operation(format!("查询提交状态失败: {e}")))?;

        Ok(count > 0)
    }

    /// 写入一次提交
    ///
    /// 提交记录和全部答案在同一事务中完成，任何一条失败都整体回滚。
    /// 重复提交在插入提交记录时触发唯一索引并返回 Conflict。
    pub async fn submit_feedback_response_impl(&self, response: NewFeedbackResponse) -> Result<i64> {
        let (form_id, student_id) = (response.form_id, response.student_id);
        let txn = self.begin(SUBMIT_RESPONSE).await?;

        match Self::insert_response_rows(&txn, response).await {
            Ok(response_id) => {
                Self::commit(txn, SUBMIT_RESPONSE).await?;
                info!(
                    "反馈已提交: response_id={response_id}, form_id={form_id}, student_id={student_id}"
                );
                Ok(response_id)
            }
            Err(e) => {
                Self::rollback(txn, SUBMIT_RESPONSE).await;
                Err(e)
            }
        }
    }

    async fn insert_response_rows(
        txn: &DatabaseTransaction,
        response: NewFeedbackResponse,
    ) -> Result<i64> {
        // 事务的第一条语句就是写入：SQLite 在此处取得写锁，并发写入按 busy_timeout 排队。
        // 重复提交由 (form_id, student_id, event_id) 唯一索引拦截
        let inserted = ActiveModel {
            form_id: Set(response.form_id),
            event_id: Set(response.event_id),
            student_id: Set(response.student_id),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!(
                    "重复提交: form_id={}, student_id={}, event_id={}",
                    response.form_id, response.student_id, response.event_id
                );
                FeedbackError::conflict("Feedback already submitted for this event")
            } else {
                transaction_error(SUBMIT_RESPONSE, e)
            }
        })?;

        for answer in &response.answers {
            AnswerActiveModel {
                response_id: Set(inserted.id),
                question_id: Set(answer.question_id),
                answer_text: Set(answer.answer_text()),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(|e| transaction_error(SUBMIT_RESPONSE, e))?;
        }

        Ok(inserted.id)
    }

    /// 列出表单的全部提交
    ///
    /// 提交按时间倒序；每份提交内的答案按题目顺序排列，题目已被替换的答案排在最后。
    pub async fn list_feedback_responses_impl(
        &self,
        form_id: i64,
    ) -> Result<Vec<FeedbackResponseItem>> {
        let responses = FeedbackResponses::find()
            .filter(Column::FormId.eq(form_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| FeedbackError::database_operation(format!("查询反馈提交失败: {e}")))?;

        if responses.is_empty() {
            return Ok(Vec::new());
        }

        // 批量查询答案
        let response_ids: Vec<i64> = responses.iter().map(|r| r.id).collect();
        let answers = FeedbackAnswers::find()
            .filter(AnswerColumn::ResponseId.is_in(response_ids))
            .order_by_asc(AnswerColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| FeedbackError::database_operation(format!("查询反馈答案失败: {e}")))?;

        // 批量查询答案引用的题目（可能已被替换），只认本表单的题目
        let question_ids: Vec<i64> = answers
            .iter()
            .map(|a| a.question_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let questions: HashMap<i64, FeedbackQuestion> = if question_ids.is_empty() {
            HashMap::new()
        } else {
            FeedbackQuestions::find()
                .filter(QuestionColumn::Id.is_in(question_ids))
                .filter(QuestionColumn::FormId.eq(form_id))
                .all(&self.db)
                .await
                .map_err(|e| FeedbackError::database_operation(format!("查询反馈题目失败: {e}")))?
                .into_iter()
                .map(|q| (q.id, q.into_feedback_question()))
                .collect()
        };

        // 批量查询提交者
        let student_ids: Vec<i64> = responses
            .iter()
            .map(|r| r.student_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let contacts = self.get_user_contacts_impl(&student_ids).await?;

        let mut answers_by_response: HashMap<i64, Vec<FeedbackAnswerItem>> = HashMap::new();
        for answer in answers {
            let question = questions.get(&answer.question_id);
            let item = FeedbackAnswerItem {
                id: answer.id,
                question_id: answer.question_id,
                question_text: question.map(|q| q.question_text.clone()),
                question_type: question.map(|q| q.question_type),
                value: question
                    .and_then(|q| AnswerValue::parse(q, &answer.answer_text).ok().flatten()),
                answer_text: answer.answer_text,
            };
            answers_by_response
                .entry(answer.response_id)
                .or_default()
                .push(item);
        }

        let items = responses
            .into_iter()
            .map(|response| {
                let mut answers = answers_by_response.remove(&response.id).unwrap_or_default();
                answers.sort_by_key(|a| {
                    let order = questions
                        .get(&a.question_id)
                        .map(|q| (0, q.order_index, q.id));
                    (order.unwrap_or((1, 0, 0)), a.id)
                });
                let contact = contacts.get(&response.student_id);

                FeedbackResponseItem {
                    id: response.id,
                    form_id: response.form_id,
                    event_id: response.event_id,
                    student_id: response.student_id,
                    student_name: contact.map(|c| c.name.clone()),
                    student_email: contact.map(|c| c.email.clone()),
                    submitted_at: chrono::DateTime::from_timestamp(response.submitted_at, 0)
                        .unwrap_or_default(),
                    answers,
                }
            })
            .collect();

        Ok(items)
    }
}
