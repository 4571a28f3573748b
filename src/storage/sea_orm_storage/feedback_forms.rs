//! 反馈表存储操作

use super::{SeaOrmStorage, is_unique_violation, transaction_error};
use crate::entity::feedback_answers::{Column as AnswerColumn, Entity as FeedbackAnswers};
use crate::entity::feedback_forms::{ActiveModel, Column, Entity as FeedbackForms};
use crate::entity::feedback_questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as FeedbackQuestions,
};
use crate::entity::feedback_responses::{Column as ResponseColumn, Entity as FeedbackResponses};
use crate::errors::{FeedbackError, Result};
use crate::models::feedback_forms::entities::{
    FeedbackForm, FeedbackFormUpdate, FeedbackQuestion, NewFeedbackForm, NewFeedbackQuestion,
    QuestionType,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
};
use tracing::{info, warn};

const CREATE_FORM: &str = "创建反馈表";
const UPDATE_FORM: &str = "更新反馈表";
const DELETE_FORM: &str = "删除反馈表";

impl SeaOrmStorage {
    /// 创建反馈表
    ///
    /// 表单和全部题目在同一事务中写入，任何一步失败都整体回滚。
    pub async fn create_feedback_form_impl(&self, form: NewFeedbackForm) -> Result<i64> {
        let event_id = form.event_id;
        let txn = self.begin(CREATE_FORM).await?;

        match Self::insert_form_rows(&txn, form).await {
            Ok(form_id) => {
                Self::commit(txn, CREATE_FORM).await?;
                info!("反馈表已创建: form_id={form_id}, event_id={event_id}");
                Ok(form_id)
            }
            Err(e) => {
                Self::rollback(txn, CREATE_FORM).await;
                Err(e)
            }
        }
    }

    async fn insert_form_rows(txn: &DatabaseTransaction, form: NewFeedbackForm) -> Result<i64> {
        // 事务以写入开始；每个活动只允许一份反馈表，由 event_id 唯一索引保证
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            event_id: Set(form.event_id),
            title: Set(form.title),
            description: Set(form.description),
            created_by: Set(form.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                warn!("活动 {} 已存在反馈表", form.event_id);
                FeedbackError::conflict(format!(
                    "A feedback form already exists for event {}",
                    form.event_id
                ))
            } else {
                transaction_error(CREATE_FORM, e)
            }
        })?;

        Self::insert_questions(txn, inserted.id, form.questions, CREATE_FORM).await?;

        Ok(inserted.id)
    }

    /// 按顺序逐条写入题目
    async fn insert_questions(
        txn: &DatabaseTransaction,
        form_id: i64,
        questions: Vec<NewFeedbackQuestion>,
        action: &str,
    ) -> Result<()> {
        for question in questions {
            let options = match (question.question_type, question.options) {
                (QuestionType::MultipleChoice, Some(options)) => {
                    Some(serde_json::to_string(&options)?)
                }
                _ => None,
            };

            QuestionActiveModel {
                form_id: Set(form_id),
                question_text: Set(question.question_text),
                question_type: Set(question.question_type.to_string()),
                options: Set(options),
                is_required: Set(question.is_required),
                order_index: Set(question.order_index),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(|e| transaction_error(action, e))?;
        }
        Ok(())
    }

    /// 读取表单题目，按 order_index 升序，相同时按创建顺序
    async fn load_questions<C: ConnectionTrait>(
        conn: &C,
        form_id: i64,
    ) -> Result<Vec<FeedbackQuestion>> {
        let questions = FeedbackQuestions::find()
            .filter(QuestionColumn::FormId.eq(form_id))
            .order_by_asc(QuestionColumn::OrderIndex)
            .order_by_asc(QuestionColumn::Id)
            .all(conn)
            .await
            .map_err(|e| FeedbackError::database_operation(format!("查询反馈题目失败: {e}")))?;

        Ok(questions
            .into_iter()
            .map(|q| q.into_feedback_question())
            .collect())
    }

    /// 通过活动 ID 获取反馈表
    ///
    /// 若历史数据中同一活动存在多份表单，取 ID 最小的一份。
    pub async fn get_feedback_form_by_event_impl(
        &self,
        event_id: i64,
    ) -> Result<Option<FeedbackForm>> {
        let form = FeedbackForms::find()
            .filter(Column::EventId.eq(event_id))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| FeedbackError::database_operation(format!("查询反馈表失败: {e}")))?;

        match form {
            Some(form) => {
                let questions = Self::load_questions(&self.db, form.id).await?;
                Ok(Some(form.into_feedback_form(questions)))
            }
            None => Ok(None),
        }
    }

    /// 通过 ID 获取反馈表
    pub async fn get_feedback_form_by_id_impl(&self, form_id: i64) -> Result<Option<FeedbackForm>> {
        let form = FeedbackForms::find_by_id(form_id)
            .one(&self.db)
            .await
            .map_err(|e| FeedbackError::database_operation(format!("查询反馈表失败: {e}")))?;

        match form {
            Some(form) => {
                let questions = Self::load_questions(&self.db, form.id).await?;
                Ok(Some(form.into_feedback_form(questions)))
            }
            None => Ok(None),
        }
    }

    /// 更新反馈表
    ///
    /// 题目集合整体替换：先删除全部旧题目再插入新题目，旧题目 ID 不保留。
    /// 已有答案仍引用旧题目 ID。
    pub async fn update_feedback_form_impl(
        &self,
        form_id: i64,
        update: FeedbackFormUpdate,
    ) -> Result<bool> {
        let txn = self.begin(UPDATE_FORM).await?;

        match Self::replace_form_rows(&txn, form_id, update).await {
            Ok(true) => {
                Self::commit(txn, UPDATE_FORM).await?;
                info!("反馈表已更新: form_id={form_id}");
                Ok(true)
            }
            Ok(false) => {
                Self::rollback(txn, UPDATE_FORM).await;
                Ok(false)
            }
            Err(e) => {
                Self::rollback(txn, UPDATE_FORM).await;
                Err(e)
            }
        }
    }

    async fn replace_form_rows(
        txn: &DatabaseTransaction,
        form_id: i64,
        update: FeedbackFormUpdate,
    ) -> Result<bool> {
        // 先写表单行再读其他数据，SQLite 在第一条语句就取得写锁
        let updated = FeedbackForms::update_many()
            .col_expr(Column::Title, Expr::value(update.title))
            .col_expr(Column::Description, Expr::value(update.description))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(form_id))
            .exec(txn)
            .await
            .map_err(|e| transaction_error(UPDATE_FORM, e))?;
        // MySQL 只统计值有变化的行，0 行时再确认表单是否存在
        if updated.rows_affected == 0
            && FeedbackForms::find_by_id(form_id)
                .count(txn)
                .await
                .map_err(|e| transaction_error(UPDATE_FORM, e))?
                == 0
        {
            return Ok(false);
        }

        let removed = FeedbackQuestions::delete_many()
            .filter(QuestionColumn::FormId.eq(form_id))
            .exec(txn)
            .await
            .map_err(|e| transaction_error(UPDATE_FORM, e))?;

        let answered = FeedbackResponses::find()
            .filter(ResponseColumn::FormId.eq(form_id))
            .count(txn)
            .await
            .map_err(|e| transaction_error(UPDATE_FORM, e))?;
        if answered > 0 && removed.rows_affected > 0 {
            warn!(
                "反馈表 {form_id} 已有 {answered} 份提交，替换题目后旧答案将不再关联到题目"
            );
        }

        Self::insert_questions(txn, form_id, update.questions, UPDATE_FORM).await?;

        Ok(true)
    }

    /// 删除反馈表
    ///
    /// 显式清理答案、提交和题目，不依赖数据库的级联设置。
    pub async fn delete_feedback_form_impl(&self, form_id: i64) -> Result<bool> {
        let txn = self.begin(DELETE_FORM).await?;

        match Self::delete_form_rows(&txn, form_id).await {
            Ok(deleted) => {
                Self::commit(txn, DELETE_FORM).await?;
                if deleted {
                    info!("反馈表已删除: form_id={form_id}");
                }
                Ok(deleted)
            }
            Err(e) => {
                Self::rollback(txn, DELETE_FORM).await;
                Err(e)
            }
        }
    }

    async fn delete_form_rows(txn: &DatabaseTransaction, form_id: i64) -> Result<bool> {
        // 按子查询删除答案，事务的第一条语句即为写入
        let response_ids = FeedbackResponses::find()
            .select_only()
            .column(ResponseColumn::Id)
            .filter(ResponseColumn::FormId.eq(form_id))
            .into_query();
        FeedbackAnswers::delete_many()
            .filter(AnswerColumn::ResponseId.in_subquery(response_ids))
            .exec(txn)
            .await
            .map_err(|e| transaction_error(DELETE_FORM, e))?;

        FeedbackResponses::delete_many()
            .filter(ResponseColumn::FormId.eq(form_id))
            .exec(txn)
            .await
            .map_err(|e| transaction_error(DELETE_FORM, e))?;

        FeedbackQuestions::delete_many()
            .filter(QuestionColumn::FormId.eq(form_id))
            .exec(txn)
            .await
            .map_err(|e| transaction_error(DELETE_FORM, e))?;

        let result = FeedbackForms::delete_by_id(form_id)
            .exec(txn)
            .await
            .map_err(|e| transaction_error(DELETE_FORM, e))?;

        Ok(result.rows_affected > 0)
    }
}
