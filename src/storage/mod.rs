use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::feedback_forms::{
    entities::{FeedbackForm, FeedbackFormUpdate, NewFeedbackForm, NewFeedbackResponse},
    responses::FeedbackResponseItem,
};

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

/// 存储客户端
///
/// 在进程启动时创建，通过 `app_data` 注入到各个服务，关闭时显式调用 `close`。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 反馈表管理方法
    // 创建反馈表及其全部题目（同一事务）
    async fn create_feedback_form(&self, form: NewFeedbackForm) -> Result<i64>;
    // 通过活动ID获取反馈表，题目按顺序排列
    async fn get_feedback_form_by_event(&self, event_id: i64) -> Result<Option<FeedbackForm>>;
    // 通过ID获取反馈表
    async fn get_feedback_form_by_id(&self, form_id: i64) -> Result<Option<FeedbackForm>>;
    // 更新标题、描述并整体替换题目，表单不存在时返回 false
    async fn update_feedback_form(
        &self,
        form_id: i64,
        update: FeedbackFormUpdate,
    ) -> Result<bool>;
    // 删除反馈表及其题目、提交和答案
    async fn delete_feedback_form(&self, form_id: i64) -> Result<bool>;

    /// 反馈提交方法
    // 学生是否已提交过该活动的反馈
    async fn has_submitted_feedback(&self, event_id: i64, student_id: i64) -> Result<bool>;
    // 写入一次提交及其答案（同一事务），重复提交返回 Conflict
    async fn submit_feedback_response(&self, response: NewFeedbackResponse) -> Result<i64>;
    // 列出表单的全部提交，按提交时间倒序
    async fn list_feedback_responses(&self, form_id: i64) -> Result<Vec<FeedbackResponseItem>>;

    // 释放连接池
    async fn close(&self) -> Result<()>;
}

/// 按配置创建存储实例并运行迁移
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
