//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod feedback_forms;
mod feedback_responses;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{FeedbackError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, SqlErr,
    TransactionTrait,
};
use std::time::Duration;
use tracing::{error, info, warn};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 底层连接，供用户数据同步等直接读写使用
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| FeedbackError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = Self::is_in_memory_sqlite(url);

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| FeedbackError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let pool_options = if in_memory {
            // 内存数据库每个连接都是独立的库，只能保留一个常驻连接
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| FeedbackError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| FeedbackError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(FeedbackError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    fn is_in_memory_sqlite(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// 开启事务
    pub(crate) async fn begin(&self, action: &str) -> Result<DatabaseTransaction> {
        self.db.begin().await.map_err(|e| {
            error!("{action}: 开启事务失败: {e}");
            FeedbackError::transaction(format!("{action}失败"))
        })
    }

    /// 提交事务
    pub(crate) async fn commit(txn: DatabaseTransaction, action: &str) -> Result<()> {
        txn.commit().await.map_err(|e| {
            error!("{action}: 提交事务失败: {e}");
            FeedbackError::transaction(format!("{action}失败"))
        })
    }

    /// 显式回滚事务，回滚本身失败只记录日志
    pub(crate) async fn rollback(txn: DatabaseTransaction, action: &str) {
        if let Err(e) = txn.rollback().await {
            warn!("{action}: 回滚事务失败: {e}");
        } else {
            warn!("{action}: 事务已回滚");
        }
    }

    /// 关闭连接池
    pub async fn close_impl(&self) -> Result<()> {
        self.db
            .clone()
            .close()
            .await
            .map_err(|e| FeedbackError::database_connection(format!("关闭数据库连接失败: {e}")))?;
        info!("数据库连接池已关闭");
        Ok(())
    }
}

/// 事务内的数据库错误只记录日志，对外返回通用的失败信息
pub(crate) fn transaction_error(action: &str, err: DbErr) -> FeedbackError {
    error!("{action}: {err}");
    FeedbackError::transaction(format!("{action}失败"))
}

/// 是否违反唯一约束
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// Storage trait 实现
use crate::models::feedback_forms::{
    entities::{FeedbackForm, FeedbackFormUpdate, NewFeedbackForm, NewFeedbackResponse},
    responses::FeedbackResponseItem,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 反馈表模块
    async fn create_feedback_form(&self, form: NewFeedbackForm) -> Result<i64> {
        self.create_feedback_form_impl(form).await
    }

    async fn get_feedback_form_by_event(&self, event_id: i64) -> Result<Option<FeedbackForm>> {
        self.get_feedback_form_by_event_impl(event_id).await
    }

    async fn get_feedback_form_by_id(&self, form_id: i64) -> Result<Option<FeedbackForm>> {
        self.get_feedback_form_by_id_impl(form_id).await
    }

    async fn update_feedback_form(
        &self,
        form_id: i64,
        update: FeedbackFormUpdate,
    ) -> Result<bool> {
        self.update_feedback_form_impl(form_id, update).await
    }

    async fn delete_feedback_form(&self, form_id: i64) -> Result<bool> {
        self.delete_feedback_form_impl(form_id).await
    }

    // 反馈提交模块
    async fn has_submitted_feedback(&self, event_id: i64, student_id: i64) -> Result<bool> {
        self.has_submitted_feedback_impl(event_id, student_id).await
    }

    async fn submit_feedback_response(&self, response: NewFeedbackResponse) -> Result<i64> {
        self.submit_feedback_response_impl(response).await
    }

    async fn list_feedback_responses(&self, form_id: i64) -> Result<Vec<FeedbackResponseItem>> {
        self.list_feedback_responses_impl(form_id).await
    }

    async fn close(&self) -> Result<()> {
        self.close_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("feedback.db").unwrap(),
            "sqlite://feedback.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/feedback").unwrap(),
            "postgres://u:p@localhost/feedback"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(SeaOrmStorage::is_in_memory_sqlite("sqlite::memory:"));
        assert!(SeaOrmStorage::is_in_memory_sqlite(
            "sqlite://file?mode=memory&cache=shared"
        ));
        assert!(!SeaOrmStorage::is_in_memory_sqlite("sqlite://feedback.db?mode=rwc"));
    }
}
