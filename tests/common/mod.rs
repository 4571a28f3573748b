#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rust_event_feedback::config::DatabaseConfig;
use rust_event_feedback::entity::prelude::UserActiveModel;
use rust_event_feedback::models::feedback_forms::requests::{
    CreateFeedbackFormRequest, SubmitFeedbackRequest,
};
use rust_event_feedback::models::users::entities::UserRole;
use rust_event_feedback::storage::{SeaOrmStorage, Storage};
use sea_orm::{ActiveModelTrait, Set};

pub const FACULTY_ID: i64 = 1;
pub const STUDENT_ONE: i64 = 2;
pub const STUDENT_TWO: i64 = 3;

pub struct TestStore {
    pub raw: SeaOrmStorage,
    pub storage: Arc<dyn Storage>,
}

/// 每个测试一个独立的内存库，已完成迁移并写入三个用户
pub async fn spawn_store() -> TestStore {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let raw = SeaOrmStorage::connect(&config)
        .await
        .expect("Failed to open in-memory database");

    seed_users(raw).await
}

/// 文件数据库（WAL + 多连接），用于并发写入
pub struct FileStore {
    pub store: TestStore,
    path: PathBuf,
}

impl Drop for FileStore {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

static FILE_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

pub async fn spawn_file_store(pool_size: u32) -> FileStore {
    let path = std::env::temp_dir().join(format!(
        "feedback-test-{}-{}-{}.db",
        std::process::id(),
        FILE_DB_COUNTER.fetch_add(1, Ordering::SeqCst),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let config = DatabaseConfig {
        url: path.to_string_lossy().into_owned(),
        pool_size,
        timeout: 30,
    };
    let raw = SeaOrmStorage::connect(&config)
        .await
        .expect("Failed to open file database");

    FileStore {
        store: seed_users(raw).await,
        path,
    }
}

async fn seed_users(raw: SeaOrmStorage) -> TestStore {
    seed_user(&raw, "Grace Faculty", "grace@college.edu", UserRole::Faculty).await;
    seed_user(&raw, "Sam Student", "sam@college.edu", UserRole::Student).await;
    seed_user(&raw, "Alex Student", "alex@college.edu", UserRole::Student).await;

    let storage: Arc<dyn Storage> = Arc::new(raw.clone());
    TestStore { raw, storage }
}

async fn seed_user(storage: &SeaOrmStorage, name: &str, email: &str, role: UserRole) {
    UserActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        role: Set(role.to_string()),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(storage.connection())
    .await
    .expect("Failed to seed user");
}

/// 评分题 + 单选题
pub fn rating_and_venue_form(event_id: i64) -> CreateFeedbackFormRequest {
    serde_json::from_value(serde_json::json!({
        "event_id": event_id,
        "title": "Hackathon Feedback",
        "description": "Tell us how it went",
        "questions": [
            { "text": "Rate the event", "type": "rating", "required": true },
            { "text": "Venue", "type": "multiple_choice", "options": ["Good", "Bad"], "required": true }
        ]
    }))
    .expect("valid create request")
}

pub fn submission(form_id: i64, event_id: i64, answers: &[(i64, &str)]) -> SubmitFeedbackRequest {
    let answers: Vec<serde_json::Value> = answers
        .iter()
        .map(|(question_id, text)| {
            serde_json::json!({ "question_id": question_id, "answer_text": text })
        })
        .collect();
    serde_json::from_value(serde_json::json!({
        "form_id": form_id,
        "event_id": event_id,
        "answers": answers,
    }))
    .expect("valid submit request")
}
