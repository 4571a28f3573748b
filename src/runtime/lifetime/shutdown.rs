use std::sync::Arc;
use tokio::signal;
use tracing::warn;

use crate::storage::Storage;

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    warn!("Shutdown signal received, initiating graceful shutdown...");
}

/// 停止服务后释放存储连接
pub async fn release_storage(storage: Arc<dyn Storage>) {
    if let Err(e) = storage.close().await {
        warn!("Failed to close storage cleanly: {}", e);
    }
}
