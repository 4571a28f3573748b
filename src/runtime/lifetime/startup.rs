use crate::config::AppConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 检查启动时的安全配置
fn check_security_settings(config: &AppConfig) {
    if !config.uses_default_jwt_secret() {
        return;
    }
    if config.is_production() {
        warn!("==========================================================");
        warn!("  JWT_SECRET IS NOT SET - USING BUILT-IN DEVELOPMENT SECRET");
        warn!("  Tokens issued by the identity service will not verify");
        warn!("  Please set JWT_SECRET before serving real traffic");
        warn!("==========================================================");
    } else {
        debug!("Using built-in development JWT secret");
    }
}

/// 准备服务器启动的上下文
/// 包括存储连接与数据库迁移
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();
    check_security_settings(config);

    let storage = crate::storage::create_storage(&config.database)
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    StartupContext { storage }
}
