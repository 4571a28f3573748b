use serde::{Deserialize, Serialize};

/// 活动反馈服务配置
///
/// 来源依次为内置默认值、`config.toml`、`config.{APP_ENV}.toml` 和 `FEEDBACK__` 前缀的环境变量（如 `FEEDBACK__DATABASE__URL`）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

/// 服务名称、运行环境和日志级别
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String, // production 下使用内置 JWT 密钥会告警
    pub log_level: String,
}

/// 反馈 API 的监听配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String, // 非空时改为监听 Unix socket
    pub workers: usize,           // 0 表示按 CPU 核数
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// HTTP 超时
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,    // 毫秒
    pub client_disconnect: u64, // 毫秒
    pub keep_alive: u64,        // 秒
}

/// 请求体上限，约束表单题目和提交答案的 JSON 大小
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 校验学生和教师令牌用的 JWT 配置
///
/// 令牌由校园身份服务签发，本服务只校验签名、类型和有效期。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub secret: String,
    pub access_token_expiry: i64, // 分钟，仅用于本地签发测试令牌
}

/// 反馈表、提交和答案的存储
///
/// 默认使用 `feedback.db` 文件（WAL 模式）；`sqlite::memory:` 时连接池固定为单连接。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 允许访问反馈 API 的活动门户前端来源，空列表表示允许任意来源
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}
