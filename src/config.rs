use crate::error::AppResult;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};
use serde::{Deserialize, Serialize};

/// 应用配置
///
/// 从可选的 `config` 文件和 `APP_` 前缀的环境变量加载, 例如
/// `APP_SERVER__PORT=9000`, `APP_LOG__LEVEL=debug`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl AppConfig {
    /// 加载配置 (文件 + 环境变量)
    pub fn load() -> AppResult<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("config").required(false))
                .add_source(Self::environment()),
        )
    }

    /// `APP_` 前缀, 层级用 `__` 分隔
    fn environment() -> Environment {
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> AppResult<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 日志级别, 无法识别时退回 INFO
    pub fn log_level(&self) -> tracing::Level {
        self.log.level.parse().unwrap_or(tracing::Level::INFO)
    }
}
