use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;

use crate::config::redis_conf::RedisConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl AppConfig {
    /// 从配置文件加载配置
    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // 加载默认配置
            .add_source(File::with_name(config_path).required(false))
            // 加载环境特定配置
            .add_source(File::with_name(&format!("{}.{}", config_path, run_mode)).required(false))
            // 从环境变量加载配置（前缀为 APP_）
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// 从嵌入的配置内容加载（编译时嵌入）
    pub fn from_embedded(default_config: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(default_config, FileFormat::Toml))
            // 从环境变量加载配置（优先级最高）
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// 智能加载配置：优先从文件加载，如果失败则从嵌入资源加载
    pub fn from_file_or_embedded(
        config_path: &str,
        default_config: &str,
    ) -> Result<Self, ConfigError> {
        match Self::from_file(config_path) {
            Ok(config) => Ok(config),
            Err(e) => {
                println!("文件系统加载配置失败: {}，使用嵌入配置", e);
                Self::from_embedded(default_config)
            }
        }
    }
}
