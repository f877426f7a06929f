use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::view::{GroupKey, SortOrder, ViewMode};

/// 目录数据源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSourceKind {
    /// 本地 JSON 文件
    #[default]
    File,
    /// 远程 HTTP 地址
    Http,
}

/// 目录数据源配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// 数据源类型
    pub source: CatalogSourceKind,
    /// JSON 文件路径
    pub path: Option<PathBuf>,
    /// 远程地址
    pub url: Option<String>,
    /// HTTP 请求超时（秒）
    pub http_timeout: u64,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 视图默认值
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewsConfig {
    /// 默认排序
    pub default_sort: SortOrder,
    /// 默认分组键
    pub default_group: GroupKey,
    /// 默认视图模式
    pub default_mode: ViewMode,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 目录数据源配置
    pub catalog: CatalogConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 视图默认值
    pub views: ViewsConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 30,
            },
            catalog: CatalogConfig {
                source: CatalogSourceKind::File,
                path: Some(PathBuf::from("./data/models.json")),
                url: None,
                http_timeout: 10,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            views: ViewsConfig {
                default_sort: SortOrder::ReleaseDateDesc,
                default_group: GroupKey::None,
                default_mode: ViewMode::List,
            },
            app_name: "model-catalog".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }
}
