use crate::config::config::{AppConfig, CatalogSourceKind};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "MODEL_CATALOG_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序：
    /// 1. 开发环境默认值
    /// 2. ./catalog.toml
    /// 3. ./catalog.yaml
    /// 4. 环境变量（MODEL_CATALOG_ 前缀，`__` 分隔层级）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::figment(default_config_path()).extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: PathBuf) -> Figment {
        let base = Figment::from(Serialized::defaults(AppConfig::development()));
        let with_file = if path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
            base.merge(Yaml::file(path))
        } else {
            base.merge(Toml::file(path)).merge(Yaml::file("catalog.yaml"))
        };
        with_file.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        match config.catalog.source {
            CatalogSourceKind::File => match &config.catalog.path {
                None => return Err(ConfigValidationError::MissingCatalogPath),
                Some(path) if path.as_os_str().is_empty() => {
                    return Err(ConfigValidationError::InvalidPath(String::new()));
                }
                Some(_) => {}
            },
            CatalogSourceKind::Http => {
                let url = config.catalog.url.as_deref().unwrap_or_default();
                if url.is_empty() {
                    return Err(ConfigValidationError::MissingCatalogUrl);
                }
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigValidationError::InvalidUrl(url.to_string()));
                }
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("目录文件路径未配置")]
    MissingCatalogPath,

    #[error("目录远程地址未配置")]
    MissingCatalogUrl,

    #[error("目录远程地址无效: {0}")]
    InvalidUrl(String),

    #[error("配置路径无效: {0}")]
    InvalidPath(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("catalog.toml")
}

/// 检查配置文件是否存在
pub fn config_exists(path: &Path) -> bool {
    path.exists()
}
