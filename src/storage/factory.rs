//! 加载器工厂模块
//!
//! 根据配置创建相应的目录加载器。

use std::time::Duration;

use crate::config::config::{CatalogConfig, CatalogSourceKind};
use crate::error::{AppError, Result};
use crate::storage::loader::{HttpLoader, JsonFileLoader, RecordLoader};

/// 加载器工厂
pub struct LoaderFactory;

impl LoaderFactory {
    /// 根据配置创建加载器
    pub fn create(config: &CatalogConfig) -> Result<Box<dyn RecordLoader>> {
        match config.source {
            CatalogSourceKind::File => {
                let path = config
                    .path
                    .clone()
                    .ok_or_else(|| AppError::Config("catalog.path is not set".into()))?;
                Ok(Box::new(JsonFileLoader::new(path)))
            }
            CatalogSourceKind::Http => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or_else(|| AppError::Config("catalog.url is not set".into()))?;
                let timeout = Duration::from_secs(config.http_timeout.max(1));
                Ok(Box::new(HttpLoader::new(url, timeout)?))
            }
        }
    }
}
