//! 目录加载器
//!
//! 外部协作者：一次性提供模型记录数组，或返回加载/解析错误。
//! 引擎不关心数据来自本地文件还是远程地址。加载器不做重试。

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::model_record::ModelRecord;

/// 加载错误
#[derive(Error, Debug)]
pub enum LoadError {
    /// 读取文件失败
    #[error("读取目录文件失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP 传输失败
    #[error("请求目录数据失败: {0}")]
    Http(String),

    /// HTTP 状态码非成功
    #[error("目录地址 {url} 返回状态码 {status}")]
    Status { url: String, status: u16 },

    /// 数据解析失败
    #[error("目录数据解析失败: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        LoadError::Http(e.to_string())
    }
}

/// 目录加载器 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordLoader: Send + Sync {
    /// 加载全部记录
    async fn load(&self) -> Result<Vec<ModelRecord>, LoadError>;

    /// 数据源描述，用于日志
    fn describe(&self) -> String;
}

/// 解析目录文档
///
/// 接受裸数组，或带 `models` 字段的对象。
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<ModelRecord>, LoadError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| LoadError::Parse(e.to_string()))?;

    let list = match value {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut map) => match map.remove("models") {
            Some(models @ serde_json::Value::Array(_)) => models,
            _ => {
                return Err(LoadError::Parse(
                    "expected an array of models or an object with a `models` array".to_string(),
                ));
            }
        },
        _ => {
            return Err(LoadError::Parse(
                "expected an array of models or an object with a `models` array".to_string(),
            ));
        }
    };

    serde_json::from_value(list).map_err(|e| LoadError::Parse(e.to_string()))
}

/// 本地 JSON 文件加载器
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordLoader for JsonFileLoader {
    async fn load(&self) -> Result<Vec<ModelRecord>, LoadError> {
        debug!("Reading catalog file: {}", self.path.display());
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_catalog(&bytes)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// 远程 HTTP 加载器
#[derive(Debug, Clone)]
pub struct HttpLoader {
    url: String,
    client: reqwest::Client,
}

impl HttpLoader {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl RecordLoader for HttpLoader {
    async fn load(&self) -> Result<Vec<ModelRecord>, LoadError> {
        debug!("Fetching catalog from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        parse_catalog(&bytes)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }
}

/// 内存加载器，直接返回给定记录
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    records: Vec<ModelRecord>,
}

impl StaticLoader {
    pub fn new(records: Vec<ModelRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordLoader for StaticLoader {
    async fn load(&self) -> Result<Vec<ModelRecord>, LoadError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} records", self.records.len())
    }
}
