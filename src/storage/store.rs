//! 记录存储
//!
//! 会话内只加载一次的不可变记录数组。下游所有阶段只读它。

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::model_record::ModelRecord;
use crate::storage::loader::RecordLoader;

/// 记录存储
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[ModelRecord]>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl RecordStore {
    /// 通过加载器加载记录
    ///
    /// 加载失败直接返回错误，不做重试。
    pub async fn load(loader: &dyn RecordLoader) -> Result<Self> {
        let source = loader.describe();
        info!("Loading model catalog from {}", source);

        let records = loader.load().await?;
        let store = Self::from_records(records, source);

        let duplicates = store.duplicate_names();
        if !duplicates.is_empty() {
            warn!(
                "Catalog contains duplicate model names: {}",
                duplicates.join(", ")
            );
        }

        info!("Model catalog loaded: {} records", store.len());
        Ok(store)
    }

    /// 直接由记录构造
    pub fn from_records(records: Vec<ModelRecord>, source: impl Into<String>) -> Self {
        Self {
            records: records.into(),
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    /// 记录快照，克隆只增加引用计数
    pub fn records(&self) -> Arc<[ModelRecord]> {
        Arc::clone(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// 按名称查找记录
    pub fn find(&self, name: &str) -> Option<&ModelRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// 声明 parent 为指定名称的记录，保持原始顺序
    pub fn children_of(&self, name: &str) -> Vec<&ModelRecord> {
        self.records
            .iter()
            .filter(|r| r.parent.as_deref() == Some(name))
            .collect()
    }

    /// 重复出现的名称（按首次出现顺序）
    fn duplicate_names(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for record in self.records.iter() {
            if !seen.insert(record.name.as_str()) && !duplicates.contains(&record.name) {
                duplicates.push(record.name.clone());
            }
        }
        duplicates
    }
}
