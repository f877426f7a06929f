//! 视图引擎
//!
//! 过滤 → 排序 → {分组 | 建树} 的显式入口。每个入口都是当前输入的纯函数，
//! 输入变化时完整重算；每个阶段用单槽缓存按结构相等记忆化。

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::models::model_record::ModelRecord;
use crate::models::view::{FilterSpec, GroupKey, SortOrder, ViewMode, ViewRequest};
use crate::observability::AppMetrics;
use crate::services::filter::filter_records;
use crate::services::group::{GroupedRecords, group_records};
use crate::services::memo::{Memo, RecordsKey};
use crate::services::sort::sort_records;
use crate::services::tree_builder::{TreeBuild, build_tree_with_report};

type FilterKey = (RecordsKey, FilterSpec);
type SortKey = (RecordsKey, FilterSpec, SortOrder);
type GroupCacheKey = (RecordsKey, FilterSpec, SortOrder, GroupKey);

/// 视图输出
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", content = "data", rename_all = "lowercase")]
pub enum ViewOutput {
    List(Arc<Vec<ModelRecord>>),
    Grouped(Arc<GroupedRecords>),
    Tree(Arc<TreeBuild>),
}

/// 视图引擎
#[derive(Debug)]
pub struct ViewEngine {
    filtered: Memo<FilterKey, Vec<ModelRecord>>,
    sorted: Memo<SortKey, Vec<ModelRecord>>,
    grouped: Memo<GroupCacheKey, GroupedRecords>,
    tree: Memo<SortKey, TreeBuild>,
    metrics: Arc<AppMetrics>,
}

impl Default for ViewEngine {
    fn default() -> Self {
        Self::new(Arc::new(AppMetrics::default()))
    }
}

impl ViewEngine {
    pub fn new(metrics: Arc<AppMetrics>) -> Self {
        Self {
            filtered: Memo::new(),
            sorted: Memo::new(),
            grouped: Memo::new(),
            tree: Memo::new(),
            metrics,
        }
    }

    /// 过滤后的记录
    pub fn filtered(&self, records: &Arc<[ModelRecord]>, spec: &FilterSpec) -> Arc<Vec<ModelRecord>> {
        let key = (RecordsKey(Arc::clone(records)), spec.clone());
        let (value, hit) = self
            .filtered
            .get_or_compute(&key, || filter_records(records, spec));
        self.metrics.record_view(hit);
        if !hit {
            debug!("Filter stage recomputed: {} -> {}", records.len(), value.len());
        }
        value
    }

    /// 过滤并排序后的记录
    pub fn sorted(
        &self,
        records: &Arc<[ModelRecord]>,
        spec: &FilterSpec,
        order: SortOrder,
    ) -> Arc<Vec<ModelRecord>> {
        let key = (RecordsKey(Arc::clone(records)), spec.clone(), order);
        let (value, hit) = self.sorted.get_or_compute(&key, || {
            let filtered = self.filtered(records, spec);
            sort_records(&filtered, order)
        });
        self.metrics.record_view(hit);
        if !hit {
            debug!("Sort stage recomputed: {} records by {}", value.len(), order);
        }
        value
    }

    /// 分组后的记录
    pub fn grouped(
        &self,
        records: &Arc<[ModelRecord]>,
        spec: &FilterSpec,
        order: SortOrder,
        key: GroupKey,
    ) -> Arc<GroupedRecords> {
        let cache_key = (RecordsKey(Arc::clone(records)), spec.clone(), order, key);
        let (value, hit) = self.grouped.get_or_compute(&cache_key, || {
            let sorted = self.sorted(records, spec, order);
            group_records(&sorted, key)
        });
        self.metrics.record_view(hit);
        if !hit {
            debug!("Group stage recomputed: {} buckets by {}", value.len(), key);
        }
        value
    }

    /// 层级树
    pub fn tree(
        &self,
        records: &Arc<[ModelRecord]>,
        spec: &FilterSpec,
        order: SortOrder,
    ) -> Arc<TreeBuild> {
        let key = (RecordsKey(Arc::clone(records)), spec.clone(), order);
        let (value, hit) = self.tree.get_or_compute(&key, || {
            let sorted = self.sorted(records, spec, order);
            build_tree_with_report(&sorted)
        });
        self.metrics.record_view(hit);
        if !hit {
            debug!(
                "Tree stage recomputed: {} companies, {} dropped",
                value.nodes.len(),
                value.dropped.len()
            );
            self.metrics.record_tree_dropped(value.dropped.len());
        }
        value
    }

    /// 按视图模式分发
    pub fn render(&self, records: &Arc<[ModelRecord]>, request: &ViewRequest) -> ViewOutput {
        match request.mode {
            ViewMode::List => ViewOutput::List(self.sorted(records, &request.filter, request.sort)),
            ViewMode::Grouped => ViewOutput::Grouped(self.grouped(
                records,
                &request.filter,
                request.sort,
                request.group_by,
            )),
            ViewMode::Tree => ViewOutput::Tree(self.tree(records, &request.filter, request.sort)),
        }
    }

    /// 清空所有缓存
    pub fn invalidate(&self) {
        self.filtered.invalidate();
        self.sorted.invalidate();
        self.grouped.invalidate();
        self.tree.invalidate();
    }
}
