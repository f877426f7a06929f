//! 目录服务
//!
//! 把会话内的记录存储绑定到视图引擎上，向 API 层提供过滤、排序、分组、
//! 建树和分面查询。所有方法都是同步的纯计算。

use std::sync::Arc;

use crate::config::config::ViewsConfig;
use crate::models::model_record::ModelRecord;
use crate::models::view::{FilterSpec, GroupKey, SortOrder, ViewRequest};
use crate::observability::AppMetrics;
use crate::services::catalog_view::{ViewEngine, ViewOutput};
use crate::services::facets::{CatalogFacets, compute_facets};
use crate::services::group::GroupedRecords;
use crate::services::memo::{Memo, RecordsKey};
use crate::services::tree_builder::TreeBuild;
use crate::storage::store::RecordStore;

/// 目录服务 trait
pub trait CatalogService: Send + Sync {
    /// 记录总数
    fn total(&self) -> usize;

    /// 过滤后的记录
    fn filtered(&self, spec: &FilterSpec) -> Arc<Vec<ModelRecord>>;

    /// 过滤并排序后的记录
    fn sorted(&self, spec: &FilterSpec, order: SortOrder) -> Arc<Vec<ModelRecord>>;

    /// 分组后的记录
    fn grouped(&self, spec: &FilterSpec, order: SortOrder, key: GroupKey) -> Arc<GroupedRecords>;

    /// 层级树
    fn tree(&self, spec: &FilterSpec, order: SortOrder) -> Arc<TreeBuild>;

    /// 按视图请求分发
    fn render(&self, request: &ViewRequest) -> ViewOutput;

    /// 全量目录的分面
    fn facets(&self) -> Arc<CatalogFacets>;

    /// 按名称查找
    fn find(&self, name: &str) -> Option<ModelRecord>;

    /// 声明 parent 为指定名称的记录名
    fn children_of(&self, name: &str) -> Vec<String>;

    /// 视图默认值
    fn defaults(&self) -> &ViewsConfig;
}

/// 目录服务实现
pub struct CatalogServiceImpl {
    store: RecordStore,
    engine: ViewEngine,
    facets: Memo<RecordsKey, CatalogFacets>,
    defaults: ViewsConfig,
}

impl CatalogServiceImpl {
    /// 创建新的服务实例
    pub fn new(store: RecordStore, metrics: Arc<AppMetrics>, defaults: ViewsConfig) -> Self {
        metrics.set_records_loaded(store.len());
        Self {
            store,
            engine: ViewEngine::new(metrics),
            facets: Memo::new(),
            defaults,
        }
    }
}

impl CatalogService for CatalogServiceImpl {
    fn total(&self) -> usize {
        self.store.len()
    }

    fn filtered(&self, spec: &FilterSpec) -> Arc<Vec<ModelRecord>> {
        self.engine.filtered(&self.store.records(), spec)
    }

    fn sorted(&self, spec: &FilterSpec, order: SortOrder) -> Arc<Vec<ModelRecord>> {
        self.engine.sorted(&self.store.records(), spec, order)
    }

    fn grouped(&self, spec: &FilterSpec, order: SortOrder, key: GroupKey) -> Arc<GroupedRecords> {
        self.engine.grouped(&self.store.records(), spec, order, key)
    }

    fn tree(&self, spec: &FilterSpec, order: SortOrder) -> Arc<TreeBuild> {
        self.engine.tree(&self.store.records(), spec, order)
    }

    fn render(&self, request: &ViewRequest) -> ViewOutput {
        self.engine.render(&self.store.records(), request)
    }

    fn facets(&self) -> Arc<CatalogFacets> {
        let records = self.store.records();
        let (facets, _) = self
            .facets
            .get_or_compute(&RecordsKey(Arc::clone(&records)), || compute_facets(&records));
        facets
    }

    fn find(&self, name: &str) -> Option<ModelRecord> {
        self.store.find(name).cloned()
    }

    fn children_of(&self, name: &str) -> Vec<String> {
        self.store
            .children_of(name)
            .into_iter()
            .map(|r| r.name.clone())
            .collect()
    }

    fn defaults(&self) -> &ViewsConfig {
        &self.defaults
    }
}

/// 创建目录服务
pub fn create_catalog_service(
    store: RecordStore,
    metrics: Arc<AppMetrics>,
    defaults: ViewsConfig,
) -> Box<dyn CatalogService> {
    Box::new(CatalogServiceImpl::new(store, metrics, defaults))
}
