//! 目录分面统计
//!
//! 过滤界面需要的可选项：公司、标签、许可状态及各自的记录数，
//! 以及上下文窗口的取值范围。

use feruca::Collator;
use indexmap::IndexMap;
use serde::Serialize;

use crate::models::model_record::{LicenseStatus, ModelRecord};
use crate::services::sort::collate_names;

/// 单个分面取值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// 数值范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextRange {
    pub min: u64,
    pub max: u64,
}

/// 目录分面
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFacets {
    /// 公司，按名称排序
    pub companies: Vec<FacetCount>,
    /// 标签，按名称排序
    pub tags: Vec<FacetCount>,
    /// 许可状态，Open 在前
    pub license_statuses: Vec<FacetCount>,
    /// 上下文窗口范围，空目录时为 None
    pub context_window: Option<ContextRange>,
}

fn sorted_counts(counts: IndexMap<String, usize>) -> Vec<FacetCount> {
    let mut facets: Vec<FacetCount> = counts
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect();
    let mut collator = Collator::default();
    facets.sort_by(|a, b| collate_names(&mut collator, &a.value, &b.value));
    facets
}

/// 计算分面
pub fn compute_facets(records: &[ModelRecord]) -> CatalogFacets {
    let mut companies: IndexMap<String, usize> = IndexMap::new();
    let mut tags: IndexMap<String, usize> = IndexMap::new();
    let mut statuses: IndexMap<LicenseStatus, usize> = IndexMap::new();

    for record in records {
        *companies.entry(record.company.clone()).or_default() += 1;
        *statuses.entry(record.license_status).or_default() += 1;

        let mut seen: Vec<&str> = Vec::with_capacity(record.tags.len());
        for tag in &record.tags {
            if seen.contains(&tag.as_str()) {
                continue;
            }
            seen.push(tag);
            *tags.entry(tag.clone()).or_default() += 1;
        }
    }

    statuses.sort_keys();
    let license_statuses = statuses
        .into_iter()
        .map(|(status, count)| FacetCount {
            value: status.label().to_string(),
            count,
        })
        .collect();

    let context_window = records
        .iter()
        .map(|r| r.context_window)
        .fold(None, |range: Option<ContextRange>, value| match range {
            None => Some(ContextRange { min: value, max: value }),
            Some(r) => Some(ContextRange {
                min: r.min.min(value),
                max: r.max.max(value),
            }),
        });

    CatalogFacets {
        companies: sorted_counts(companies),
        tags: sorted_counts(tags),
        license_statuses,
        context_window,
    }
}
