//! 过滤引擎
//!
//! 把记录数组缩减为满足过滤条件的子集，保持原有顺序。
//! 本阶段不产生错误：异常的条件值（比如负数边界）按字面比较得到空集或全集。

use crate::models::model_record::ModelRecord;
use crate::models::view::FilterSpec;

impl FilterSpec {
    /// 判断单条记录是否满足条件
    pub fn matches(&self, record: &ModelRecord) -> bool {
        self.matches_query(record)
            && self.matches_company(record)
            && self.matches_tags(record)
            && self.matches_license(record)
            && self.matches_context_window(record)
    }

    fn matches_query(&self, record: &ModelRecord) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let needle = self.search_query.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&needle);

        hit(&record.name)
            || hit(&record.company)
            || hit(&record.description)
            || record.tags.iter().any(|tag| hit(tag))
    }

    fn matches_company(&self, record: &ModelRecord) -> bool {
        self.companies.is_empty() || self.companies.contains(&record.company)
    }

    fn matches_tags(&self, record: &ModelRecord) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| record.has_tag(tag))
    }

    fn matches_license(&self, record: &ModelRecord) -> bool {
        self.license_statuses.is_empty() || self.license_statuses.contains(&record.license_status)
    }

    fn matches_context_window(&self, record: &ModelRecord) -> bool {
        let value = i64::try_from(record.context_window).unwrap_or(i64::MAX);
        self.min_context_window.is_none_or(|min| value >= min)
            && self.max_context_window.is_none_or(|max| value <= max)
    }
}

/// 过滤记录
pub fn filter_records(records: &[ModelRecord], spec: &FilterSpec) -> Vec<ModelRecord> {
    if spec.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}
