//! 分组引擎
//!
//! 把已排序的记录划分到命名桶中。桶按扫描输入时首次出现的顺序排列，
//! 桶内顺序沿用输入顺序，本阶段不会重新排序。
//!
//! 按标签分组时一条记录会进入它的每一个标签桶，桶大小之和可以超过记录数。

use indexmap::IndexMap;

use crate::models::model_record::ModelRecord;
use crate::models::view::GroupKey;

/// 不分组时唯一桶的标签
pub const ALL_MODELS_LABEL: &str = "All Models";

/// 有序分组结果
pub type GroupedRecords = IndexMap<String, Vec<ModelRecord>>;

/// 分组记录
pub fn group_records(records: &[ModelRecord], key: GroupKey) -> GroupedRecords {
    let mut groups = GroupedRecords::new();
    if records.is_empty() {
        return groups;
    }

    match key {
        GroupKey::None => {
            groups.insert(ALL_MODELS_LABEL.to_string(), records.to_vec());
        }
        GroupKey::Company => {
            for record in records {
                push(&mut groups, &record.company, record);
            }
        }
        GroupKey::LicenseStatus => {
            for record in records {
                push(&mut groups, record.license_status.label(), record);
            }
        }
        GroupKey::Tag => {
            for record in records {
                for (index, tag) in record.tags.iter().enumerate() {
                    // 同一记录内重复的标签只计一次
                    if record.tags[..index].contains(tag) {
                        continue;
                    }
                    push(&mut groups, tag, record);
                }
            }
        }
    }

    groups
}

fn push(groups: &mut GroupedRecords, label: &str, record: &ModelRecord) {
    match groups.get_mut(label) {
        Some(bucket) => bucket.push(record.clone()),
        None => {
            groups.insert(label.to_string(), vec![record.clone()]);
        }
    }
}

/// 所有桶的记录总数（按标签分组时可能大于记录数）
pub fn total_memberships(groups: &GroupedRecords) -> usize {
    groups.values().map(Vec::len).sum()
}
