//! 排序引擎
//!
//! 六种全序，全部为稳定排序：键相等的记录保持输入中的相对顺序，
//! 降序时也一样。分组和建树都依赖这一点。
//!
//! 名称按区域感知的排序规则比较，而不是按码点。

use std::cmp::Ordering;

use chrono::NaiveDate;
use feruca::Collator;

use crate::models::model_record::ModelRecord;
use crate::models::view::SortOrder;

/// 发布日期排序键
///
/// 能解析的日期按日历值比较；无法解析时退回原始字符串。
/// 两者统一成 `YYYY-MM-DD` 文本，保证全序。
fn release_key(record: &ModelRecord) -> String {
    record
        .parsed_release_date()
        .map(|date: NaiveDate| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| record.release_date.trim().to_string())
}

/// 名称比较
///
/// 按 Unicode 排序算法（CLDR 根区域）比较，重音字母和基本字母排在一起；
/// 排序规则认为相等时再按原文比较，保证全序。
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collate_names(&mut Collator::default(), a, b)
}

/// 复用同一个排序器比较名称，批量排序时避免重复构造
pub fn collate_names(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

fn compare_ascending(
    collator: &mut Collator,
    order: SortOrder,
    a: &ModelRecord,
    b: &ModelRecord,
) -> Ordering {
    match order {
        SortOrder::ReleaseDateAsc | SortOrder::ReleaseDateDesc => release_key(a).cmp(&release_key(b)),
        SortOrder::ContextWindowAsc | SortOrder::ContextWindowDesc => {
            a.context_window.cmp(&b.context_window)
        }
        SortOrder::NameAsc | SortOrder::NameDesc => collate_names(collator, &a.name, &b.name),
    }
}

/// 排序记录，返回输入的一个排列
pub fn sort_records(records: &[ModelRecord], order: SortOrder) -> Vec<ModelRecord> {
    let mut collator = Collator::default();
    let mut sorted = records.to_vec();
    if order.is_descending() {
        sorted.sort_by(|a, b| compare_ascending(&mut collator, order, b, a));
    } else {
        sorted.sort_by(|a, b| compare_ascending(&mut collator, order, a, b));
    }
    sorted
}
