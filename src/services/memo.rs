//! 单槽记忆化缓存
//!
//! 每个视图阶段只保留最近一次的（输入, 输出）。输入按结构相等比较，
//! 命中时返回同一个 `Arc`，未命中时完整重算并替换槽位。

use parking_lot::Mutex;
use std::sync::Arc;

use crate::models::model_record::ModelRecord;

/// 记录集合作为缓存键
///
/// 指针相同时直接判等，否则逐条比较。
#[derive(Debug, Clone)]
pub struct RecordsKey(pub Arc<[ModelRecord]>);

impl PartialEq for RecordsKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0[..] == other.0[..]
    }
}

impl Eq for RecordsKey {}

impl From<Arc<[ModelRecord]>> for RecordsKey {
    fn from(records: Arc<[ModelRecord]>) -> Self {
        Self(records)
    }
}

/// 单槽缓存
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Mutex<Option<(K, Arc<V>)>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 命中则返回缓存值，否则计算并写入
    ///
    /// 返回值的第二项表示是否命中。计算期间不持有锁。
    pub fn get_or_compute<F>(&self, key: &K, compute: F) -> (Arc<V>, bool)
    where
        F: FnOnce() -> V,
    {
        if let Some((cached_key, value)) = self.slot.lock().as_ref() {
            if cached_key == key {
                return (Arc::clone(value), true);
            }
        }

        let value = Arc::new(compute());
        *self.slot.lock() = Some((key.clone(), Arc::clone(&value)));
        (value, false)
    }

    /// 清空槽位
    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }
}
