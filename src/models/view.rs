//! 视图参数模型
//!
//! 过滤条件、排序方式、分组键和视图模式。它们都是显式传入引擎的配置值，
//! 并且可以做结构相等比较，用作记忆化缓存的键。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::model_record::LicenseStatus;

/// 过滤条件
///
/// 字段内为 OR，字段间为 AND；所有字段为空时不做任何过滤。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// 搜索关键字（不区分大小写的子串匹配）
    pub search_query: String,
    /// 公司集合
    pub companies: BTreeSet<String>,
    /// 标签集合
    pub tags: BTreeSet<String>,
    /// 许可状态集合
    pub license_statuses: BTreeSet<LicenseStatus>,
    /// 上下文窗口下界（含）
    pub min_context_window: Option<i64>,
    /// 上下文窗口上界（含）
    pub max_context_window: Option<i64>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否为空条件
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.companies.is_empty()
            && self.tags.is_empty()
            && self.license_statuses.is_empty()
            && self.min_context_window.is_none()
            && self.max_context_window.is_none()
    }

    pub fn with_search(mut self, query: &str) -> Self {
        self.search_query = query.to_string();
        self
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.companies.insert(company.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag.to_string());
        self
    }

    pub fn with_license_status(mut self, status: LicenseStatus) -> Self {
        self.license_statuses.insert(status);
        self
    }

    pub fn with_context_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_context_window = min;
        self.max_context_window = max;
        self
    }
}

/// 排序方式，共六种全序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "releaseDate-asc")]
    ReleaseDateAsc,
    #[default]
    #[serde(rename = "releaseDate-desc")]
    ReleaseDateDesc,
    #[serde(rename = "contextWindow-asc")]
    ContextWindowAsc,
    #[serde(rename = "contextWindow-desc")]
    ContextWindowDesc,
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 6] = [
        SortOrder::ReleaseDateAsc,
        SortOrder::ReleaseDateDesc,
        SortOrder::ContextWindowAsc,
        SortOrder::ContextWindowDesc,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
    ];

    /// 线上格式
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::ReleaseDateAsc => "releaseDate-asc",
            SortOrder::ReleaseDateDesc => "releaseDate-desc",
            SortOrder::ContextWindowAsc => "contextWindow-asc",
            SortOrder::ContextWindowDesc => "contextWindow-desc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
        }
    }

    /// 是否降序
    pub fn is_descending(&self) -> bool {
        matches!(
            self,
            SortOrder::ReleaseDateDesc | SortOrder::ContextWindowDesc | SortOrder::NameDesc
        )
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .iter()
            .copied()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort order: {}", s))
    }
}

/// 分组键
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKey {
    /// 不分组，所有记录在一个桶里
    #[default]
    #[serde(rename = "none")]
    None,
    /// 按公司分组
    #[serde(rename = "company")]
    Company,
    /// 按许可状态分组
    #[serde(rename = "licenseStatus")]
    LicenseStatus,
    /// 按标签分组（一条记录可以出现在多个桶中）
    #[serde(rename = "tag")]
    Tag,
}

impl GroupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::None => "none",
            GroupKey::Company => "company",
            GroupKey::LicenseStatus => "licenseStatus",
            GroupKey::Tag => "tag",
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GroupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(GroupKey::None),
            "company" => Ok(GroupKey::Company),
            "licensestatus" | "license_status" | "status" => Ok(GroupKey::LicenseStatus),
            "tag" | "tags" => Ok(GroupKey::Tag),
            other => Err(format!("unknown group key: {}", other)),
        }
    }
}

/// 视图模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// 平铺列表
    #[default]
    List,
    /// 分组列表
    Grouped,
    /// 层级树
    Tree,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::List => write!(f, "list"),
            ViewMode::Grouped => write!(f, "grouped"),
            ViewMode::Tree => write!(f, "tree"),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(ViewMode::List),
            "grouped" | "group" => Ok(ViewMode::Grouped),
            "tree" => Ok(ViewMode::Tree),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

/// 一次完整的视图请求
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewRequest {
    pub filter: FilterSpec,
    pub sort: SortOrder,
    pub group_by: GroupKey,
    pub mode: ViewMode,
}
