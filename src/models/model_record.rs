//! 模型记录数据模型
//!
//! 目录中的核心实体：一条 AI 模型描述记录。记录在会话开始时加载一次，
//! 之后只读，所有视图都从它派生。

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// 许可状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LicenseStatus {
    /// 开源模型
    #[serde(rename = "Open", alias = "open")]
    Open,

    /// 闭源模型
    #[serde(rename = "Closed", alias = "closed")]
    Closed,
}

impl LicenseStatus {
    /// 展示用标签
    pub fn label(&self) -> &'static str {
        match self {
            LicenseStatus::Open => "Open",
            LicenseStatus::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LicenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(LicenseStatus::Open),
            "closed" => Ok(LicenseStatus::Closed),
            other => Err(format!("unknown license status: {}", other)),
        }
    }
}

/// 相关链接
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelatedLink {
    /// 链接标题
    pub title: String,
    /// 链接地址
    pub url: String,
}

/// 模型记录
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    /// 模型名称（集合内唯一）
    pub name: String,

    /// 发布机构
    pub company: String,

    /// 国家/地区，仅用于展示
    #[serde(default)]
    pub country: String,

    /// 许可状态
    pub license_status: LicenseStatus,

    /// 发布日期（ISO 格式字符串）
    #[serde(default)]
    pub release_date: String,

    /// 描述
    #[serde(default)]
    pub description: String,

    /// 标签，保持数据源中的顺序
    #[serde(default)]
    pub tags: Vec<String>,

    /// 上下文窗口（千 token）
    #[serde(default)]
    pub context_window: u64,

    /// 最大输出长度（千 token）
    #[serde(default)]
    pub max_output_length: Option<u64>,

    /// 相关链接
    #[serde(default)]
    pub related_links: Vec<RelatedLink>,

    /// 父模型名称
    #[serde(default, deserialize_with = "deserialize_parent")]
    pub parent: Option<String>,
}

/// 空字符串的 parent 视为未设置
fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|p| !p.trim().is_empty()))
}

impl ModelRecord {
    /// 创建新记录，其余字段为空
    pub fn new(name: &str, company: &str, license_status: LicenseStatus) -> Self {
        Self {
            name: name.to_string(),
            company: company.to_string(),
            country: String::new(),
            license_status,
            release_date: String::new(),
            description: String::new(),
            tags: Vec::new(),
            context_window: 0,
            max_output_length: None,
            related_links: Vec::new(),
            parent: None,
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_context_window(mut self, context_window: u64) -> Self {
        self.context_window = context_window;
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_release_date(mut self, release_date: &str) -> Self {
        self.release_date = release_date.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// 是否为根模型（没有 parent）
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// 是否带有指定标签
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// 解析发布日期
    ///
    /// 支持 `YYYY-MM-DD`、RFC 3339、`YYYY-MM-DDTHH:MM:SS`、`YYYY-MM` 和 `YYYY`。
    /// 无法解析时返回 `None`。
    pub fn parsed_release_date(&self) -> Option<NaiveDate> {
        let raw = self.release_date.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt.date());
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
            return Some(date);
        }
        if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
            return raw
                .parse::<i32>()
                .ok()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
        }
        None
    }

    /// 最大输出长度，0 视为未提供
    pub fn effective_max_output(&self) -> Option<u64> {
        self.max_output_length.filter(|len| *len > 0)
    }
}
