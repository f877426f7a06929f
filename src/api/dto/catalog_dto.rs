//! 目录 DTO
//!
//! 定义目录视图相关的查询参数和响应数据结构。

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::model_record::{LicenseStatus, ModelRecord};
use crate::models::tree::TreeNode;
use crate::models::view::{FilterSpec, GroupKey, SortOrder, ViewMode, ViewRequest};
use crate::services::group::GroupedRecords;

/// 目录查询参数
///
/// 多值字段用逗号分隔，例如 `companies=Acme,Zeta`。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogQueryParams {
    /// 搜索关键字
    pub q: Option<String>,
    /// 公司列表
    pub companies: Option<String>,
    /// 标签列表
    pub tags: Option<String>,
    /// 许可状态列表
    pub statuses: Option<String>,
    /// 上下文窗口下界
    pub min_context: Option<i64>,
    /// 上下文窗口上界
    pub max_context: Option<i64>,
    /// 排序方式
    pub sort: Option<String>,
    /// 分组键
    pub group_by: Option<String>,
    /// 视图模式
    pub mode: Option<String>,
}

fn split_list(raw: &Option<String>) -> impl Iterator<Item = String> + '_ {
    raw.iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

impl CatalogQueryParams {
    /// 构造过滤条件
    pub fn filter_spec(&self) -> Result<FilterSpec> {
        let license_statuses = split_list(&self.statuses)
            .map(|s| s.parse::<LicenseStatus>().map_err(AppError::Validation))
            .collect::<Result<_>>()?;

        Ok(FilterSpec {
            search_query: self.q.clone().unwrap_or_default(),
            companies: split_list(&self.companies).collect(),
            tags: split_list(&self.tags).collect(),
            license_statuses,
            min_context_window: self.min_context,
            max_context_window: self.max_context,
        })
    }

    /// 排序方式，缺省时使用默认值
    pub fn sort_order(&self, default: SortOrder) -> Result<SortOrder> {
        match self.sort.as_deref() {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse().map_err(AppError::Validation),
        }
    }

    /// 分组键，缺省时使用默认值
    pub fn group_key(&self, default: GroupKey) -> Result<GroupKey> {
        match self.group_by.as_deref() {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(AppError::Validation),
        }
    }

    /// 视图模式，缺省时使用默认值
    pub fn view_mode(&self, default: ViewMode) -> Result<ViewMode> {
        match self.mode.as_deref() {
            None | Some("") => Ok(default),
            Some(raw) => raw.parse().map_err(AppError::Validation),
        }
    }

    /// 构造完整视图请求
    pub fn view_request(
        &self,
        default_sort: SortOrder,
        default_group: GroupKey,
        default_mode: ViewMode,
    ) -> Result<ViewRequest> {
        Ok(ViewRequest {
            filter: self.filter_spec()?,
            sort: self.sort_order(default_sort)?,
            group_by: self.group_key(default_group)?,
            mode: self.view_mode(default_mode)?,
        })
    }
}

/// 模型列表响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelListResponse {
    /// 模型列表
    pub models: Vec<ModelRecord>,
    /// 匹配数量
    pub matched: usize,
    /// 目录总数
    pub total: usize,
    /// 排序方式
    pub sort: SortOrder,
    /// 耗时（毫秒）
    pub took_ms: u64,
}

/// 单个分组
#[derive(Debug, Serialize)]
pub struct GroupDto {
    /// 分组标签
    pub label: String,
    /// 组内数量
    pub count: usize,
    /// 组内模型
    pub models: Vec<ModelRecord>,
}

/// 分组响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedResponse {
    /// 分组键
    pub group_by: GroupKey,
    /// 排序方式
    pub sort: SortOrder,
    /// 分组列表，保持首次出现顺序
    pub groups: Vec<GroupDto>,
    /// 匹配的记录数
    pub matched: usize,
    /// 各组数量之和（按标签分组时可能大于 matched）
    pub memberships: usize,
}

impl GroupedResponse {
    pub fn from_groups(
        groups: &GroupedRecords,
        group_by: GroupKey,
        sort: SortOrder,
        matched: usize,
    ) -> Self {
        let groups: Vec<GroupDto> = groups
            .iter()
            .map(|(label, models)| GroupDto {
                label: label.clone(),
                count: models.len(),
                models: models.clone(),
            })
            .collect();
        let memberships = groups.iter().map(|g| g.count).sum();
        Self {
            group_by,
            sort,
            groups,
            matched,
            memberships,
        }
    }
}

/// 层级树响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeResponse {
    /// 公司节点
    pub nodes: Vec<TreeNode>,
    /// 被丢弃的候选记录
    pub dropped: Vec<String>,
    /// 匹配的记录数
    pub matched: usize,
}

/// 模型详情响应
#[derive(Debug, Serialize)]
pub struct ModelDetailResponse {
    /// 模型记录
    pub model: ModelRecord,
    /// 子模型名称
    pub children: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_spec_from_params() {
        let params = CatalogQueryParams {
            q: Some("chat".to_string()),
            companies: Some("Acme, Zeta,,".to_string()),
            statuses: Some("open".to_string()),
            min_context: Some(32),
            ..Default::default()
        };
        let spec = params.filter_spec().unwrap();

        assert_eq!(spec.search_query, "chat");
        assert_eq!(spec.companies.len(), 2);
        assert!(spec.companies.contains("Zeta"));
        assert!(spec.license_statuses.contains(&LicenseStatus::Open));
        assert_eq!(spec.min_context_window, Some(32));
        assert!(spec.tags.is_empty());
    }

    #[test]
    fn test_invalid_status_is_validation_error() {
        let params = CatalogQueryParams {
            statuses: Some("open,proprietary".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.filter_spec(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_defaults_apply_when_missing() {
        let params = CatalogQueryParams::default();
        let request = params
            .view_request(SortOrder::NameAsc, GroupKey::Tag, ViewMode::Grouped)
            .unwrap();
        assert!(request.filter.is_empty());
        assert_eq!(request.sort, SortOrder::NameAsc);
        assert_eq!(request.group_by, GroupKey::Tag);
        assert_eq!(request.mode, ViewMode::Grouped);
    }

    #[test]
    fn test_invalid_sort_is_validation_error() {
        let params = CatalogQueryParams {
            sort: Some("size-desc".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.sort_order(SortOrder::default()),
            Err(AppError::Validation(_))
        ));
    }
}
