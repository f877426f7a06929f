//! 层级树构建
//!
//! 四层嵌套分组：公司 → 许可状态 → 根模型 → 子模型。
//!
//! 子模型只会挂到同一个（公司, 许可状态）桶内的根模型下。parent 位于其他公司或
//! 其他许可状态、或者根本不存在的候选记录不会出现在树中，既不是根也不是子节点。
//! 这些记录会记在 [`TreeBuild::dropped`] 里，而不是作为错误抛出。

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::models::model_record::{LicenseStatus, ModelRecord};
use crate::models::tree::{TreeNode, TreeNodeKind};

/// 建树结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeBuild {
    /// 公司节点列表，按公司名字典序
    pub nodes: Vec<TreeNode>,
    /// 未能挂载的候选记录名称，按树的遍历顺序
    pub dropped: Vec<String>,
}

/// 构建层级树
pub fn build_tree(records: &[ModelRecord]) -> Vec<TreeNode> {
    build_tree_with_report(records).nodes
}

/// 构建层级树，并报告被丢弃的候选记录
pub fn build_tree_with_report(records: &[ModelRecord]) -> TreeBuild {
    let mut by_company: IndexMap<&str, Vec<&ModelRecord>> = IndexMap::new();
    for record in records {
        by_company
            .entry(record.company.as_str())
            .or_default()
            .push(record);
    }
    // 唯一会重新排序的阶段
    by_company.sort_keys();

    let mut dropped = Vec::new();
    let nodes = by_company
        .into_iter()
        .map(|(company, members)| company_node(company, &members, &mut dropped))
        .collect();

    TreeBuild { nodes, dropped }
}

fn company_node(company: &str, members: &[&ModelRecord], dropped: &mut Vec<String>) -> TreeNode {
    let mut by_status: IndexMap<LicenseStatus, Vec<&ModelRecord>> = IndexMap::new();
    for record in members.iter().copied() {
        by_status
            .entry(record.license_status)
            .or_default()
            .push(record);
    }

    let children = by_status
        .into_iter()
        .map(|(status, bucket)| status_node(company, status, &bucket, dropped))
        .collect();

    TreeNode::new(
        company.to_string(),
        company.to_string(),
        TreeNodeKind::Company,
        children,
    )
}

fn status_node(
    company: &str,
    status: LicenseStatus,
    bucket: &[&ModelRecord],
    dropped: &mut Vec<String>,
) -> TreeNode {
    let status_id = format!("{}/{}", company, status);
    let (roots, candidates): (Vec<&ModelRecord>, Vec<&ModelRecord>) =
        bucket.iter().copied().partition(|record| record.is_root());

    let mut attached = vec![false; candidates.len()];
    let root_nodes = roots
        .iter()
        .map(|root| {
            let root_id = format!("{}/{}", status_id, root.name);
            let children = candidates
                .iter()
                .enumerate()
                .filter(|(_, child)| child.parent.as_deref() == Some(root.name.as_str()))
                .map(|(index, child)| {
                    attached[index] = true;
                    TreeNode::new(
                        format!("{}/{}", root_id, child.name),
                        child.name.clone(),
                        TreeNodeKind::ChildModel((*child).clone()),
                        Vec::new(),
                    )
                })
                .collect();

            TreeNode::new(
                root_id,
                root.name.clone(),
                TreeNodeKind::RootModel((*root).clone()),
                children,
            )
        })
        .collect();

    for (candidate, _) in candidates
        .iter()
        .zip(attached.iter())
        .filter(|(_, attached)| !**attached)
    {
        debug!(
            "Dropping '{}' from tree: parent '{}' has no root in {}",
            candidate.name,
            candidate.parent.as_deref().unwrap_or_default(),
            status_id
        );
        dropped.push(candidate.name.clone());
    }

    TreeNode::new(
        status_id,
        status.label().to_string(),
        TreeNodeKind::Status(status),
        root_nodes,
    )
}
