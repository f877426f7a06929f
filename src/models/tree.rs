//! 层级树数据模型
//!
//! 公司 → 许可状态 → 根模型 → 子模型 四层结构。

use serde::{Deserialize, Serialize};

use crate::models::model_record::{LicenseStatus, ModelRecord};

/// 树节点类型，只有模型节点携带记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum TreeNodeKind {
    /// 公司节点
    Company,
    /// 许可状态节点
    Status(LicenseStatus),
    /// 根模型节点
    RootModel(ModelRecord),
    /// 子模型节点
    ChildModel(ModelRecord),
}

/// 树节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// 组合 ID
    pub id: String,
    /// 展示名称
    pub name: String,
    /// 节点类型
    #[serde(flatten)]
    pub kind: TreeNodeKind,
    /// 直接子节点数量
    pub count: usize,
    /// 子节点，没有子节点时为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// 创建节点，count 由 children 推出
    pub fn new(id: String, name: String, kind: TreeNodeKind, children: Vec<TreeNode>) -> Self {
        let count = children.len();
        Self {
            id,
            name,
            kind,
            count,
            children: if children.is_empty() {
                None
            } else {
                Some(children)
            },
        }
    }

    /// 挂载的模型记录
    pub fn attached_record(&self) -> Option<&ModelRecord> {
        match &self.kind {
            TreeNodeKind::RootModel(record) | TreeNodeKind::ChildModel(record) => Some(record),
            TreeNodeKind::Company | TreeNodeKind::Status(_) => None,
        }
    }

    /// 子节点切片
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.count == 0
    }

    /// 当前节点及所有后代中的模型记录数量
    pub fn model_count(&self) -> usize {
        let own = usize::from(self.attached_record().is_some());
        own + self.children().iter().map(TreeNode::model_count).sum::<usize>()
    }
}
