//! 自由度枚举
//!
//! 对刚体树做前序深度优先遍历（跳过根节点，子节点按插入顺序访问），
//! 得到的节点顺序即为全系统统一使用的自由度索引 `0..N`。
//!
//! 枚举同时检查两个构造期前置条件：
//! - 每个被枚举节点恰好带一个 1-DOF 关节
//! - 全树（含根节点）节点 ID 唯一

use std::collections::HashMap;

use tracing::debug;

use crate::error::TreeError;
use crate::tree::{NodeIndex, RigidBodyTree};

/// 枚举结果：自由度索引 ↔ 节点索引 双向映射，以及名称索引
#[derive(Debug, Clone)]
pub struct Enumeration {
    nodes: Vec<NodeIndex>,
    /// 每个自由度的父自由度（父节点为根时为 `None`）
    parents: Vec<Option<usize>>,
    ids: Vec<i32>,
    dof_of_node: HashMap<NodeIndex, usize>,
    by_link: HashMap<String, NodeIndex>,
    by_joint: HashMap<String, NodeIndex>,
}

impl Enumeration {
    /// 枚举一棵树
    ///
    /// # 错误
    /// - `TreeError::UnsupportedJoint`：节点关节不是 1-DOF 关节
    /// - `TreeError::DuplicateId`：节点 ID 重复
    pub fn new(tree: &RigidBodyTree) -> Result<Self, TreeError> {
        let mut nodes = Vec::with_capacity(tree.len().saturating_sub(1));
        let mut stack: Vec<NodeIndex> = tree.children(tree.root()).iter().rev().copied().collect();

        while let Some(index) = stack.pop() {
            nodes.push(index);
            stack.extend(tree.children(index).iter().rev().copied());
        }

        let mut seen_ids: HashMap<i32, NodeIndex> = HashMap::with_capacity(tree.len());
        for (index, node) in tree.iter() {
            if seen_ids.insert(node.id, index).is_some() {
                return Err(TreeError::DuplicateId(node.id));
            }
        }

        let mut parents = Vec::with_capacity(nodes.len());
        let mut ids = Vec::with_capacity(nodes.len());
        let mut dof_of_node = HashMap::with_capacity(nodes.len());
        let mut by_link = HashMap::new();
        let mut by_joint = HashMap::new();

        for (dof, &index) in nodes.iter().enumerate() {
            // 遍历结果来自树本身，节点一定存在
            let Some(node) = tree.node(index) else {
                return Err(TreeError::InvalidParent(index));
            };

            if node.joint.dof() != 1 {
                return Err(TreeError::UnsupportedJoint {
                    node: index,
                    kind: node.joint.name(),
                });
            }

            // 前序遍历保证父节点先于子节点编号
            parents.push(node.parent().and_then(|p| dof_of_node.get(&p).copied()));
            ids.push(node.id);
            dof_of_node.insert(index, dof);
            if !node.link_name.is_empty() {
                by_link.insert(node.link_name.clone(), index);
            }
            if !node.joint_name.is_empty() {
                by_joint.insert(node.joint_name.clone(), index);
            }
        }

        debug!("enumerated {} degrees of freedom", nodes.len());

        Ok(Self {
            nodes,
            parents,
            ids,
            dof_of_node,
            by_link,
            by_joint,
        })
    }

    /// 自由度数量 N
    pub fn ndof(&self) -> usize {
        self.nodes.len()
    }

    /// 按自由度顺序排列的节点
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// 第 `dof` 个自由度对应的节点
    pub fn node_at(&self, dof: usize) -> Option<NodeIndex> {
        self.nodes.get(dof).copied()
    }

    /// 节点对应的自由度索引（根节点为 `None`）
    pub fn dof_of(&self, node: NodeIndex) -> Option<usize> {
        self.dof_of_node.get(&node).copied()
    }

    pub fn find_by_link_name(&self, name: &str) -> Option<NodeIndex> {
        self.by_link.get(name).copied()
    }

    pub fn find_by_joint_name(&self, name: &str) -> Option<NodeIndex> {
        self.by_joint.get(name).copied()
    }

    /// 按用户 ID 线性查找（O(N)）
    #[deprecated(since = "0.0.3", note = "Use `node_at()` with a DOF index or a name lookup instead")]
    pub fn find_by_id(&self, id: i32) -> Option<NodeIndex> {
        self.ids
            .iter()
            .position(|&candidate| candidate == id)
            .map(|dof| self.nodes[dof])
    }

    /// 第 `dof` 个自由度的父自由度（父节点为根或越界时为 `None`）
    pub fn parent_dof(&self, dof: usize) -> Option<usize> {
        self.parents.get(dof).copied().flatten()
    }

    /// 另一棵树是否与本枚举拓扑一致（同样的节点顺序和同样的父子关系）
    pub fn matches(&self, other: &Enumeration) -> bool {
        self.nodes == other.nodes && self.parents == other.parents
    }
}
