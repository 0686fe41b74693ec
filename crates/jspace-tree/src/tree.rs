//! 刚体树（Arena 存储）
//!
//! 所有节点保存在一个 `Vec` 中，用稠密的 [`NodeIndex`] 寻址：
//! - 根节点固定为索引 0（无关节、无质量）
//! - 父子关系用索引表示，不存在裸指针
//! - 父节点总是先于子节点插入，因此 Arena 顺序即为拓扑序
//!
//! # 坐标约定
//!
//! 节点全局位姿：`X_i = X_parent · home_i · joint_i(q_i)`。
//! `home` 为节点相对父节点的安装位姿，关节运动在 `home` 之后作用，
//! 关节轴、质心与惯量均在节点自身坐标系中表达。

use std::fmt;

use nalgebra::{Isometry3, Matrix3, Translation3, Unit, UnitQuaternion, Vector3};
use tracing::{trace, warn};

use crate::error::TreeError;
use crate::joint::{JointKind, JointLimits};

/// 节点索引（Arena 下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    /// 根节点
    pub const ROOT: NodeIndex = NodeIndex(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 连杆惯性参数
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkInertia {
    /// 质量（kg）
    pub mass: f64,
    /// 质心位置（节点坐标系）
    pub com: Vector3<f64>,
    /// 绕质心的转动惯量（节点坐标系）
    pub rotational: Matrix3<f64>,
}

impl LinkInertia {
    pub fn new(mass: f64, com: Vector3<f64>, rotational: Matrix3<f64>) -> Self {
        Self {
            mass,
            com,
            rotational,
        }
    }

    /// 对角惯量 `diag(ixx, iyy, izz)`
    pub fn diagonal(mass: f64, com: Vector3<f64>, ixx: f64, iyy: f64, izz: f64) -> Self {
        Self::new(mass, com, Matrix3::from_diagonal(&Vector3::new(ixx, iyy, izz)))
    }

    /// 零惯性（根节点 / 虚拟连杆）
    pub fn zero() -> Self {
        Self::new(0.0, Vector3::zeros(), Matrix3::zeros())
    }
}

impl Default for LinkInertia {
    fn default() -> Self {
        Self::zero()
    }
}

/// 树节点
#[derive(Debug, Clone)]
pub struct Node {
    /// 用户 ID（根节点默认 -1）
    pub id: i32,
    pub link_name: String,
    pub joint_name: String,
    /// 相对父节点的安装位姿
    pub home: Isometry3<f64>,
    pub joint: JointKind,
    pub inertia: LinkInertia,
    pub limits: Option<JointLimits>,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl Node {
    /// 父节点（根节点为 `None`）
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// 子节点（按插入顺序）
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// 关节自由度
    pub fn dof(&self) -> usize {
        self.joint.dof()
    }
}

/// 节点构造参数（Builder）
///
/// ```
/// use jspace_tree::{Axis, JointKind, LinkInertia, NodeSpec};
/// use nalgebra::Vector3;
///
/// let spec = NodeSpec::new(0, JointKind::revolute(Axis::Z))
///     .link_name("upper_arm")
///     .translation(Vector3::new(0.0, 0.2435, 0.0))
///     .inertia(LinkInertia::diagonal(17.4, Vector3::zeros(), 0.13, 0.524, 5.249));
/// assert_eq!(spec.id, 0);
/// ```
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub id: i32,
    pub link_name: String,
    pub joint_name: String,
    pub home: Isometry3<f64>,
    pub joint: JointKind,
    pub inertia: LinkInertia,
    pub limits: Option<JointLimits>,
}

impl NodeSpec {
    pub fn new(id: i32, joint: JointKind) -> Self {
        Self {
            id,
            link_name: String::new(),
            joint_name: String::new(),
            home: Isometry3::identity(),
            joint,
            inertia: LinkInertia::zero(),
            limits: None,
        }
    }

    pub fn link_name(mut self, name: impl Into<String>) -> Self {
        self.link_name = name.into();
        self
    }

    pub fn joint_name(mut self, name: impl Into<String>) -> Self {
        self.joint_name = name.into();
        self
    }

    /// 安装位姿（完整刚体变换）
    pub fn home(mut self, home: Isometry3<f64>) -> Self {
        self.home = home;
        self
    }

    /// 只设置安装平移，保留已有旋转
    pub fn translation(mut self, t: Vector3<f64>) -> Self {
        self.home.translation = Translation3::from(t);
        self
    }

    /// 只设置安装旋转（轴角），保留已有平移
    ///
    /// 零长度轴不构成旋转，此时保留原有旋转并告警。
    pub fn rotation(mut self, axis: Vector3<f64>, angle: f64) -> Self {
        match Unit::try_new(axis, f64::EPSILON) {
            Some(axis) => self.home.rotation = UnitQuaternion::from_axis_angle(&axis, angle),
            None => warn!(
                "node {}: degenerate rotation axis ({}, {}, {}), rotation left unchanged",
                self.id, axis.x, axis.y, axis.z
            ),
        }
        self
    }

    pub fn inertia(mut self, inertia: LinkInertia) -> Self {
        self.inertia = inertia;
        self
    }

    pub fn limits(mut self, lower: f64, upper: f64) -> Self {
        self.limits = Some(JointLimits::new(lower, upper));
        self
    }
}

/// 刚体树
#[derive(Debug, Clone)]
pub struct RigidBodyTree {
    nodes: Vec<Node>,
}

impl RigidBodyTree {
    /// 创建只含根节点的树
    ///
    /// 根节点 ID 为 -1，固定关节，零惯性。
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Node {
            id: -1,
            link_name: root_name.into(),
            joint_name: String::new(),
            home: Isometry3::identity(),
            joint: JointKind::Fixed,
            inertia: LinkInertia::zero(),
            limits: None,
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: vec![root] }
    }

    /// 修改根节点 ID
    pub fn set_root_id(&mut self, id: i32) {
        self.nodes[0].id = id;
    }

    /// 添加节点
    ///
    /// # 错误
    /// 父节点索引越界时返回 `TreeError::InvalidParent`
    pub fn add_node(&mut self, parent: NodeIndex, spec: NodeSpec) -> Result<NodeIndex, TreeError> {
        if parent.0 >= self.nodes.len() {
            return Err(TreeError::InvalidParent(parent));
        }

        let index = NodeIndex(self.nodes.len());
        trace!(
            "add node {} (id {}, {} joint) under {}",
            index,
            spec.id,
            spec.joint.name(),
            parent
        );

        self.nodes.push(Node {
            id: spec.id,
            link_name: spec.link_name,
            joint_name: spec.joint_name,
            home: spec.home,
            joint: spec.joint,
            inertia: spec.inertia,
            limits: spec.limits,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(index);

        Ok(index)
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex::ROOT
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.0)
    }

    pub fn contains(&self, index: NodeIndex) -> bool {
        index.0 < self.nodes.len()
    }

    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.node(index).and_then(Node::parent)
    }

    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.node(index).map(Node::children).unwrap_or(&[])
    }

    /// 节点总数（含根节点）
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 树中总有根节点，因此永远非空
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 按 Arena 顺序（拓扑序）遍历
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    /// `from` 以下的连杆数（不含 `from` 本身）
    pub fn count_links(&self, from: NodeIndex) -> usize {
        self.children(from)
            .iter()
            .map(|&child| 1 + self.count_links(child))
            .sum()
    }

    /// `from` 及其子树中的关节数（固定关节不计）
    pub fn count_joints(&self, from: NodeIndex) -> usize {
        let own = match self.node(from) {
            Some(node) if !matches!(node.joint, JointKind::Fixed) => 1,
            _ => 0,
        };
        own + self
            .children(from)
            .iter()
            .map(|&child| self.count_joints(child))
            .sum::<usize>()
    }

    /// `from` 及其子树中的自由度总数
    pub fn count_dof(&self, from: NodeIndex) -> usize {
        let own = self.node(from).map(Node::dof).unwrap_or(0);
        own + self
            .children(from)
            .iter()
            .map(|&child| self.count_dof(child))
            .sum::<usize>()
    }

    /// `from` 及其子树的总质量
    pub fn total_mass(&self, from: NodeIndex) -> f64 {
        let own = self.node(from).map(|n| n.inertia.mass).unwrap_or(0.0);
        own + self
            .children(from)
            .iter()
            .map(|&child| self.total_mass(child))
            .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::Axis;

    fn two_branch_tree() -> RigidBodyTree {
        let mut tree = RigidBodyTree::new("base");
        let a = tree
            .add_node(
                NodeIndex::ROOT,
                NodeSpec::new(0, JointKind::revolute(Axis::Z))
                    .inertia(LinkInertia::diagonal(2.0, Vector3::zeros(), 1.0, 1.0, 1.0)),
            )
            .unwrap();
        tree.add_node(
            a,
            NodeSpec::new(1, JointKind::prismatic(Axis::X))
                .inertia(LinkInertia::diagonal(1.5, Vector3::zeros(), 1.0, 1.0, 1.0)),
        )
        .unwrap();
        tree.add_node(a, NodeSpec::new(2, JointKind::Fixed)).unwrap();
        tree
    }

    #[test]
    fn test_arena_links() {
        let tree = two_branch_tree();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.parent(NodeIndex(1)), Some(NodeIndex::ROOT));
        assert_eq!(tree.children(NodeIndex(1)), &[NodeIndex(2), NodeIndex(3)]);
        assert_eq!(tree.parent(NodeIndex::ROOT), None);
        assert!(tree.children(NodeIndex(42)).is_empty());
    }

    #[test]
    fn test_invalid_parent() {
        let mut tree = RigidBodyTree::new("base");
        let err = tree
            .add_node(NodeIndex(5), NodeSpec::new(0, JointKind::Fixed))
            .unwrap_err();
        assert_eq!(err, TreeError::InvalidParent(NodeIndex(5)));
    }

    #[test]
    fn test_statistics() {
        let tree = two_branch_tree();
        assert_eq!(tree.count_links(tree.root()), 3);
        assert_eq!(tree.count_joints(tree.root()), 2);
        assert_eq!(tree.count_dof(tree.root()), 2);
        assert!((tree.total_mass(tree.root()) - 3.5).abs() < 1e-12);
        assert!((tree.total_mass(NodeIndex(2)) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_node_spec_builder_keeps_parts() {
        let spec = NodeSpec::new(7, JointKind::Fixed)
            .rotation(Vector3::x(), std::f64::consts::FRAC_PI_2)
            .translation(Vector3::new(1.0, 2.0, 3.0));
        assert!((spec.home.rotation.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(spec.home.translation.vector, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_node_spec_zero_axis_rotation_ignored() {
        let spec = NodeSpec::new(7, JointKind::Fixed).rotation(Vector3::zeros(), 1.0);
        assert_eq!(spec.home.rotation, UnitQuaternion::identity());

        let spec = NodeSpec::new(7, JointKind::Fixed)
            .rotation(Vector3::z(), 0.5)
            .rotation(Vector3::zeros(), 1.0);
        assert!((spec.home.rotation.angle() - 0.5).abs() < 1e-12);
        assert!(spec.home.rotation.coords.iter().all(|c| c.is_finite()));
    }
}
