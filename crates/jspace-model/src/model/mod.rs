//! 关节空间模型
//!
//! [`Model`] 持有两棵结构相同的树（各自包在一个求解器里）：
//!
//! - **KGM 树**：运动学、重力、质量矩阵。速度恒为零，使动力学遍历只剩惯性项和重力项
//! - **CC 树**（可选）：科氏力 / 离心力。携带真实速度，重力和加速度为零
//!
//! # 状态机
//!
//! ```text
//! Constructed ──set_state()──▶ StateSet ──update_kinematics()──▶ KinematicsValid
//!                                                                     │
//!                                           update_dynamics() ────────┘
//!                                                   ▼
//!                                             DynamicsValid
//! ```
//!
//! `set_state()` 清空所有缓存；任何 getter 在其对应的计算步骤之前调用都会返回
//! `ModelError::NotComputed`，不会读到过期数据。

mod dynamics;
mod kinematics;

pub use kinematics::isometry_from_raw;

use std::collections::BTreeSet;

use jspace_solver::{RecursiveSolver, RigidBodySolver};
use jspace_tree::{Enumeration, JointLimits, Node, NodeIndex, RigidBodyTree};
use nalgebra::{DVector, Vector3};
use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::state::State;
use crate::triangular::PackedSymmetric;

/// 模型生命周期阶段（有序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Constructed,
    StateSet,
    KinematicsValid,
    DynamicsValid,
}

/// 关节空间运动学 / 动力学模型
///
/// ```
/// use jspace_model::{Model, State};
/// use jspace_tree::library;
///
/// let mut model = Model::new(library::unit_mass_rr(), Some(library::unit_mass_rr()))?;
/// let mut state = State::new(2, 2, 0);
/// state.position = vec![0.3, -0.2];
/// model.update(&state)?;
///
/// let a = model.mass_inertia()?;
/// assert!((a[(0, 1)] - a[(1, 0)]).abs() < 1e-12);
/// # Ok::<(), jspace_model::ModelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Model<S: RigidBodySolver = RecursiveSolver> {
    kgm: S,
    cc: Option<S>,
    dofs: Enumeration,
    config: ModelConfig,
    gravity: Vector3<f64>,
    gravity_disabled: BTreeSet<usize>,

    state: State,
    phase: Phase,

    g_torque: Option<DVector<f64>>,
    cc_torque: Option<DVector<f64>>,
    mass: Option<PackedSymmetric>,
    inv_mass: Option<PackedSymmetric>,
}

impl Model<RecursiveSolver> {
    /// 用内置递归求解器构造模型（默认配置）
    ///
    /// # 错误
    /// - `ModelError::Tree`：节点 ID 重复或关节不是 1-DOF 关节
    /// - `ModelError::Solver`：求解器不支持树中的关节
    /// - `ModelError::TopologyMismatch`：CC 树与 KGM 树结构不同
    pub fn new(kgm_tree: RigidBodyTree, cc_tree: Option<RigidBodyTree>) -> Result<Self, ModelError> {
        Self::with_config(kgm_tree, cc_tree, ModelConfig::default())
    }

    /// 用内置递归求解器和指定配置构造模型
    pub fn with_config(
        kgm_tree: RigidBodyTree,
        cc_tree: Option<RigidBodyTree>,
        config: ModelConfig,
    ) -> Result<Self, ModelError> {
        // 先枚举再建求解器，使树结构错误优先于求解器错误报告
        Enumeration::new(&kgm_tree)?;
        let kgm = RecursiveSolver::new(kgm_tree)?;
        let cc = match cc_tree {
            Some(tree) => {
                Enumeration::new(&tree)?;
                Some(RecursiveSolver::new(tree)?)
            },
            None => None,
        };
        Self::from_solvers(kgm, cc, config)
    }
}

impl<S: RigidBodySolver> Model<S> {
    /// 用任意求解器构造模型
    pub fn from_solvers(kgm: S, cc: Option<S>, config: ModelConfig) -> Result<Self, ModelError> {
        let dofs = Enumeration::new(kgm.tree())?;
        let ndof = dofs.ndof();

        if let Some(cc) = &cc {
            let cc_dofs = Enumeration::new(cc.tree())?;
            if !dofs.matches(&cc_dofs) {
                return Err(ModelError::TopologyMismatch {
                    kgm: ndof,
                    cc: cc_dofs.ndof(),
                });
            }
        }

        let gravity_disabled = config
            .gravity_compensation_disabled
            .iter()
            .copied()
            .filter(|&index| index < ndof)
            .collect();

        debug!(
            "model created: {} DOF, {} nodes, CC tree: {}",
            ndof,
            kgm.tree().len(),
            cc.is_some()
        );

        Ok(Self {
            gravity: config.gravity_vector(),
            kgm,
            cc,
            dofs,
            config,
            gravity_disabled,
            state: State::new(ndof, ndof, 0),
            phase: Phase::Constructed,
            g_torque: None,
            cc_torque: None,
            mass: None,
            inv_mass: None,
        })
    }

    /// 推入新状态
    ///
    /// KGM 树写入位置，速度 / 加速度 / 力矩清零；
    /// CC 树写入位置和速度，加速度 / 力矩清零。所有缓存失效。
    ///
    /// # 错误
    /// `position` 或 `velocity` 长度不等于自由度数时返回
    /// `ModelError::DimensionMismatch`，模型保持不变。
    pub fn set_state(&mut self, state: &State) -> Result<(), ModelError> {
        let ndof = self.ndof();
        for (field, len) in [
            ("position", state.position.len()),
            ("velocity", state.velocity.len()),
        ] {
            if len != ndof {
                return Err(ModelError::DimensionMismatch {
                    field,
                    expected: ndof,
                    actual: len,
                });
            }
        }

        if state
            .position
            .iter()
            .chain(&state.velocity)
            .any(|v| !v.is_finite())
        {
            warn!("state contains non-finite position or velocity values");
        }

        self.state.clone_from(state);

        for (dof, &node) in self.dofs.nodes().iter().enumerate() {
            let q = state.position[dof];
            self.kgm.set_position(node, q);
            self.kgm.set_velocity(node, 0.0);
            self.kgm.set_acceleration(node, 0.0);
            self.kgm.set_torque(node, 0.0);

            if let Some(cc) = self.cc.as_mut() {
                cc.set_position(node, q);
                cc.set_velocity(node, state.velocity[dof]);
                cc.set_acceleration(node, 0.0);
                cc.set_torque(node, 0.0);
            }
        }

        self.g_torque = None;
        self.cc_torque = None;
        self.mass = None;
        self.inv_mass = None;
        self.phase = Phase::StateSet;
        Ok(())
    }

    /// `set_state` + 运动学 + 全部动力学
    pub fn update(&mut self, state: &State) -> Result<(), ModelError> {
        self.set_state(state)?;
        self.update_kinematics()?;
        self.update_dynamics()
    }

    /// 最近一次推入的状态
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn require_state(&self) -> Result<(), ModelError> {
        if self.phase < Phase::StateSet {
            return Err(ModelError::StateNotSet);
        }
        Ok(())
    }

    // ==================== 内省 ====================

    /// 自由度数 N（构造后不变）
    pub fn ndof(&self) -> usize {
        self.dofs.ndof()
    }

    /// 被枚举的节点数（不含根节点）
    pub fn node_count(&self) -> usize {
        self.dofs.nodes().len()
    }

    /// 关节数（固定关节不计）
    pub fn joint_count(&self) -> usize {
        let tree = self.kgm_tree();
        tree.count_joints(tree.root())
    }

    /// 第 `dof` 个自由度对应的节点
    pub fn node(&self, dof: usize) -> Option<NodeIndex> {
        self.dofs.node_at(dof)
    }

    /// 节点对应的自由度索引
    pub fn dof_index(&self, node: NodeIndex) -> Option<usize> {
        self.dofs.dof_of(node)
    }

    /// 节点记录
    pub fn node_info(&self, node: NodeIndex) -> Option<&Node> {
        self.kgm_tree().node(node)
    }

    pub fn node_by_name(&self, link_name: &str) -> Option<NodeIndex> {
        self.dofs.find_by_link_name(link_name)
    }

    pub fn node_by_joint_name(&self, joint_name: &str) -> Option<NodeIndex> {
        self.dofs.find_by_joint_name(joint_name)
    }

    /// 按用户 ID 线性查找
    #[deprecated(since = "0.0.3", note = "Use `node()`, `node_by_name()` or `node_by_joint_name()` instead")]
    #[allow(deprecated)]
    pub fn find_node_by_id(&self, id: i32) -> Option<NodeIndex> {
        self.dofs.find_by_id(id)
    }

    /// 第 `dof` 个自由度的关节限位
    pub fn joint_limits(&self, dof: usize) -> Option<JointLimits> {
        self.node(dof)
            .and_then(|node| self.kgm_tree().node(node))
            .and_then(|node| node.limits)
    }

    /// 全部连杆总质量
    pub fn total_mass(&self) -> f64 {
        let tree = self.kgm_tree();
        tree.total_mass(tree.root())
    }

    pub fn kgm_tree(&self) -> &RigidBodyTree {
        self.kgm.tree()
    }

    pub fn cc_tree(&self) -> Option<&RigidBodyTree> {
        self.cc.as_ref().map(|cc| cc.tree())
    }

    pub fn has_coriolis_tree(&self) -> bool {
        self.cc.is_some()
    }
}
