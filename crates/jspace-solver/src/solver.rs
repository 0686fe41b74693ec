//! 刚体求解器能力接口
//!
//! 模型层只通过 [`RigidBodySolver`] 访问动力学引擎，不依赖任何具体实现。
//! 每个关节（按节点索引寻址）带有四个可读写的标量：位置、速度、加速度、力矩。

use jspace_tree::{NodeIndex, RigidBodyTree};
use nalgebra::Vector3;

use crate::error::SolverError;
use crate::frame::{JacobianColumn, RawFrame};

/// 地球重力加速度（世界坐标，Z 轴向上）
pub const EARTH_GRAVITY: [f64; 3] = [0.0, 0.0, -9.81];

/// 刚体求解器
///
/// 对越界节点的写入会被忽略，读取返回 0。
pub trait RigidBodySolver {
    /// 求解器持有的树
    fn tree(&self) -> &RigidBodyTree;

    fn set_position(&mut self, node: NodeIndex, value: f64);
    fn set_velocity(&mut self, node: NodeIndex, value: f64);
    fn set_acceleration(&mut self, node: NodeIndex, value: f64);
    fn set_torque(&mut self, node: NodeIndex, value: f64);

    fn position(&self, node: NodeIndex) -> f64;
    fn velocity(&self, node: NodeIndex) -> f64;
    fn acceleration(&self, node: NodeIndex) -> f64;
    fn torque(&self, node: NodeIndex) -> f64;

    /// 正运动学：由关节位置计算全局位姿和雅可比列
    fn run_forward_kinematics(&mut self);

    /// 逆动力学：`(q, q̇, q̈, g) → τ`，结果写入各关节力矩
    fn run_inverse_dynamics(&mut self, gravity: &Vector3<f64>) -> Result<(), SolverError>;

    /// 正向动力学：`(q, q̇, τ, g) → q̈`，结果写入各关节加速度
    fn run_forward_dynamics(&mut self, gravity: &Vector3<f64>) -> Result<(), SolverError>;

    /// 节点全局位姿（最近一次正运动学的结果）
    fn global_frame(&self, node: NodeIndex) -> Option<RawFrame>;

    /// 节点关节的雅可比列；无 1-DOF 关节的节点返回 `None`
    fn jacobian_column(&self, node: NodeIndex) -> Option<JacobianColumn>;
}
