//! 递归刚体求解器
//!
//! 在世界坐标系（绝对坐标）中实现 Featherstone 的三种递归算法：
//!
//! - **正运动学**：`X_i = X_parent · home_i · joint_i(q_i)`，同时计算运动子空间 `S_i`
//! - **逆动力学**：递归牛顿-欧拉（RNEA），`a_0 = [0; −g]` 把重力折算为基座加速度
//! - **正向动力学**：铰接体算法（ABA），三次遍历
//!
//! Arena 顺序即拓扑序，因此正向遍历按索引递增、反向遍历按索引递减即可。
//! 固定关节把连杆刚性地附着在父节点上，运动子空间为零。

use jspace_tree::{JointKind, NodeIndex, RigidBodyTree};
use nalgebra::{Isometry3, Point3, Vector3};
use tracing::{debug, trace};

use crate::error::SolverError;
use crate::frame::{JacobianColumn, RawFrame};
use crate::solver::RigidBodySolver;
use crate::spatial::{
    SpatialInertia, SpatialVector, cross_force, cross_motion, rigid_body_inertia, spatial,
};

/// 铰接惯量低于此值视为奇异
const SINGULAR_EPSILON: f64 = 1e-12;

/// 递归牛顿-欧拉 / 铰接体求解器
///
/// 关节状态按节点索引存放（根节点槽位不使用）。
/// 关节位置变化后正运动学会被标记为过期，下一次动力学计算前自动刷新。
#[derive(Debug, Clone)]
pub struct RecursiveSolver {
    tree: RigidBodyTree,
    parent: Vec<usize>,
    movable: Vec<bool>,

    q: Vec<f64>,
    qd: Vec<f64>,
    qdd: Vec<f64>,
    tau: Vec<f64>,

    global: Vec<Isometry3<f64>>,
    subspace: Vec<SpatialVector>,
    inertia: Vec<SpatialInertia>,
    kinematics_dirty: bool,
}

impl RecursiveSolver {
    /// 接管一棵树并完成初始正运动学（所有关节位置为 0）
    ///
    /// # 错误
    /// 树中含球关节时返回 `SolverError::UnsupportedJoint`
    pub fn new(tree: RigidBodyTree) -> Result<Self, SolverError> {
        let n = tree.len();
        let mut parent = Vec::with_capacity(n);
        let mut movable = Vec::with_capacity(n);

        for (index, node) in tree.iter() {
            if let JointKind::Spherical = node.joint {
                return Err(SolverError::UnsupportedJoint {
                    node: index,
                    kind: node.joint.name(),
                });
            }
            parent.push(node.parent().map_or(0, NodeIndex::index));
            movable.push(index != NodeIndex::ROOT && node.dof() == 1);
        }

        let mut solver = Self {
            tree,
            parent,
            movable,
            q: vec![0.0; n],
            qd: vec![0.0; n],
            qdd: vec![0.0; n],
            tau: vec![0.0; n],
            global: vec![Isometry3::identity(); n],
            subspace: vec![SpatialVector::zeros(); n],
            inertia: vec![SpatialInertia::zeros(); n],
            kinematics_dirty: true,
        };
        solver.run_forward_kinematics();

        debug!("recursive solver ready ({} nodes)", n);
        Ok(solver)
    }

    /// 取回树（销毁求解器）
    pub fn into_tree(self) -> RigidBodyTree {
        self.tree
    }

    fn ensure_kinematics(&mut self) {
        if self.kinematics_dirty {
            self.run_forward_kinematics();
        }
    }

    /// 正向遍历：空间速度 `v_i` 和速度乘积项 `c_i = v_i ×ₘ (S_i q̇_i)`
    fn propagate_velocities(&self) -> (Vec<SpatialVector>, Vec<SpatialVector>) {
        let n = self.tree.len();
        let mut vel = vec![SpatialVector::zeros(); n];
        let mut bias = vec![SpatialVector::zeros(); n];

        for i in 1..n {
            let joint_vel = self.subspace[i] * self.qd[i];
            vel[i] = vel[self.parent[i]] + joint_vel;
            bias[i] = cross_motion(&vel[i], &joint_vel);
        }
        (vel, bias)
    }

    fn base_acceleration(gravity: &Vector3<f64>) -> SpatialVector {
        spatial(Vector3::zeros(), -gravity)
    }
}

impl RigidBodySolver for RecursiveSolver {
    fn tree(&self) -> &RigidBodyTree {
        &self.tree
    }

    fn set_position(&mut self, node: NodeIndex, value: f64) {
        if let Some(slot) = self.q.get_mut(node.0) {
            *slot = value;
            self.kinematics_dirty = true;
        }
    }

    fn set_velocity(&mut self, node: NodeIndex, value: f64) {
        if let Some(slot) = self.qd.get_mut(node.0) {
            *slot = value;
        }
    }

    fn set_acceleration(&mut self, node: NodeIndex, value: f64) {
        if let Some(slot) = self.qdd.get_mut(node.0) {
            *slot = value;
        }
    }

    fn set_torque(&mut self, node: NodeIndex, value: f64) {
        if let Some(slot) = self.tau.get_mut(node.0) {
            *slot = value;
        }
    }

    fn position(&self, node: NodeIndex) -> f64 {
        self.q.get(node.0).copied().unwrap_or(0.0)
    }

    fn velocity(&self, node: NodeIndex) -> f64 {
        self.qd.get(node.0).copied().unwrap_or(0.0)
    }

    fn acceleration(&self, node: NodeIndex) -> f64 {
        self.qdd.get(node.0).copied().unwrap_or(0.0)
    }

    fn torque(&self, node: NodeIndex) -> f64 {
        self.tau.get(node.0).copied().unwrap_or(0.0)
    }

    fn run_forward_kinematics(&mut self) {
        for (index, node) in self.tree.iter() {
            let i = index.0;
            let base = match node.parent() {
                Some(p) => self.global[p.0] * node.home,
                None => node.home,
            };
            let x = base * node.joint.motion(self.q[i]);

            self.subspace[i] = match &node.joint {
                JointKind::Revolute { axis } => {
                    let a = x.rotation * axis.into_inner();
                    spatial(a, x.translation.vector.cross(&a))
                },
                JointKind::Prismatic { axis } => {
                    spatial(Vector3::zeros(), x.rotation * axis.into_inner())
                },
                JointKind::Spherical | JointKind::Fixed => SpatialVector::zeros(),
            };

            let rot = x.rotation.to_rotation_matrix();
            let com = x * Point3::from(node.inertia.com);
            let rotational = rot.matrix() * node.inertia.rotational * rot.matrix().transpose();
            self.inertia[i] = rigid_body_inertia(node.inertia.mass, &com.coords, &rotational);

            self.global[i] = x;
        }
        self.kinematics_dirty = false;
        trace!("forward kinematics updated");
    }

    fn run_inverse_dynamics(&mut self, gravity: &Vector3<f64>) -> Result<(), SolverError> {
        self.ensure_kinematics();

        let n = self.tree.len();
        let (vel, bias) = self.propagate_velocities();
        let mut acc = vec![SpatialVector::zeros(); n];
        let mut force = vec![SpatialVector::zeros(); n];
        acc[0] = Self::base_acceleration(gravity);

        for i in 1..n {
            acc[i] = acc[self.parent[i]] + self.subspace[i] * self.qdd[i] + bias[i];
            let momentum = self.inertia[i] * vel[i];
            force[i] = self.inertia[i] * acc[i] + cross_force(&vel[i], &momentum);
        }

        for i in (1..n).rev() {
            self.tau[i] = self.subspace[i].dot(&force[i]);
            let p = self.parent[i];
            if p != 0 {
                let f = force[i];
                force[p] += f;
            }
        }

        trace!("inverse dynamics pass done");
        Ok(())
    }

    fn run_forward_dynamics(&mut self, gravity: &Vector3<f64>) -> Result<(), SolverError> {
        self.ensure_kinematics();

        let n = self.tree.len();
        let (vel, bias) = self.propagate_velocities();
        let mut art_inertia = self.inertia.clone();
        let mut art_bias: Vec<SpatialVector> = (0..n)
            .map(|i| cross_force(&vel[i], &(self.inertia[i] * vel[i])))
            .collect();
        let mut u_vec = vec![SpatialVector::zeros(); n];
        let mut d = vec![0.0; n];
        let mut u = vec![0.0; n];

        // 向内：累积铰接惯量与偏置力
        for i in (1..n).rev() {
            let (ia, pa) = if self.movable[i] {
                let s = &self.subspace[i];
                u_vec[i] = art_inertia[i] * s;
                d[i] = s.dot(&u_vec[i]);
                if d[i] <= SINGULAR_EPSILON {
                    return Err(SolverError::SingularInertia {
                        node: NodeIndex(i),
                        value: d[i],
                    });
                }
                u[i] = self.tau[i] - s.dot(&art_bias[i]);

                let ia = art_inertia[i] - u_vec[i] * u_vec[i].transpose() / d[i];
                let pa = art_bias[i] + ia * bias[i] + u_vec[i] * (u[i] / d[i]);
                (ia, pa)
            } else {
                (art_inertia[i], art_bias[i] + art_inertia[i] * bias[i])
            };

            let p = self.parent[i];
            if p != 0 {
                art_inertia[p] += ia;
                art_bias[p] += pa;
            }
        }

        // 向外：求关节加速度
        let mut acc = vec![SpatialVector::zeros(); n];
        acc[0] = Self::base_acceleration(gravity);
        for i in 1..n {
            let a = acc[self.parent[i]] + bias[i];
            if self.movable[i] {
                let qdd = (u[i] - u_vec[i].dot(&a)) / d[i];
                self.qdd[i] = qdd;
                acc[i] = a + self.subspace[i] * qdd;
            } else {
                acc[i] = a;
            }
        }

        trace!("forward dynamics pass done");
        Ok(())
    }

    fn global_frame(&self, node: NodeIndex) -> Option<RawFrame> {
        let x = self.global.get(node.0)?;
        let q = x.rotation.quaternion();
        let t = x.translation.vector;
        Some(RawFrame {
            rotation_xyzw: [q.i, q.j, q.k, q.w],
            translation: [t.x, t.y, t.z],
        })
    }

    fn jacobian_column(&self, node: NodeIndex) -> Option<JacobianColumn> {
        let x = self.global.get(node.0)?;
        let reference = Point3::from(x.translation.vector);
        match &self.tree.node(node)?.joint {
            JointKind::Revolute { axis } => Some(JacobianColumn {
                linear: Vector3::zeros(),
                angular: x.rotation * axis.into_inner(),
                reference,
            }),
            JointKind::Prismatic { axis } => Some(JacobianColumn {
                linear: x.rotation * axis.into_inner(),
                angular: Vector3::zeros(),
                reference,
            }),
            JointKind::Spherical | JointKind::Fixed => None,
        }
    }
}
