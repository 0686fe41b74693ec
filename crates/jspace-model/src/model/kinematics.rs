//! 运动学查询：全局位姿与点雅可比

use jspace_solver::{RawFrame, RigidBodySolver};
use jspace_tree::NodeIndex;
use nalgebra::{
    Isometry3, Matrix6xX, Point3, Quaternion, Translation3, UnitQuaternion, Vector3,
};
use tracing::trace;

use super::{Model, Phase};
use crate::error::{ModelError, Quantity};

/// 把求解器原生位姿转换为 `Isometry3`
///
/// ⚠️ 原生四元数按 `[x, y, z, w]` 存放，`Quaternion::new` 的参数顺序是 `(w, x, y, z)`。
pub fn isometry_from_raw(raw: &RawFrame) -> Isometry3<f64> {
    let [x, y, z, w] = raw.rotation_xyzw;
    let [tx, ty, tz] = raw.translation;
    Isometry3::from_parts(
        Translation3::new(tx, ty, tz),
        UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z)),
    )
}

impl<S: RigidBodySolver> Model<S> {
    /// 正运动学：用当前位置刷新 KGM 树所有节点的位姿和雅可比列
    pub fn update_kinematics(&mut self) -> Result<(), ModelError> {
        self.require_state()?;
        self.kgm.run_forward_kinematics();
        if self.phase < Phase::KinematicsValid {
            self.phase = Phase::KinematicsValid;
        }
        Ok(())
    }

    fn require_kinematics(&self, node: NodeIndex) -> Result<(), ModelError> {
        if !self.kgm.tree().contains(node) {
            return Err(ModelError::InvalidNode(node));
        }
        if self.phase < Phase::KinematicsValid {
            return Err(ModelError::NotComputed(Quantity::Kinematics));
        }
        Ok(())
    }

    /// 节点全局位姿
    pub fn global_frame(&self, node: NodeIndex) -> Result<Isometry3<f64>, ModelError> {
        self.require_kinematics(node)?;
        self.kgm
            .global_frame(node)
            .map(|raw| isometry_from_raw(&raw))
            .ok_or(ModelError::InvalidNode(node))
    }

    /// `global_frame(node) ∘ local`，`local` 在节点坐标系中表达
    pub fn compute_global_frame(
        &self,
        node: NodeIndex,
        local: &Isometry3<f64>,
    ) -> Result<Isometry3<f64>, ModelError> {
        Ok(self.global_frame(node)? * local)
    }

    /// 节点坐标系中纯平移偏移 `(x, y, z)` 的全局位姿
    pub fn compute_global_frame_xyz(
        &self,
        node: NodeIndex,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Isometry3<f64>, ModelError> {
        self.compute_global_frame(node, &Isometry3::translation(x, y, z))
    }

    pub fn compute_global_frame_translation(
        &self,
        node: NodeIndex,
        offset: &Vector3<f64>,
    ) -> Result<Isometry3<f64>, ModelError> {
        self.compute_global_frame_xyz(node, offset.x, offset.y, offset.z)
    }

    /// 在节点原点处求雅可比
    pub fn compute_jacobian(&self, node: NodeIndex) -> Result<Matrix6xX<f64>, ModelError> {
        let origin = self.global_frame(node)?.translation.vector;
        self.compute_jacobian_at(node, &Point3::from(origin))
    }

    pub fn compute_jacobian_xyz(
        &self,
        node: NodeIndex,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Matrix6xX<f64>, ModelError> {
        self.compute_jacobian_at(node, &Point3::new(x, y, z))
    }

    /// 整棵树在全局点 `point` 处的 6×N 雅可比
    ///
    /// 第 0–2 行为线速度，第 3–5 行为角速度。每一列取自对应关节的原始列，
    /// 线速度部分从关节参考点平移到 `point`：
    ///
    /// ```text
    /// Jv[:, r] = Jv_raw[:, r] − (point − reference_r) × ω[:, r]
    /// ```
    ///
    /// # 错误
    /// - `ModelError::InvalidNode`：节点不在树中
    /// - `ModelError::NotComputed`：尚未运行 `update_kinematics()`
    /// - `ModelError::UnsupportedJoint`：求解器无法给出某一列
    pub fn compute_jacobian_at(
        &self,
        node: NodeIndex,
        point: &Point3<f64>,
    ) -> Result<Matrix6xX<f64>, ModelError> {
        self.require_kinematics(node)?;

        let mut jacobian = Matrix6xX::zeros(self.ndof());
        for (col, &joint_node) in self.dofs.nodes().iter().enumerate() {
            let raw = self
                .kgm
                .jacobian_column(joint_node)
                .ok_or(ModelError::UnsupportedJoint(joint_node))?;

            let linear = raw.linear - (point - raw.reference).cross(&raw.angular);
            jacobian.fixed_view_mut::<3, 1>(0, col).copy_from(&linear);
            jacobian
                .fixed_view_mut::<3, 1>(3, col)
                .copy_from(&raw.angular);
            trace!("jacobian column {} at node {}", col, joint_node);
        }
        Ok(jacobian)
    }
}
