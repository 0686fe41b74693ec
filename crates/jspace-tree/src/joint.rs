//! 关节类型定义
//!
//! 关节类型用带负载的枚举表示，所有分支在使用处穷尽匹配。
//! 目前只有转动（Revolute）和移动（Prismatic）关节能被枚举为自由度；
//! 球关节（Spherical）和固定关节（Fixed）可以出现在树中，但会在枚举时被拒绝。

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

use crate::error::TreeError;

/// 坐标轴（用于快速构造关节）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// 对应的单位向量
    pub fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// 关节类型
///
/// 轴向量在节点自身坐标系中表达。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JointKind {
    /// 转动关节：绕 `axis` 旋转 q 弧度
    Revolute { axis: Unit<Vector3<f64>> },
    /// 移动关节：沿 `axis` 平移 q 米
    Prismatic { axis: Unit<Vector3<f64>> },
    /// 球关节（3 自由度，不支持枚举）
    Spherical,
    /// 固定关节（0 自由度）
    Fixed,
}

impl JointKind {
    /// 沿坐标轴的转动关节
    pub fn revolute(axis: Axis) -> Self {
        JointKind::Revolute { axis: axis.unit() }
    }

    /// 沿坐标轴的移动关节
    pub fn prismatic(axis: Axis) -> Self {
        JointKind::Prismatic { axis: axis.unit() }
    }

    /// 任意轴的转动关节
    ///
    /// # 错误
    /// 轴为零向量时返回 `TreeError::DegenerateAxis`
    pub fn revolute_about(axis: Vector3<f64>) -> Result<Self, TreeError> {
        Ok(JointKind::Revolute {
            axis: normalize_axis(axis)?,
        })
    }

    /// 任意轴的移动关节
    pub fn prismatic_along(axis: Vector3<f64>) -> Result<Self, TreeError> {
        Ok(JointKind::Prismatic {
            axis: normalize_axis(axis)?,
        })
    }

    /// 关节自由度数量
    pub fn dof(&self) -> usize {
        match self {
            JointKind::Revolute { .. } | JointKind::Prismatic { .. } => 1,
            JointKind::Spherical => 3,
            JointKind::Fixed => 0,
        }
    }

    /// 关节类型名称（用于错误信息和日志）
    pub fn name(&self) -> &'static str {
        match self {
            JointKind::Revolute { .. } => "revolute",
            JointKind::Prismatic { .. } => "prismatic",
            JointKind::Spherical => "spherical",
            JointKind::Fixed => "fixed",
        }
    }

    /// 单自由度关节的轴
    pub fn axis(&self) -> Option<&Unit<Vector3<f64>>> {
        match self {
            JointKind::Revolute { axis } | JointKind::Prismatic { axis } => Some(axis),
            JointKind::Spherical | JointKind::Fixed => None,
        }
    }

    /// 关节运动变换 `X_J(q)`
    ///
    /// 球关节和固定关节返回单位变换（球关节的姿态不由标量 q 描述）。
    pub fn motion(&self, q: f64) -> Isometry3<f64> {
        match self {
            JointKind::Revolute { axis } => Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(axis, q),
            ),
            JointKind::Prismatic { axis } => Isometry3::from_parts(
                Translation3::from(axis.into_inner() * q),
                UnitQuaternion::identity(),
            ),
            JointKind::Spherical | JointKind::Fixed => Isometry3::identity(),
        }
    }
}

fn normalize_axis(axis: Vector3<f64>) -> Result<Unit<Vector3<f64>>, TreeError> {
    Unit::try_new(axis, 1e-12).ok_or(TreeError::DegenerateAxis(axis.x, axis.y, axis.z))
}

/// 关节限位（弧度或米）
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointLimits {
    pub lower: f64,
    pub upper: f64,
}

impl JointLimits {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// 位置是否在限位内（含边界）
    pub fn contains(&self, q: f64) -> bool {
        q >= self.lower && q <= self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_joint_dof() {
        assert_eq!(JointKind::revolute(Axis::Z).dof(), 1);
        assert_eq!(JointKind::prismatic(Axis::X).dof(), 1);
        assert_eq!(JointKind::Spherical.dof(), 3);
        assert_eq!(JointKind::Fixed.dof(), 0);
    }

    #[test]
    fn test_revolute_motion() {
        let joint = JointKind::revolute(Axis::Z);
        let x = joint.motion(FRAC_PI_2);
        let p = x.transform_vector(&Vector3::x());
        assert_relative_eq!(p, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_prismatic_motion() {
        let joint = JointKind::prismatic(Axis::Z);
        let x = joint.motion(0.25);
        assert_relative_eq!(x.translation.vector, Vector3::new(0.0, 0.0, 0.25));
        assert_relative_eq!(x.rotation.angle(), 0.0);
    }

    #[test]
    fn test_degenerate_axis() {
        let err = JointKind::revolute_about(Vector3::zeros()).unwrap_err();
        assert_eq!(err, TreeError::DegenerateAxis(0.0, 0.0, 0.0));

        let joint = JointKind::prismatic_along(Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(
            joint.axis().unwrap().into_inner(),
            Vector3::new(0.0, 0.6, 0.8),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_joint_limits() {
        let limits = JointLimits::new(-1.0, 1.0);
        assert!(limits.contains(0.0));
        assert!(limits.contains(1.0));
        assert!(!limits.contains(1.01));
    }
}
