//! # 空间代数
//!
//! 基于 Featherstone 空间代数的 6D 向量运算，所有量都在世界坐标系
//! （绝对坐标）中表达。
//!
//! ## 空间向量格式
//!
//! ```text
//! v[6] = [ω_x, ω_y, ω_z, v_x, v_y, v_z]
//!        [角速度/力矩,  线速度/力]
//! ```
//!
//! 线性部分是"刚体上此刻与世界原点重合的点"的速度（或力对原点的分解）。

use nalgebra::{Matrix3, Matrix6, Vector3, Vector6};

/// 6D 空间运动 / 力向量
pub type SpatialVector = Vector6<f64>;

/// 6×6 空间惯量
pub type SpatialInertia = Matrix6<f64>;

/// 由角部分和线部分拼出空间向量
#[inline]
pub fn spatial(angular: Vector3<f64>, linear: Vector3<f64>) -> SpatialVector {
    SpatialVector::new(
        angular.x, angular.y, angular.z, linear.x, linear.y, linear.z,
    )
}

/// 角部分（前 3 维）
#[inline]
pub fn angular(v: &SpatialVector) -> Vector3<f64> {
    v.fixed_rows::<3>(0).into_owned()
}

/// 线部分（后 3 维）
#[inline]
pub fn linear(v: &SpatialVector) -> Vector3<f64> {
    v.fixed_rows::<3>(3).into_owned()
}

/// 空间运动叉积 `v ×ₘ m`
///
/// ```text
/// res[0:3] = ω × ω_m
/// res[3:6] = ω × v_m + v × ω_m
/// ```
pub fn cross_motion(v: &SpatialVector, m: &SpatialVector) -> SpatialVector {
    let (w, lin) = (angular(v), linear(v));
    let (wm, vm) = (angular(m), linear(m));
    spatial(w.cross(&wm), w.cross(&vm) + lin.cross(&wm))
}

/// 空间力叉积 `v ×* f`
///
/// ```text
/// res[0:3] = ω × n + v × f
/// res[3:6] = ω × f
/// ```
pub fn cross_force(v: &SpatialVector, f: &SpatialVector) -> SpatialVector {
    let (w, lin) = (angular(v), linear(v));
    let (n, force) = (angular(f), linear(f));
    spatial(w.cross(&n) + lin.cross(&force), w.cross(&force))
}

/// 刚体空间惯量（对世界原点）
///
/// ```text
/// I = [ I_c + m·C·Cᵀ   m·C ]
///     [ m·Cᵀ           m·1 ]
/// ```
///
/// 其中 `C = [c]×` 为质心（世界坐标）的反对称矩阵，`I_c` 为绕质心的转动惯量（世界坐标）。
pub fn rigid_body_inertia(
    mass: f64,
    com: &Vector3<f64>,
    rotational: &Matrix3<f64>,
) -> SpatialInertia {
    let c = com.cross_matrix();
    let mut inertia = SpatialInertia::zeros();
    inertia
        .fixed_view_mut::<3, 3>(0, 0)
        .copy_from(&(rotational + c * c.transpose() * mass));
    inertia.fixed_view_mut::<3, 3>(0, 3).copy_from(&(c * mass));
    inertia
        .fixed_view_mut::<3, 3>(3, 0)
        .copy_from(&(c.transpose() * mass));
    inertia
        .fixed_view_mut::<3, 3>(3, 3)
        .copy_from(&(Matrix3::identity() * mass));
    inertia
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parts_roundtrip() {
        let v = spatial(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(angular(&v), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(linear(&v), Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_cross_motion_self_is_zero() {
        let v = spatial(Vector3::new(0.3, -1.0, 2.0), Vector3::new(1.0, 0.5, -0.2));
        assert_relative_eq!(cross_motion(&v, &v), SpatialVector::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn test_cross_force_is_dual() {
        // (v ×ₘ m)·f = −m·(v ×* f)
        let v = spatial(Vector3::new(0.3, -1.0, 2.0), Vector3::new(1.0, 0.5, -0.2));
        let m = spatial(Vector3::new(-0.7, 0.1, 0.4), Vector3::new(0.2, 2.0, 1.0));
        let f = spatial(Vector3::new(1.5, 0.0, -1.0), Vector3::new(0.4, -0.3, 0.9));
        assert_relative_eq!(
            cross_motion(&v, &m).dot(&f),
            -m.dot(&cross_force(&v, &f)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_point_mass_inertia() {
        // 单位质量位于 (0, 1, 0)，绕 x 轴角速度 1：质心速度 (0, 0, 1)
        let inertia = rigid_body_inertia(1.0, &Vector3::new(0.0, 1.0, 0.0), &Matrix3::zeros());
        let h = inertia * spatial(Vector3::x(), Vector3::zeros());
        assert_relative_eq!(linear(&h), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(angular(&h), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(inertia, inertia.transpose(), epsilon = 1e-12);
    }
}
