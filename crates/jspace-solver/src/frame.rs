//! 求解器原生输出格式
//!
//! 求解器以自己的布局报告位姿和雅可比列，调用方负责在边界处转换。

use nalgebra::{Point3, Vector3};

/// 原生位姿格式
///
/// ⚠️ 四元数按 `[x, y, z, w]` 顺序存放（标量在最后），
/// 与 `nalgebra::Quaternion::new(w, x, y, z)` 的参数顺序不同。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFrame {
    pub rotation_xyzw: [f64; 4],
    pub translation: [f64; 3],
}

/// 单个关节的空间雅可比列
///
/// `linear` 是关节单位速度在 `reference` 点处产生的线速度，
/// `angular` 是对应的角速度。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobianColumn {
    pub linear: Vector3<f64>,
    pub angular: Vector3<f64>,
    pub reference: Point3<f64>,
}
