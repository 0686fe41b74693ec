//! 输入解析和输出格式化工具

use anyhow::{Context, Result};
use nalgebra::{DMatrix, DVector, Isometry3, Matrix6xX};

/// 解析逗号分隔的浮点数列表（允许空格）
pub fn parse_list(input: &str) -> Result<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("无效数值: {:?}", s))
        })
        .collect()
}

/// 打印向量（每行一个自由度）
pub fn print_vector(title: &str, v: &DVector<f64>) {
    println!("{}:", title);
    for (i, value) in v.iter().enumerate() {
        println!("  [{}] {:>12.6}", i, value);
    }
}

/// 打印稠密矩阵
pub fn print_matrix(title: &str, m: &DMatrix<f64>) {
    println!("{}:", title);
    for row in m.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>12.6}", v)).collect();
        println!("  {}", cells.join(" "));
    }
}

/// 打印 6×N 雅可比（前三行线速度，后三行角速度）
pub fn print_jacobian(title: &str, j: &Matrix6xX<f64>) {
    println!("{}:", title);
    for (r, row) in j.row_iter().enumerate() {
        let label = ["vx", "vy", "vz", "wx", "wy", "wz"][r];
        let cells: Vec<String> = row.iter().map(|v| format!("{:>10.5}", v)).collect();
        println!("  {} {}", label, cells.join(" "));
    }
}

/// 打印位姿（平移 + 四元数 xyzw + 轴角）
pub fn print_frame(title: &str, frame: &Isometry3<f64>) {
    let t = frame.translation.vector;
    let q = frame.rotation.quaternion();
    println!("{}:", title);
    println!("  translation: [{:.6}, {:.6}, {:.6}]", t.x, t.y, t.z);
    println!(
        "  rotation (xyzw): [{:.6}, {:.6}, {:.6}, {:.6}]",
        q.i, q.j, q.k, q.w
    );
    let axis_angle = frame.rotation.scaled_axis();
    println!(
        "  rotation (axis·angle): [{:.6}, {:.6}, {:.6}]",
        axis_angle.x, axis_angle.y, axis_angle.z
    );
}
