//! 求解器错误类型定义

use jspace_tree::NodeIndex;
use thiserror::Error;

/// 刚体求解器错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// 关节轴上的铰接惯量非正（正向动力学无法求解）
    #[error("Singular articulated inertia at node {node} (D = {value:e})")]
    SingularInertia { node: NodeIndex, value: f64 },

    /// 求解器不支持的关节类型
    #[error("Unsupported joint on node {node}: {kind}")]
    UnsupportedJoint {
        node: NodeIndex,
        kind: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_error_display() {
        let msg = format!(
            "{}",
            SolverError::SingularInertia {
                node: NodeIndex(3),
                value: 0.0,
            }
        );
        assert!(msg.contains("node #3"), "message: {}", msg);

        let msg = format!(
            "{}",
            SolverError::UnsupportedJoint {
                node: NodeIndex(1),
                kind: "spherical",
            }
        );
        assert_eq!(msg, "Unsupported joint on node #1: spherical");
    }
}
