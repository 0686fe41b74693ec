//! 树结构层错误类型定义

use thiserror::Error;

use crate::tree::NodeIndex;

/// 刚体树错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// 父节点索引不存在
    #[error("Invalid parent node: {0}")]
    InvalidParent(NodeIndex),

    /// 节点 ID 重复（枚举时检测，构造期致命错误）
    #[error("Duplicate node id: {0}")]
    DuplicateId(i32),

    /// 节点关节不是单自由度关节
    ///
    /// 每个非根节点必须恰好带一个 1-DOF 关节（转动或移动）。
    #[error("Unsupported joint on node {node}: {kind} (expected one 1-DOF joint)")]
    UnsupportedJoint {
        node: NodeIndex,
        kind: &'static str,
    },

    /// 关节轴为零向量（无法归一化）
    #[error("Degenerate joint axis: [{0}, {1}, {2}]")]
    DegenerateAxis(f64, f64, f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_display() {
        let msg = format!("{}", TreeError::DuplicateId(3));
        assert_eq!(msg, "Duplicate node id: 3");

        let msg = format!(
            "{}",
            TreeError::UnsupportedJoint {
                node: NodeIndex(2),
                kind: "spherical",
            }
        );
        assert!(msg.contains("node #2"), "message: {}", msg);
        assert!(msg.contains("spherical"), "message: {}", msg);

        let msg = format!("{}", TreeError::InvalidParent(NodeIndex(9)));
        assert!(msg.contains("#9"));
    }
}
