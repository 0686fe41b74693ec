//! 模型层错误类型定义

use std::fmt;
use std::path::PathBuf;

use jspace_solver::SolverError;
use jspace_tree::{NodeIndex, TreeError};
use thiserror::Error;

/// 模型缓存的派生量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Kinematics,
    Gravity,
    CoriolisCentrifugal,
    MassInertia,
    InverseMassInertia,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Kinematics => "kinematics",
            Quantity::Gravity => "gravity torque",
            Quantity::CoriolisCentrifugal => "Coriolis/centrifugal torque",
            Quantity::MassInertia => "mass matrix",
            Quantity::InverseMassInertia => "inverse mass matrix",
        };
        f.write_str(name)
    }
}

/// 模型层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// 节点索引不在 KGM 树中
    #[error("Invalid node: {0}")]
    InvalidNode(NodeIndex),

    /// 查询了当前状态下尚未计算的量
    #[error("{0} not computed for the current state")]
    NotComputed(Quantity),

    /// 尚未调用 `set_state()`
    #[error("State not set")]
    StateNotSet,

    /// 状态数组长度与自由度数不符
    #[error("Dimension mismatch for {field}: expected {expected}, got {actual}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// 关节类型不受支持（雅可比装配时求解器无法提供该列）
    #[error("Unsupported joint on node {0}")]
    UnsupportedJoint(NodeIndex),

    /// KGM 树与 CC 树拓扑不一致
    #[error("CC tree does not match KGM tree: {kgm} vs {cc} degrees of freedom")]
    TopologyMismatch { kgm: usize, cc: usize },

    /// 模型没有 CC 树
    #[error("Model has no Coriolis/centrifugal tree")]
    NoCoriolisTree,

    /// 树结构错误
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// 求解器错误
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

/// 配置文件错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取文件失败
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML 序列化失败
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// 重力向量含非有限值
    #[error("Gravity must be finite, got {0:?}")]
    InvalidGravity([f64; 3]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let msg = format!("{}", ModelError::NotComputed(Quantity::MassInertia));
        assert_eq!(msg, "mass matrix not computed for the current state");

        let msg = format!(
            "{}",
            ModelError::DimensionMismatch {
                field: "velocity",
                expected: 6,
                actual: 5,
            }
        );
        assert!(msg.contains("velocity"), "message: {}", msg);
        assert!(msg.contains("expected 6, got 5"), "message: {}", msg);

        let msg = format!("{}", ModelError::from(TreeError::DuplicateId(4)));
        assert!(msg.contains("Duplicate node id: 4"), "message: {}", msg);
    }

    #[test]
    fn test_config_error_display() {
        let msg = format!("{}", ConfigError::InvalidGravity([0.0, f64::NAN, 0.0]));
        assert!(msg.contains("NaN"), "message: {}", msg);
    }
}
