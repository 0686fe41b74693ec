//! 模型配置
//!
//! 可从 TOML 加载：
//!
//! ```toml
//! # 世界坐标系下的重力加速度（m/s²）
//! gravity = [0.0, 0.0, -9.81]
//!
//! # 初始关闭重力补偿的自由度索引
//! gravity_compensation_disabled = [5]
//! ```

use std::fs;
use std::path::Path;

use jspace_solver::EARTH_GRAVITY;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 模型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// 重力加速度（世界坐标）
    pub gravity: [f64; 3],

    /// 初始关闭重力补偿的自由度索引（越界索引被忽略）
    pub gravity_compensation_disabled: Vec<usize>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            gravity: EARTH_GRAVITY,
            gravity_compensation_disabled: Vec::new(),
        }
    }
}

impl ModelConfig {
    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        Ok(())
    }

    pub fn gravity_vector(&self) -> Vector3<f64> {
        Vector3::from(self.gravity)
    }
}
