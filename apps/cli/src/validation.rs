//! 输入验证模块

use anyhow::Result;
use jspace_model::Model;
use tracing::warn;

/// 关节状态验证器
pub struct JointValidator {
    /// 期望的自由度数
    ndof: usize,
}

impl JointValidator {
    pub fn new(ndof: usize) -> Self {
        Self { ndof }
    }

    /// 验证数组长度和数值有效性
    ///
    /// # 错误
    /// 如果：
    /// - 数量不等于自由度数
    /// - 任何值为 NaN 或无穷大
    pub fn validate(&self, values: &[f64], what: &str) -> Result<()> {
        if values.len() != self.ndof {
            anyhow::bail!(
                "需要 {} 个关节{}，得到 {} 个",
                self.ndof,
                what,
                values.len()
            );
        }

        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                anyhow::bail!(
                    "关节 J{} {}无效: {}",
                    i + 1,
                    what,
                    if v.is_nan() { "NaN" } else { "无穷大" }
                );
            }
        }
        Ok(())
    }

    /// 超出关节限位时只告警（模型计算不依赖限位）
    pub fn warn_outside_limits(&self, model: &Model, positions: &[f64]) -> usize {
        let mut count = 0;
        for (dof, &q) in positions.iter().enumerate() {
            if let Some(limits) = model.joint_limits(dof)
                && !limits.contains(q)
            {
                warn!(
                    "关节 J{} 位置 {:.3} 超出限位 [{:.3}, {:.3}]",
                    dof + 1,
                    q,
                    limits.lower,
                    limits.upper
                );
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jspace_tree::library;

    #[test]
    fn test_validate_length() {
        let validator = JointValidator::new(6);
        assert!(validator.validate(&[0.0; 6], "位置").is_ok());
        let err = validator.validate(&[0.0; 5], "位置").unwrap_err();
        assert!(err.to_string().contains("需要 6 个"));
    }

    #[test]
    fn test_validate_finite() {
        let validator = JointValidator::new(2);
        assert!(validator.validate(&[0.0, f64::NAN], "速度").is_err());
        assert!(validator.validate(&[f64::INFINITY, 0.0], "速度").is_err());
    }

    #[test]
    fn test_warn_outside_limits() {
        let model = Model::new(library::puma(), None).unwrap();
        let validator = JointValidator::new(6);
        assert_eq!(validator.warn_outside_limits(&model, &[0.0; 6]), 0);
        assert_eq!(
            validator.warn_outside_limits(&model, &[0.5, 0.0, -0.2, 0.0, 0.0, 0.0]),
            2
        );

        // RR 模型没有限位
        let model = Model::new(library::unit_mass_rr(), None).unwrap();
        assert_eq!(validator.warn_outside_limits(&model, &[10.0, 10.0]), 0);
    }
}
