//! 命令定义和实现

pub mod config;
pub mod dynamics;
pub mod info;
pub mod jacobian;

pub use config::ConfigCommand;
pub use dynamics::DynamicsCommand;
pub use info::InfoCommand;
pub use jacobian::JacobianCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use jspace_model::{Model, ModelConfig, State};
use jspace_tree::{RigidBodyTree, library};
use tracing::info;

use crate::utils::parse_list;
use crate::validation::JointValidator;

/// 内置机器人模型
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Robot {
    /// PUMA 560 类六轴臂
    Puma,
    /// 单位质量平面 RR 臂
    UnitMassRr,
    /// 单位惯量 RR 臂
    UnitInertiaRr,
    /// 单位质量平面 5R 链
    UnitMass5r,
    /// 转动 + 移动 RP 臂
    UnitMassRp,
}

impl Robot {
    pub fn build(self) -> RigidBodyTree {
        match self {
            Robot::Puma => library::puma(),
            Robot::UnitMassRr => library::unit_mass_rr(),
            Robot::UnitInertiaRr => library::unit_inertia_rr(),
            Robot::UnitMass5r => library::unit_mass_5r(),
            Robot::UnitMassRp => library::unit_mass_rp(),
        }
    }
}

/// 各命令共用的模型参数
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// 机器人模型
    #[arg(short, long, value_enum, default_value_t = Robot::Puma)]
    pub robot: Robot,

    /// 模型配置文件（TOML）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 关节位置（逗号分隔，弧度或米；缺省为全零）
    #[arg(short, long, allow_hyphen_values = true)]
    pub joints: Option<String>,

    /// 关节速度（逗号分隔；缺省为全零）
    #[arg(short = 'v', long, allow_hyphen_values = true)]
    pub velocities: Option<String>,
}

impl ModelArgs {
    /// 加载配置并构造模型（带 CC 树）
    pub fn build_model(&self) -> Result<Model> {
        let config = match &self.config {
            Some(path) => ModelConfig::load_from_file(path)
                .with_context(|| format!("加载配置失败: {}", path.display()))?,
            None => ModelConfig::default(),
        };

        let model = Model::with_config(self.robot.build(), Some(self.robot.build()), config)
            .context("构造模型失败")?;
        info!("{:?}: {} DOF", self.robot, model.ndof());
        Ok(model)
    }

    /// 解析并校验状态
    pub fn state(&self, model: &Model) -> Result<State> {
        let ndof = model.ndof();
        let mut state = State::new(ndof, ndof, 0);
        let validator = JointValidator::new(ndof);

        if let Some(joints) = &self.joints {
            state.position = parse_list(joints).context("解析关节位置失败")?;
            validator.validate(&state.position, "位置")?;
            validator.warn_outside_limits(model, &state.position);
        }
        if let Some(velocities) = &self.velocities {
            state.velocity = parse_list(velocities).context("解析关节速度失败")?;
            validator.validate(&state.velocity, "速度")?;
        }
        Ok(state)
    }
}
