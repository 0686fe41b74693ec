//! 动力学命令
//!
//! 在给定构型下计算重力、科氏/离心力、质量矩阵及其逆

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use super::ModelArgs;
use crate::utils::{parse_list, print_matrix, print_vector};

/// 计算关节空间动力学量
#[derive(Args, Debug)]
pub struct DynamicsCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// 关闭重力补偿的自由度（逗号分隔，从 0 开始）
    #[arg(long)]
    pub disable_gravity: Option<String>,

    /// 同时输出逆质量矩阵
    #[arg(long)]
    pub inverse: bool,
}

impl DynamicsCommand {
    pub fn execute(self) -> Result<()> {
        let mut model = self.model.build_model()?;
        let state = self.model.state(&model)?;

        if let Some(list) = &self.disable_gravity {
            for value in parse_list(list).context("解析 --disable-gravity 失败")? {
                if value < 0.0 || value.fract() != 0.0 {
                    anyhow::bail!("无效自由度索引: {}", value);
                }
                let index = value as usize;
                if index >= model.ndof() {
                    anyhow::bail!("自由度索引 {} 超出范围 (N = {})", index, model.ndof());
                }
                model.disable_gravity_compensation(index, true);
            }
        }

        model.update(&state)?;
        debug!(phase = ?model.phase(), "模型已更新");

        print_vector("重力 g", &model.gravity()?);
        print_vector("科氏/离心 b", &model.coriolis_centrifugal()?);
        print_matrix("质量矩阵 A", &model.mass_inertia()?);
        if self.inverse {
            print_matrix("逆质量矩阵 A⁻¹", &model.inverse_mass_inertia()?);
        }
        Ok(())
    }
}
