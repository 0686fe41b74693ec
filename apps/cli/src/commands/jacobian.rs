//! 雅可比命令

use anyhow::{Context, Result};
use clap::Args;
use jspace_model::NodeIndex;
use nalgebra::Point3;

use super::ModelArgs;
use crate::utils::{parse_list, print_frame, print_jacobian};

/// 计算连杆位姿和雅可比
#[derive(Args, Debug)]
pub struct JacobianCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// 连杆名称（缺省为最后一个自由度）
    #[arg(short, long, conflicts_with = "dof")]
    pub link: Option<String>,

    /// 自由度索引
    #[arg(short, long)]
    pub dof: Option<usize>,

    /// 连杆坐标系中的偏移点 x,y,z（缺省为连杆原点）
    #[arg(short, long, allow_hyphen_values = true)]
    pub point: Option<String>,
}

impl JacobianCommand {
    pub fn execute(self) -> Result<()> {
        let mut model = self.model.build_model()?;
        let state = self.model.state(&model)?;
        model.set_state(&state)?;
        model.update_kinematics()?;

        let node = self.resolve_node(&model)?;
        let offset = match &self.point {
            Some(point) => {
                let values = parse_list(point).context("解析 --point 失败")?;
                let &[x, y, z] = values.as_slice() else {
                    anyhow::bail!("--point 需要 3 个数值，得到 {} 个", values.len());
                };
                [x, y, z]
            },
            None => [0.0; 3],
        };

        let frame = model.compute_global_frame_xyz(node, offset[0], offset[1], offset[2])?;
        let point = Point3::from(frame.translation.vector);
        let jacobian = model.compute_jacobian_at(node, &point)?;

        print_frame(&format!("节点 {} 位姿", node), &frame);
        print_jacobian("雅可比 J", &jacobian);
        Ok(())
    }

    fn resolve_node(&self, model: &jspace_model::Model) -> Result<NodeIndex> {
        if let Some(name) = &self.link {
            return model
                .node_by_name(name)
                .ok_or_else(|| anyhow::anyhow!("未知连杆: {}", name));
        }
        let dof = match self.dof {
            Some(dof) => dof,
            None => model
                .ndof()
                .checked_sub(1)
                .ok_or_else(|| anyhow::anyhow!("模型没有自由度"))?,
        };
        model
            .node(dof)
            .ok_or_else(|| anyhow::anyhow!("自由度索引 {} 超出范围 (N = {})", dof, model.ndof()))
    }
}
