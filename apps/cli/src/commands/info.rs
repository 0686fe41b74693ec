//! 模型结构命令

use anyhow::Result;
use clap::Args;

use super::ModelArgs;

/// 显示模型结构
#[derive(Args, Debug)]
pub struct InfoCommand {
    #[command(flatten)]
    pub model: ModelArgs,
}

impl InfoCommand {
    pub fn execute(self) -> Result<()> {
        let model = self.model.build_model()?;
        let tree = model.kgm_tree();

        println!("模型: {:?}", self.model.robot);
        println!("  节点数: {}", model.node_count());
        println!("  关节数: {}", model.joint_count());
        println!("  自由度: {}", model.ndof());
        println!("  总质量: {:.3} kg", model.total_mass());
        println!("  重力: {:?}", model.config().gravity);
        println!();

        println!(
            "{:>4} {:>5} {:<16} {:<14} {:<10} {:>8} {:>18}",
            "DOF", "ID", "连杆", "关节", "类型", "质量", "限位"
        );
        for dof in 0..model.ndof() {
            let Some(node) = model.node(dof).and_then(|n| tree.node(n)) else {
                continue;
            };
            let limits = node
                .limits
                .map(|l| format!("[{:.3}, {:.3}]", l.lower, l.upper))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:>4} {:>5} {:<16} {:<14} {:<10} {:>8.3} {:>18}",
                dof,
                node.id,
                node.link_name,
                node.joint_name,
                node.joint.name(),
                node.inertia.mass,
                limits
            );
        }
        Ok(())
    }
}
