//! # jspace CLI
//!
//! 关节空间动力学模型命令行工具。
//!
//! ```bash
//! # 查看内置模型
//! jspace-cli info --robot puma
//!
//! # 在指定构型下计算重力、科氏力和质量矩阵
//! jspace-cli dynamics --robot puma --joints 0.1,0.2,0.3,0,0,0 --velocities 1,0,0,0,0,0
//!
//! # 末端雅可比
//! jspace-cli jacobian --robot puma --joints 0,0.7854,0,0,0,0 --link end-effector
//!
//! # 配置文件
//! jspace-cli config init jspace.toml
//! jspace-cli dynamics --robot unit-mass-rr --config jspace.toml
//! ```
//!
//! 日志级别通过 `RUST_LOG` 控制，例如 `RUST_LOG=jspace_model=debug`。

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;
mod validation;

use commands::{ConfigCommand, DynamicsCommand, InfoCommand, JacobianCommand};

/// jspace CLI - 关节空间动力学命令行工具
#[derive(Parser, Debug)]
#[command(name = "jspace-cli")]
#[command(about = "Inspect kinematics and dynamics of articulated rigid-body models", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 显示模型结构
    Info {
        #[command(flatten)]
        args: InfoCommand,
    },

    /// 计算重力、科氏力、质量矩阵及其逆
    Dynamics {
        #[command(flatten)]
        args: DynamicsCommand,
    },

    /// 计算连杆位姿和雅可比
    Jacobian {
        #[command(flatten)]
        args: JacobianCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jspace_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),
        Commands::Info { args } => args.execute(),
        Commands::Dynamics { args } => args.execute(),
        Commands::Jacobian { args } => args.execute(),
    }
}
