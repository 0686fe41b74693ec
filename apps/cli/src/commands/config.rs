//! 配置管理命令
//!
//! 用于查看、检查和生成模型配置文件（重力、重力补偿屏蔽）

use anyhow::{Context, Result};
use clap::Subcommand;
use jspace_model::ModelConfig;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 显示配置（缺省路径时显示默认配置）
    Show {
        /// 配置文件路径
        path: Option<PathBuf>,
    },

    /// 检查配置文件
    Check {
        /// 配置文件路径
        path: PathBuf,
    },

    /// 写出默认配置
    Init {
        /// 输出路径
        #[arg(default_value = "jspace.toml")]
        path: PathBuf,

        /// 覆盖已存在的文件
        #[arg(short, long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show { path } => Self::show_(path),

            ConfigCommand::Check { path } => Self::check_(path),

            ConfigCommand::Init { path, force } => Self::init_(path, force),
        }
    }

    fn show_(path: Option<PathBuf>) -> Result<()> {
        let config = match &path {
            Some(path) => ModelConfig::load_from_file(path)?,
            None => ModelConfig::default(),
        };

        print!("{}", config.to_toml_string()?);
        Ok(())
    }

    fn check_(path: PathBuf) -> Result<()> {
        let config = ModelConfig::load_from_file(&path)
            .with_context(|| format!("配置无效: {}", path.display()))?;

        println!("配置文件: {}", path.display());
        println!("  重力: {:?}", config.gravity);
        println!(
            "  关闭重力补偿: {:?}",
            config.gravity_compensation_disabled
        );
        println!("✅ 配置有效");
        Ok(())
    }

    fn init_(path: PathBuf, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!("{} 已存在（使用 --force 覆盖）", path.display());
        }

        let content = format!(
            "# jspace 模型配置\n\n{}",
            ModelConfig::default().to_toml_string()?
        );
        fs::write(&path, content).context("写入配置文件失败")?;

        info!("写出默认配置: {}", path.display());
        println!("✅ 已写出 {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jspace.toml");

        ConfigCommand::Init {
            path: path.clone(),
            force: false,
        }
        .execute()
        .unwrap();
        assert_eq!(
            ModelConfig::load_from_file(&path).unwrap(),
            ModelConfig::default()
        );

        ConfigCommand::Check { path: path.clone() }.execute().unwrap();

        // 已存在且未加 --force
        let err = ConfigCommand::Init {
            path: path.clone(),
            force: false,
        }
        .execute()
        .unwrap_err();
        assert!(err.to_string().contains("已存在"));

        ConfigCommand::Init { path, force: true }.execute().unwrap();
    }

    #[test]
    fn test_check_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "gravity = \"down\"\n").unwrap();
        assert!(ConfigCommand::Check { path }.execute().is_err());
    }
}
