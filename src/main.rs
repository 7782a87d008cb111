use i18n_guard::actions;
use i18n_guard::config::{Config, Overrides};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

/// i18n-guard - 检查 next-intl 组件中引用但未定义的翻译键
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 项目根目录，默认为当前目录
    #[arg(short, long, env = "CLAUDE_PROJECT_DIR", default_value = ".")]
    path: PathBuf,

    /// 翻译文件目录，覆盖配置文件中的值
    #[arg(long)]
    messages_dir: Option<String>,

    /// 作为基准的语言，覆盖配置文件中的值
    #[arg(long)]
    locale: Option<String>,

    /// 详细输出模式
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 从 stdin 读取编辑事件并检查被编辑的文件（默认命令）
    Hook,
    /// 检查指定的文件或目录
    Check {
        /// 要检查的文件或目录，默认为项目根目录
        paths: Vec<PathBuf>,

        /// 输出格式: text, json, yaml
        #[arg(short, long, default_value = "text", value_parser = ["text", "json", "yaml"])]
        format: String,

        /// 输出文件路径，如未指定则输出到控制台
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let overrides = cli.overrides();

    match cli.command.as_ref().unwrap_or(&Commands::Hook) {
        Commands::Hook => {
            // hook 永远不能让调用方失败，配置错误也静默跳过
            actions::run_hook_for_project(&cli.path, &overrides, io::stdin().lock(), &mut io::stdout())?
        }
        Commands::Check { paths, format, output } => {
            let config = Config::load_with_overrides(&cli.path, &overrides)?;
            let paths = if paths.is_empty() {
                vec![config.project_path.clone()]
            } else {
                paths.clone()
            };
            actions::run_check_command(&config, &paths, format, output.as_deref())?
        }
    }

    Ok(())
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            messages_dir: self.messages_dir.clone(),
            primary_locale: self.locale.clone(),
            verbose: self.verbose,
        }
    }
}
