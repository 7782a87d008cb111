use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 项目根目录下的可选配置文件名
pub const CONFIG_FILE_NAME: &str = "i18n-guard.toml";

fn default_messages_dir() -> String {
    "messages".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

fn default_include_pattern() -> String {
    r"/components/tools/[A-Z][^/]+\.tsx$".to_string()
}

/// 默认识别的翻译访问器工厂函数
pub fn default_accessors() -> Vec<String> {
    vec!["useTranslations".to_string(), "getTranslations".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["tsx", "ts", "jsx", "js"].map(String::from).to_vec()
}

/// 应用程序配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 项目根目录
    #[serde(skip)]
    pub project_path: PathBuf,
    /// 翻译文件目录
    #[serde(default = "default_messages_dir")]
    pub messages_dir: String,
    /// 作为基准的语言
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    /// hook 模式下需要检查的文件路径（正则表达式）
    #[serde(default = "default_include_pattern")]
    pub include_pattern: String,
    /// 返回翻译函数的工厂函数名
    #[serde(default = "default_accessors")]
    pub accessors: Vec<String>,
    /// check 模式下扫描的文件扩展名
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// 详细输出模式
    #[serde(skip)]
    pub verbose: bool,
}

/// 命令行参数对配置文件的覆盖
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub messages_dir: Option<String>,
    pub primary_locale: Option<String>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from("."),
            messages_dir: default_messages_dir(),
            primary_locale: default_primary_locale(),
            include_pattern: default_include_pattern(),
            accessors: default_accessors(),
            extensions: default_extensions(),
            verbose: false,
        }
    }
}

impl Config {
    /// 从项目根目录加载配置，没有配置文件时使用默认值
    pub fn load(project_path: &Path) -> Result<Self> {
        let config_path = project_path.join(CONFIG_FILE_NAME);

        let mut config = if config_path.is_file() {
            info!("正在读取配置文件: {}", config_path.display());
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("无法读取配置文件: {}", config_path.display()))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("无法解析配置文件: {}", config_path.display()))?
        } else {
            debug!("未找到配置文件 {}，使用默认配置", config_path.display());
            Config::default()
        };

        config.project_path = project_path.to_path_buf();
        Ok(config)
    }

    /// 加载配置文件并应用命令行参数
    pub fn load_with_overrides(project_path: &Path, overrides: &Overrides) -> Result<Self> {
        let mut config = Self::load(project_path)?;

        if let Some(messages_dir) = &overrides.messages_dir {
            config.messages_dir = messages_dir.clone();
        }
        if let Some(locale) = &overrides.primary_locale {
            config.primary_locale = locale.clone();
        }
        config.verbose = overrides.verbose;

        Ok(config)
    }

    /// 获取翻译文件目录的完整路径
    pub fn messages_path(&self) -> PathBuf {
        self.project_path.join(&self.messages_dir)
    }

    /// 获取基准语言翻译文件的完整路径
    pub fn catalog_path(&self) -> PathBuf {
        self.messages_path()
            .join(format!("{}.json", self.primary_locale))
    }

    /// 编译 include_pattern
    pub fn include_regex(&self) -> Result<Regex> {
        Regex::new(&self.include_pattern)
            .with_context(|| format!("include_pattern 不是有效的正则表达式: {}", self.include_pattern))
    }

    /// 文件扩展名是否在扫描范围内
    pub fn is_scanned_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}
