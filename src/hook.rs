use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// 编辑后 hook 通过 stdin 传入的事件，只关心被编辑的文件路径
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookEvent {
    #[serde(default)]
    pub tool_input: ToolInput,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub file_path: String,
}

impl HookEvent {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).context("无法解析 hook 事件")
    }

    pub fn file_path(&self) -> Option<&str> {
        Some(self.tool_input.file_path.as_str()).filter(|p| !p.is_empty())
    }
}

/// 文件路径是否匹配 include 模式，路径分隔符统一为 `/`
pub fn matches_include(file_path: &str, include: &Regex) -> bool {
    include.is_match(&file_path.replace('\\', "/"))
}
