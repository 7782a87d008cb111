use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::analyzer::MissingKey;

/// 单个文件的检查结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// 文件路径（相对项目根目录）
    pub file_path: String,
    /// 组件名，即文件名去掉扩展名
    pub component: String,
    /// 缺失的翻译键
    pub missing_keys: Vec<MissingKey>,
}

impl FileReport {
    pub fn new(file_path: &Path, display_path: String, missing_keys: Vec<MissingKey>) -> Self {
        let component = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Self {
            file_path: display_path,
            component,
            missing_keys,
        }
    }

    fn file_name(&self) -> &str {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_path)
    }
}

/// 统计信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    /// 扫描的文件数量
    pub files_scanned: usize,
    /// 存在缺失键的文件数量
    pub files_with_findings: usize,
    /// 缺失键总数
    pub total_missing: usize,
}

/// check 命令的完整报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// 基准翻译文件路径
    pub catalog_path: String,
    /// 其余语言文件数量
    #[serde(skip)]
    pub other_locales: usize,
    /// 存在缺失键的文件
    pub files: Vec<FileReport>,
    pub stats: Stats,
}

impl CheckReport {
    pub fn new(catalog_path: String, other_locales: usize, files_scanned: usize, files: Vec<FileReport>) -> Self {
        let files: Vec<FileReport> = files
            .into_iter()
            .filter(|f| !f.missing_keys.is_empty())
            .collect();
        let stats = Stats {
            files_scanned,
            files_with_findings: files.len(),
            total_missing: files.iter().map(|f| f.missing_keys.len()).sum(),
        };

        Self {
            catalog_path,
            other_locales,
            files,
            stats,
        }
    }
}

/// 输出单个文件的缺失键警告
pub fn write_file_warning(
    writer: &mut dyn Write,
    file: &FileReport,
    catalog_path: &str,
    other_locales: usize,
) -> Result<()> {
    writeln!(
        writer,
        "\n{}",
        format!("⚠️  [{}] 检测到缺失的翻译键!", file.file_name()).bold().yellow()
    )?;

    for missing in &file.missing_keys {
        writeln!(
            writer,
            "  {} {} → [\"{}\"][\"{}\"]",
            "✗".red(),
            catalog_path,
            missing.namespace,
            missing.key.red()
        )?;
    }

    writeln!(
        writer,
        "\n这些键会在界面上以 \"{}.keyName\" 形式的原始字符串显示。",
        file.component
    )?;
    if other_locales > 0 {
        writeln!(
            writer,
            "请在 {} 中添加这些键，并同步更新其余 {} 个语言文件。\n",
            catalog_path, other_locales
        )?;
    } else {
        writeln!(writer, "请在 {} 中添加这些键。\n", catalog_path)?;
    }

    Ok(())
}

/// 生成文本格式的报告
pub fn print_text_report(writer: &mut dyn Write, report: &CheckReport) -> Result<()> {
    for file in &report.files {
        write_file_warning(writer, file, &report.catalog_path, report.other_locales)?;
    }

    writeln!(writer, "{}", "统计信息:".bold())?;
    writeln!(writer, "  扫描的文件数量: {}", report.stats.files_scanned)?;
    writeln!(writer, "  存在缺失键的文件数量: {}", report.stats.files_with_findings)?;
    writeln!(writer, "  缺失的翻译键数量: {}", report.stats.total_missing)?;

    if report.stats.total_missing == 0 {
        writeln!(writer, "\n{}", "未发现缺失的翻译键。".green())?;
    }

    Ok(())
}

/// 生成 JSON 格式的报告
pub fn print_json_report(writer: &mut dyn Write, report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

/// 生成 YAML 格式的报告
pub fn print_yaml_report(writer: &mut dyn Write, report: &CheckReport) -> Result<()> {
    let yaml = serde_yaml::to_string(report)?;
    write!(writer, "{}", yaml)?;
    Ok(())
}
