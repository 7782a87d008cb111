use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::borrow::Cow;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::hook::{self, HookEvent};
use crate::config::{Config, Overrides};
use crate::{analyzer, parser, parser::Catalog, report, scanner::KeyScanner};
use crate::report::{CheckReport, FileReport};

/// 扫描时跳过的目录
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// 在项目根目录下加载配置并运行 hook
///
/// 配置文件无效时同样静默跳过。
pub fn run_hook_for_project(
    project_path: &Path,
    overrides: &Overrides,
    input: impl Read,
    writer: &mut dyn Write,
) -> Result<()> {
    let config = match Config::load_with_overrides(project_path, overrides) {
        Ok(config) => config,
        Err(err) => {
            debug!("跳过检查: {:#}", err);
            return Ok(());
        }
    };
    run_hook_command(&config, input, writer)
}

/// hook 命令的入口点
///
/// 检查是尽力而为的: 任何错误都只记录在 debug 日志中，永远不会让调用方失败。
pub fn run_hook_command(config: &Config, input: impl Read, writer: &mut dyn Write) -> Result<()> {
    match hook_check(config, input) {
        Ok(Some((file, other_locales))) => {
            let catalog_path = display_path(&config.catalog_path(), &config.project_path);
            if let Err(err) = report::write_file_warning(writer, &file, &catalog_path, other_locales) {
                debug!("无法输出警告: {:#}", err);
            }
        }
        Ok(None) => {}
        Err(err) => debug!("跳过检查: {:#}", err),
    }
    Ok(())
}

/// 处理 hook 事件，只有发现缺失键时才返回报告
fn hook_check(config: &Config, input: impl Read) -> Result<Option<(FileReport, usize)>> {
    // 1. 解析 hook 事件
    let event = HookEvent::from_reader(input)?;
    let Some(file_path) = event.file_path() else {
        debug!("hook 事件中没有文件路径");
        return Ok(None);
    };

    // 2. 只检查匹配 include 模式的文件
    if !hook::matches_include(file_path, &config.include_regex()?) {
        debug!("文件不在检查范围内: {}", file_path);
        return Ok(None);
    }

    let file_path = Path::new(file_path);
    if !file_path.is_file() {
        debug!("文件不存在: {}", file_path.display());
        return Ok(None);
    }

    let catalog_path = config.catalog_path();
    if !catalog_path.is_file() {
        debug!("翻译文件不存在: {}", catalog_path.display());
        return Ok(None);
    }

    // 3. 加载翻译目录并检查
    let catalog = Catalog::load(&catalog_path)?;
    let scanner = KeyScanner::new(&config.accessors)?;
    let file = check_file(&scanner, &catalog, file_path, config)?;

    if file.missing_keys.is_empty() {
        return Ok(None);
    }

    let other_locales = parser::count_other_locales(&config.messages_path(), &config.primary_locale);
    Ok(Some((file, other_locales)))
}

/// check 命令的入口点
pub fn run_check_command(
    config: &Config,
    paths: &[PathBuf],
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let report = check_paths(config, paths)?;

    let mut writer: Box<dyn Write> = if let Some(output_path) = output {
        Box::new(
            fs::File::create(output_path)
                .with_context(|| format!("无法创建报告文件: {}", output_path.display()))?,
        )
    } else {
        Box::new(std::io::stdout())
    };

    match format {
        "json" => report::print_json_report(&mut writer, &report)?,
        "yaml" => report::print_yaml_report(&mut writer, &report)?,
        "text" => report::print_text_report(&mut writer, &report)?,
        _ => bail!("不支持的输出格式: {}，支持的格式: text, json, yaml", format),
    }

    if let Some(output_path) = output {
        info!("报告已写入文件: {}", output_path.display());
    }

    Ok(())
}

/// 检查给定的文件和目录，生成报告
pub fn check_paths(config: &Config, paths: &[PathBuf]) -> Result<CheckReport> {
    // 1. 解析基准翻译文件
    let catalog_path = config.catalog_path();
    let catalog = Catalog::load(&catalog_path).context("解析翻译文件失败")?;
    let scanner = KeyScanner::new(&config.accessors)?;

    // 2. 收集源文件
    let source_files = collect_source_files(config, paths)?;
    if config.verbose {
        println!("找到 {} 个源文件。", source_files.len());
    }

    // 3. 逐个检查
    let mut files = Vec::new();
    for path in &source_files {
        let file = check_file(&scanner, &catalog, path, config)?;
        if config.verbose && !file.missing_keys.is_empty() {
            println!("  {}: {} 个缺失的键", file.file_path, file.missing_keys.len());
        }
        files.push(file);
    }

    let other_locales = parser::count_other_locales(&config.messages_path(), &config.primary_locale);
    let report = CheckReport::new(
        display_path(&catalog_path, &config.project_path),
        other_locales,
        source_files.len(),
        files,
    );

    info!(
        "检查完成: {} 个文件，{} 个缺失的翻译键",
        report.stats.files_scanned, report.stats.total_missing
    );
    Ok(report)
}

/// 检查单个源文件
pub fn check_file(scanner: &KeyScanner, catalog: &Catalog, path: &Path, config: &Config) -> Result<FileReport> {
    debug!("处理文件: {}", path.display());

    let bytes = fs::read(path)
        .with_context(|| format!("无法读取文件: {}", path.display()))?;
    // 非 UTF-8 内容按有损解码处理，最多只会少识别几个键
    let content = String::from_utf8_lossy(&bytes);
    if matches!(content, Cow::Owned(_)) {
        warn!("文件不是有效的 UTF-8，已按有损方式解码: {}", path.display());
    }
    let missing_keys = analyzer::validate_with(scanner, &content, catalog);

    Ok(FileReport::new(
        path,
        display_path(path, &config.project_path),
        missing_keys,
    ))
}

/// 收集待检查的源文件，结果已排序
///
/// 指定的路径必须是已存在的文件或目录。
pub fn collect_source_files(config: &Config, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            bail!("路径不存在或不是文件/目录: {}", root.display());
        }

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("跳过无法访问的路径: {}", err);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && config.is_scanned_extension(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// 跳过隐藏目录（如 .next、.git）和 node_modules，根目录本身除外
fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
        .unwrap_or(false)
}

/// 相对项目根目录的显示路径
fn display_path(path: &Path, project_path: &Path) -> String {
    pathdiff::diff_paths(path, project_path)
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
