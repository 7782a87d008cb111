use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 基准语言的翻译目录: 命名空间 -> (键 -> 翻译文本)
///
/// 每个嵌套的 JSON 对象都会以点分隔路径注册为一个命名空间，
/// 命名空间下的键包含所有相对路径（叶子和中间对象）。例如
/// `{"Home": {"hero": {"title": "Hi"}}}` 会得到:
///
/// - `Home`: `hero`, `hero.title`
/// - `Home.hero`: `title`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    namespaces: BTreeMap<String, BTreeMap<String, String>>,
}

impl Catalog {
    /// 直接由命名空间映射构建
    pub fn from_namespaces(namespaces: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self { namespaces }
    }

    /// 从文件加载
    pub fn load(path: &Path) -> Result<Self> {
        info!("正在解析翻译文件: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取文件: {}", path.display()))?;
        let catalog = Self::from_json_str(&content)
            .with_context(|| format!("无法解析 JSON 文件: {}", path.display()))?;

        info!("解析完成，找到 {} 个命名空间", catalog.namespaces.len());
        Ok(catalog)
    }

    /// 解析 JSON 文本，顶层必须是对象
    pub fn from_json_str(content: &str) -> Result<Self> {
        let root: serde_json::Value = serde_json::from_str(content)?;

        let serde_json::Value::Object(map) = root else {
            bail!("JSON 顶层必须是对象");
        };

        let mut namespaces = BTreeMap::new();
        for (name, value) in &map {
            if value.is_object() {
                register_namespace(name, value, &mut namespaces);
            } else {
                debug!("顶层键 {} 不是对象，不作为命名空间", name);
            }
        }

        Ok(Self { namespaces })
    }

    /// 获取命名空间下的全部键
    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, String>> {
        self.namespaces.get(namespace)
    }

    /// 键是否存在；命名空间不存在时视为空集合
    pub fn contains_key(&self, namespace: &str, key: &str) -> bool {
        self.namespace(namespace)
            .map(|keys| keys.contains_key(key))
            .unwrap_or(false)
    }

    /// 命名空间名称，按字母顺序
    pub fn namespace_names(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// 注册 `path` 处的对象为命名空间，并递归注册其中的子对象
fn register_namespace(
    path: &str,
    value: &serde_json::Value,
    namespaces: &mut BTreeMap<String, BTreeMap<String, String>>,
) {
    let serde_json::Value::Object(map) = value else {
        return;
    };

    let mut keys = BTreeMap::new();
    collect_relative_keys(value, "", &mut keys);
    // 顶层的 "Home.hero" 与嵌套的 Home -> hero 指向同一个命名空间，合并两者的键
    if namespaces.contains_key(path) {
        debug!("命名空间 {} 被重复定义，合并其中的键", path);
    }
    namespaces.entry(path.to_string()).or_default().extend(keys);

    for (name, child) in map {
        if child.is_object() {
            register_namespace(&format!("{}.{}", path, name), child, namespaces);
        }
    }
}

/// 收集对象下所有的相对键，键使用点分隔
fn collect_relative_keys(
    value: &serde_json::Value,
    prefix: &str,
    keys: &mut BTreeMap<String, String>,
) {
    let serde_json::Value::Object(map) = value else {
        return;
    };

    for (key, val) in map {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match val {
            serde_json::Value::String(s) => {
                keys.insert(full_key, s.clone());
            }
            serde_json::Value::Object(_) => {
                keys.insert(full_key.clone(), val.to_string());
                collect_relative_keys(val, &full_key, keys);
            }
            _ => {
                // 数字、布尔等使用 JSON 文本
                keys.insert(full_key, val.to_string());
            }
        }
    }
}

/// 统计翻译目录中除基准语言以外的 JSON 翻译文件数量
pub fn count_other_locales(messages_path: &Path, primary_locale: &str) -> usize {
    let Ok(entries) = fs::read_dir(messages_path) else {
        debug!("无法读取翻译文件目录: {}", messages_path.display());
        return 0;
    };

    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .filter(|path| path.file_stem().and_then(|s| s.to_str()) != Some(primary_locale))
        .count()
}
