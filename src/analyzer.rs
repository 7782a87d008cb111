use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::parser::Catalog;
use crate::scanner::KeyScanner;

/// 被引用但未在翻译目录中定义的键
///
/// 字段顺序决定排序: 先按命名空间，再按键。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MissingKey {
    /// 访问器绑定的命名空间
    pub namespace: String,
    /// 翻译键
    pub key: String,
}

impl MissingKey {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }
}

/// 使用默认访问器检查源代码中缺失的翻译键
pub fn validate(content: &str, catalog: &Catalog) -> Vec<MissingKey> {
    validate_with(KeyScanner::shared(), content, catalog)
}

/// 检查源代码中缺失的翻译键，结果按 (命名空间, 键) 排序且不重复
pub fn validate_with(scanner: &KeyScanner, content: &str, catalog: &Catalog) -> Vec<MissingKey> {
    let bindings = scanner.find_accessor_bindings(content);
    if bindings.is_empty() {
        debug!("未找到任何访问器绑定，跳过检查");
        return Vec::new();
    }

    let mut missing = BTreeSet::new();
    for (alias, namespace) in &bindings {
        for key in scanner.find_usages(content, alias) {
            if !catalog.contains_key(namespace, &key) {
                debug!("缺失的翻译键: {}.{} (通过 {} 调用)", namespace, key, alias);
                missing.insert(MissingKey::new(namespace.as_str(), key));
            }
        }
    }

    missing.into_iter().collect()
}
