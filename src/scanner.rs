use anyhow::{Context, Result};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::config::default_accessors;

/// 字面量字符串参数: "..."、'...' 或不含插值的 `...`
///
/// 占用三个捕获组，依次对应三种引号。
const LITERAL: &str = r#"(?:"([^"\n]+)"|'([^'\n]+)'|`([^`$\n]+)`)"#;

/// next-intl 翻译函数上返回富文本或原始值的方法，第一个参数同样是键
const KEY_METHODS: &str = r"(?:\.(?:rich|markup|raw))?";

/// 使用默认访问器的扫描器，只编译一次
static DEFAULT_SCANNER: LazyLock<KeyScanner> = LazyLock::new(|| {
    KeyScanner::new(&default_accessors()).unwrap_or_else(|err| {
        warn!("无法编译默认访问器模式，将不会识别任何绑定: {:#}", err);
        KeyScanner { binding_regex: None }
    })
});

/// 扫描源代码中的翻译访问器绑定与翻译键调用
///
/// 只做文本层面的模式匹配，不解析语法树。动态计算的命名空间或键无法被识别，
/// 对应的片段会被直接忽略。
#[derive(Debug, Clone)]
pub struct KeyScanner {
    /// 匹配 `const t = useTranslations("Namespace")` 等绑定语句
    binding_regex: Option<Regex>,
}

impl KeyScanner {
    /// 根据访问器工厂函数名（如 `useTranslations`）构建扫描器
    pub fn new(accessors: &[String]) -> Result<Self> {
        if accessors.is_empty() {
            warn!("未配置任何翻译访问器，将不会识别任何绑定");
            return Ok(Self { binding_regex: None });
        }

        let names = accessors
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        // 匹配以下几种形式:
        // 1. const t = useTranslations("Home")
        // 2. const t = await getTranslations("Home")
        // 3. const t = await getTranslations({ locale, namespace: "Home" })
        let pattern = format!(
            r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:await\s+)?(?:{names})\s*\(\s*(?:{LITERAL}|\{{[^}}]*?\bnamespace\s*:\s*{LITERAL}[^}}]*\}})\s*\)"
        );
        let binding_regex = Regex::new(&pattern)
            .with_context(|| format!("无法编译访问器绑定模式: {}", names))?;

        Ok(Self {
            binding_regex: Some(binding_regex),
        })
    }

    /// 共享的默认扫描器
    pub fn shared() -> &'static KeyScanner {
        &DEFAULT_SCANNER
    }

    /// 查找所有「别名 -> 命名空间」绑定
    ///
    /// 同一个别名被多次绑定时，以最后一次为准。
    pub fn find_accessor_bindings(&self, content: &str) -> BTreeMap<String, String> {
        let mut bindings = BTreeMap::new();
        let Some(binding_regex) = &self.binding_regex else {
            return bindings;
        };

        for cap in binding_regex.captures_iter(content) {
            let Some(alias) = cap.get(1) else {
                continue;
            };
            // 2-4 为直接参数，5-7 为 options 对象中的 namespace
            let Some(namespace) = literal_text(&cap, 2).or_else(|| literal_text(&cap, 5)) else {
                continue;
            };

            debug!("找到访问器绑定: {} -> {}", alias.as_str(), namespace);
            if let Some(previous) = bindings.insert(alias.as_str().to_string(), namespace.to_string()) {
                debug!("别名 {} 被重新绑定，覆盖之前的命名空间 {}", alias.as_str(), previous);
            }
        }

        bindings
    }

    /// 查找以 `alias` 调用且第一个参数为字面量字符串的所有键，按字母顺序去重
    pub fn find_usages(&self, content: &str, alias: &str) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();

        let pattern = format!(
            r"{}{KEY_METHODS}\s*\(\s*{LITERAL}\s*[,)]",
            regex::escape(alias)
        );
        let usage_regex = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(err) => {
                warn!("无法为别名 {} 构建调用模式: {}", alias, err);
                return keys;
            }
        };

        for cap in usage_regex.captures_iter(content) {
            let Some(whole) = cap.get(0) else {
                continue;
            };
            // 别名前面不能紧跟标识符字符或成员访问，如 tCommon、format、i18n.t
            if content[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(|c| is_identifier_char(c) || c == '.')
            {
                continue;
            }

            if let Some(key) = literal_text(&cap, 1) {
                keys.insert(key.to_string());
            }
        }

        keys
    }
}

impl Default for KeyScanner {
    fn default() -> Self {
        DEFAULT_SCANNER.clone()
    }
}

/// 使用默认访问器查找绑定
pub fn find_accessor_bindings(content: &str) -> BTreeMap<String, String> {
    DEFAULT_SCANNER.find_accessor_bindings(content)
}

/// 查找别名的字面量键调用
pub fn find_usages(content: &str, alias: &str) -> BTreeSet<String> {
    DEFAULT_SCANNER.find_usages(content, alias)
}

/// 从 LITERAL 占用的三个捕获组中取出实际匹配的内容
fn literal_text<'a>(cap: &Captures<'a>, first_group: usize) -> Option<&'a str> {
    (first_group..first_group + 3)
        .find_map(|idx| cap.get(idx))
        .map(|m| m.as_str())
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
