use i18n_guard::scanner::{KeyScanner, find_accessor_bindings, find_usages};
use i18n_guard::config::default_accessors;
use std::collections::{BTreeMap, BTreeSet};

fn bindings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(alias, ns)| (alias.to_string(), ns.to_string()))
        .collect()
}

fn keys(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_bindings_in_all_supported_forms() {
    let source = r#"
const t = useTranslations("Home");
let tc = useTranslations('Common');
var tb = useTranslations(`Backtick`);
const tTools = await getTranslations("Tools");
const tCat = await getTranslations({ locale, namespace: "Categories.developer" });
const tMeta = await getTranslations({ namespace: 'Meta', locale });
const tWrapped = useTranslations(
  "Wrapped"
);
"#;

    assert_eq!(
        find_accessor_bindings(source),
        bindings(&[
            ("t", "Home"),
            ("tc", "Common"),
            ("tb", "Backtick"),
            ("tTools", "Tools"),
            ("tCat", "Categories.developer"),
            ("tMeta", "Meta"),
            ("tWrapped", "Wrapped"),
        ])
    );
}

#[test]
fn test_computed_namespaces_produce_no_binding() {
    let source = r#"
const t = useTranslations(namespace);
const tTools = await getTranslations({ locale, namespace: `Tools.${SLUG}` });
const tx = useTranslations("Tools." + slug);
const tNone = useTranslations();
"#;

    assert!(find_accessor_bindings(source).is_empty());
}

#[test]
fn test_later_binding_wins() {
    let source = r#"
function A() { const t = useTranslations("First"); }
function B() { const t = useTranslations("Second"); }
"#;

    assert_eq!(find_accessor_bindings(source), bindings(&[("t", "Second")]));
}

#[test]
fn test_usages_with_literal_first_argument() {
    let source = r#"
t("double");
t('single');
t(`backtick`);
t("withValues", { count: 3 });
t.rich("rich", { b: (c) => <b>{c}</b> });
t.markup("markup", {});
t.raw("raw");
t(
  "multiline"
);
[t("first"),t("second")]
"#;

    assert_eq!(
        find_usages(source, "t"),
        keys(&[
            "backtick",
            "double",
            "first",
            "markup",
            "multiline",
            "raw",
            "rich",
            "second",
            "single",
            "withValues",
        ])
    );
}

#[test]
fn test_usages_ignore_non_literal_and_other_identifiers() {
    let source = r#"
t(key);
t(`dynamic.${key}`);
t("concat" + key);
t();
t.has("checked");
tCommon("other");
format("notAKey");
i18n.t("member");
$t("dollar");
"#;

    assert!(find_usages(source, "t").is_empty());
}

#[test]
fn test_usages_are_deduplicated_and_sorted() {
    let source = r#"t("b"); t("a"); t("b"); t('a');"#;

    let found: Vec<String> = find_usages(source, "t").into_iter().collect();
    assert_eq!(found, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_alias_with_dollar_sign() {
    let source = r#"$t("dollar"); t("plain");"#;

    assert_eq!(find_usages(source, "$t"), keys(&["dollar"]));
}

#[test]
fn test_shared_scanner_matches_default_accessors() {
    let source = r#"
const t = useTranslations("Home");
const tTools = await getTranslations({ locale, namespace: "Tools" });
"#;
    let explicit = KeyScanner::new(&default_accessors()).unwrap();

    assert_eq!(
        KeyScanner::shared().find_accessor_bindings(source),
        explicit.find_accessor_bindings(source)
    );
    assert_eq!(
        KeyScanner::default().find_accessor_bindings(source),
        find_accessor_bindings(source)
    );
    // 重复调用得到相同结果
    assert_eq!(find_accessor_bindings(source), find_accessor_bindings(source));
    assert_eq!(find_accessor_bindings(source).len(), 2);
}
