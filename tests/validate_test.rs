use i18n_guard::analyzer::{self, MissingKey};
use i18n_guard::parser::Catalog;
use i18n_guard::scanner::KeyScanner;

fn catalog(json: &str) -> Catalog {
    Catalog::from_json_str(json).unwrap()
}

#[test]
fn test_reports_missing_key_in_bound_namespace() {
    let source = r#"
export default function Home() {
  const t = useTranslations("Home");
  return (
    <section>
      <h1>{t("title")}</h1>
      <p>{t("subtitle")}</p>
    </section>
  );
}
"#;
    let catalog = catalog(r#"{"Home": {"title": "Welcome"}}"#);

    assert_eq!(
        analyzer::validate(source, &catalog),
        vec![MissingKey::new("Home", "subtitle")]
    );
}

#[test]
fn test_each_alias_uses_its_own_namespace() {
    let source = r#"
const t = useTranslations("Home");
const tCommon = useTranslations("Common");
<button>{tCommon("ok")}</button>
<p>{t("missing")}</p>
"#;
    let catalog = catalog(r#"{"Home": {}, "Common": {"ok": "OK"}}"#);

    assert_eq!(
        analyzer::validate(source, &catalog),
        vec![MissingKey::new("Home", "missing")]
    );
}

#[test]
fn test_no_bindings_means_no_findings() {
    let source = r#"
export function Plain() {
  return <p>{t("anything")}</p>;
}
"#;
    let catalog = catalog(r#"{"Home": {}}"#);

    assert!(analyzer::validate(source, &catalog).is_empty());
}

#[test]
fn test_present_keys_produce_no_findings() {
    let source = r#"
const t = useTranslations("Home");
t("title"); t('subtitle');
"#;
    let catalog = catalog(r#"{"Home": {"title": "A", "subtitle": "B"}}"#);

    assert!(analyzer::validate(source, &catalog).is_empty());
}

#[test]
fn test_repeated_usage_reported_once() {
    let source = r#"
const t = useTranslations("Home");
t("gone"); t("gone"); t('gone');
t.rich("gone", { b: (chunks) => <b>{chunks}</b> });
"#;
    let catalog = catalog(r#"{"Home": {}}"#);

    assert_eq!(
        analyzer::validate(source, &catalog),
        vec![MissingKey::new("Home", "gone")]
    );
}

#[test]
fn test_two_aliases_for_same_namespace_reported_once() {
    let source = r#"
const t = useTranslations("Home");
const th = useTranslations("Home");
t("gone"); th("gone");
"#;
    let catalog = catalog(r#"{"Home": {}}"#);

    assert_eq!(
        analyzer::validate(source, &catalog),
        vec![MissingKey::new("Home", "gone")]
    );
}

#[test]
fn test_findings_sorted_by_namespace_then_key() {
    let source = r#"
const z = useTranslations("Zeta");
const a = useTranslations("Alpha");
z("x"); a("b"); a("a");
"#;
    let catalog = catalog(r#"{"Alpha": {}, "Zeta": {}}"#);

    assert_eq!(
        analyzer::validate(source, &catalog),
        vec![
            MissingKey::new("Alpha", "a"),
            MissingKey::new("Alpha", "b"),
            MissingKey::new("Zeta", "x"),
        ]
    );
}

#[test]
fn test_absent_namespace_treated_as_empty() {
    let source = r#"
const t = useTranslations("Nowhere");
t("title");
"#;
    let catalog = catalog(r#"{"Home": {"title": "A"}}"#);

    assert_eq!(
        analyzer::validate(source, &catalog),
        vec![MissingKey::new("Nowhere", "title")]
    );
}

#[test]
fn test_non_literal_keys_are_ignored() {
    let source = r#"
const t = useTranslations("Home");
const key = "dynamic";
t(key);
t(`prefix.${key}`);
t("prefix." + key);
t();
"#;
    let catalog = catalog(r#"{"Home": {}}"#);

    assert!(analyzer::validate(source, &catalog).is_empty());
}

#[test]
fn test_nested_keys_and_dotted_namespaces_resolve() {
    let source = r#"
const t = useTranslations("Home");
const tHero = await getTranslations({ locale, namespace: "Home.hero" });
t("hero.title");
tHero("title");
tHero("cta");
"#;
    let catalog = catalog(r#"{"Home": {"hero": {"title": "Hi"}}}"#);

    assert_eq!(
        analyzer::validate(source, &catalog),
        vec![MissingKey::new("Home.hero", "cta")]
    );
}

#[test]
fn test_custom_accessor_names() {
    let source = r#"
const t = useScopedI18n("Home");
const u = useTranslations("Home");
t("custom"); u("ignored");
"#;
    let catalog = catalog(r#"{"Home": {}}"#);
    let scanner = KeyScanner::new(&["useScopedI18n".to_string()]).unwrap();

    assert_eq!(
        analyzer::validate_with(&scanner, source, &catalog),
        vec![MissingKey::new("Home", "custom")]
    );
}

#[test]
fn test_no_accessors_configured_means_no_findings() {
    let source = r#"
const t = useTranslations("Home");
t("gone");
"#;
    let catalog = catalog(r#"{"Home": {}}"#);
    let scanner = KeyScanner::new(&[]).unwrap();

    assert!(analyzer::validate_with(&scanner, source, &catalog).is_empty());
}
