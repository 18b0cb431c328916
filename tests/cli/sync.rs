use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, MockProvider, stderr, stdout};

const SENTINEL: &str = "[translation failed]";

#[test]
fn test_sync_translates_missing_key() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::translating_to("Bonjour")?;
    test.use_provider(&provider)?;
    test.write_json("messages/en.json", &json!({"x": {"y": "Hello"}}))?;
    test.write_json("messages/fr.json", &json!({}))?;

    let output = test.sync_command().args(["--api-key", "test-key"]).output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_json("messages/fr.json")?, json!({"x": {"y": "Bonjour"}}));
    assert_eq!(test.read_json("messages/en.json")?, json!({"x": {"y": "Hello"}}));
    assert_eq!(provider.requests(), 1);
    assert!(stdout(&output).contains("en -> fr: 1 translated, 0 skipped, 0 failed"));

    Ok(())
}

#[test]
fn test_sync_reads_api_key_from_env() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::translating_to("Bonjour")?;
    test.use_provider(&provider)?;
    test.write_json("messages/en.json", &json!({"x": {"y": "Hello"}}))?;
    test.write_json("messages/fr.json", &json!({}))?;

    let output = test
        .sync_command()
        .env("GOOGLE_AI_API_KEY", "test-key")
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(provider.requests(), 1);

    Ok(())
}

#[test]
fn test_sync_rate_limited_writes_sentinel() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::rate_limited()?;
    test.use_provider(&provider)?;
    test.write_json("messages/en.json", &json!({"x": {"y": "Hello"}}))?;
    test.write_json("messages/fr.json", &json!({}))?;

    let output = test.sync_command().args(["--api-key", "test-key"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(provider.requests(), 3);
    assert_eq!(test.read_json("messages/fr.json")?, json!({"x": {"y": SENTINEL}}));
    assert!(stdout(&output).contains(
        "1 key could not be synchronized: 1 missing, 0 translated, 0 skipped, 1 failed"
    ));

    Ok(())
}

#[test]
fn test_sync_keeps_placeholder_when_translation_fails() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::failing()?;
    test.use_provider(&provider)?;
    test.write_file(
        "src/app/page.tsx",
        r#"export default function Page() { return <h1>{t("greeting.morning")}</h1>; }"#,
    )?;
    test.write_json("messages/en.json", &json!({}))?;
    test.write_json("messages/fr.json", &json!({}))?;

    let output = test.sync_command().args(["--api-key", "test-key"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    // Server errors are not retried
    assert_eq!(provider.requests(), 1);
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({"greeting": {"morning": "Greeting Morning"}})
    );
    assert_eq!(
        test.read_json("messages/fr.json")?,
        json!({"greeting": {"morning": SENTINEL}})
    );

    Ok(())
}

#[test]
fn test_sync_retries_previous_failures() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::translating_to("Bonjour")?;
    test.use_provider(&provider)?;
    test.write_json("messages/en.json", &json!({"x": {"y": "Hello"}}))?;
    test.write_json("messages/fr.json", &json!({"x": {"y": SENTINEL}}))?;

    let output = test.sync_command().args(["--api-key", "test-key"]).output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(test.read_json("messages/fr.json")?, json!({"x": {"y": "Bonjour"}}));

    Ok(())
}

#[test]
fn test_sync_second_run_is_a_no_op() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::translating_to("Bonjour")?;
    test.use_provider(&provider)?;
    test.write_json("messages/en.json", &json!({"x": {"y": "Hello"}}))?;
    test.write_json("messages/fr.json", &json!({}))?;

    test.sync_command().args(["--api-key", "test-key"]).output()?;
    let first = test.read_file("messages/fr.json")?;
    let output = test.sync_command().args(["--api-key", "test-key"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(provider.requests(), 1);
    assert_eq!(test.read_file("messages/fr.json")?, first);
    assert!(stdout(&output).contains("All keys already in sync"));

    Ok(())
}

#[test]
fn test_sync_without_work_needs_no_api_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json("messages/en.json", &json!({"a": "A"}))?;
    test.write_json("messages/fr.json", &json!({"a": "A-fr"}))?;

    let output = test.sync_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_sync_missing_api_key_is_fatal_and_writes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/components/Nav.tsx",
        r#"export const Nav = () => <a>{t("nav.home")}</a>;"#,
    )?;
    test.write_file("messages/en.json", "{}")?;
    test.write_file("messages/fr.json", "{}")?;

    let output = test.sync_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no API key was provided"));
    assert_eq!(test.read_file("messages/en.json")?, "{}");
    assert_eq!(test.read_file("messages/fr.json")?, "{}");

    Ok(())
}

#[test]
fn test_sync_missing_base_catalog_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json("messages/fr.json", &json!({}))?;

    let output = test
        .sync_command()
        .args(["--locale", "fr", "--api-key", "test-key"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("en.json"));

    Ok(())
}

#[test]
fn test_sync_translates_back_into_base() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::translating_to("Delete")?;
    test.use_provider(&provider)?;
    test.write_json("messages/en.json", &json!({"common": {"save": "Save"}}))?;
    test.write_json(
        "messages/ar.json",
        &json!({"common": {"save": "حفظ", "delete": "حذف"}}),
    )?;

    let output = test.sync_command().args(["--api-key", "test-key"]).output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({"common": {"save": "Save", "delete": "Delete"}})
    );
    assert!(stdout(&output).contains("ar -> en: 1 translated"));

    Ok(())
}

#[test]
fn test_sync_no_translate_back_leaves_gap() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::translating_to("unused")?;
    test.use_provider(&provider)?;
    test.write_json("messages/en.json", &json!({"a": "A"}))?;
    test.write_json("messages/ar.json", &json!({"a": "أ", "b": "ب"}))?;

    let output = test
        .sync_command()
        .args(["--api-key", "test-key", "--no-translate-back"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(provider.requests(), 0);
    assert_eq!(test.read_json("messages/en.json")?, json!({"a": "A"}));
    assert!(stdout(&output).contains("not translated back"));

    Ok(())
}

#[test]
fn test_sync_skipped_source_leaves_gap() -> Result<()> {
    let test = CliTest::new()?;
    let provider = MockProvider::translating_to("Bonjour")?;
    test.use_provider(&provider)?;
    test.write_json(
        "messages/en.json",
        &json!({"title": "Hello", "blank": "  ", "count": 3}),
    )?;
    test.write_json("messages/fr.json", &json!({"title": "Bonjour"}))?;

    let output = test.sync_command().args(["--api-key", "test-key"]).output()?;

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert_eq!(provider.requests(), 0);
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({"title": "Hello", "blank": "  ", "count": 3})
    );
    assert_eq!(test.read_json("messages/fr.json")?, json!({"title": "Bonjour"}));
    assert!(stdout(&output).contains("en -> fr: 0 translated, 2 skipped, 0 failed"));
    assert!(stdout(&output).contains("2 keys could not be synchronized"));

    Ok(())
}

#[test]
fn test_sync_reports_sentinel_without_source() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json("messages/en.json", &json!({"a": "A"}))?;
    test.write_json(
        "messages/fr.json",
        &json!({"a": "A-fr", "removed": SENTINEL}),
    )?;

    let output = test.sync_command().output()?;

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("1 failed translation for fr with no source text left"));
    assert_eq!(
        test.read_json("messages/fr.json")?,
        json!({"a": "A-fr", "removed": SENTINEL})
    );

    Ok(())
}
