use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["includes", "messagesRoot", "primaryLocale", "translation"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["translation"]["maxAttempts"], 3);
    assert_eq!(parsed["translation"]["failureSentinel"], "[translation failed]");

    // 2-space indentation
    assert!(content.contains("\n  \"includes\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .glotsyncrc.json"));
    assert!(test.root().join(".glotsyncrc.json").exists());

    let content = test.read_file(".glotsyncrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".glotsyncrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".glotsyncrc.json already exists"));
    assert_eq!(test.read_file(".glotsyncrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;

    test.write_file(
        "src/app/page.tsx",
        r#"export default function Page() { return <div>Test</div>; }"#,
    )?;
    test.write_file("messages/en.json", "{}")?;

    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage"));

    Ok(())
}
