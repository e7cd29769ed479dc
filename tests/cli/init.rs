use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    // 1. Parse as JSON
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    // 2. Verify expected fields exist
    assert!(
        parsed.get("sourceColumn").is_some(),
        "Config should have 'sourceColumn' field"
    );
    assert!(
        parsed.get("outputSuffix").is_some(),
        "Config should have 'outputSuffix' field"
    );
    assert!(
        parsed.get("provider").is_some(),
        "Config should have 'provider' field"
    );

    // 3. Verify formatting (2-space indentation)
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .phrasefillrc.json

    ----- stderr -----
    ");

    // Verify file exists
    assert!(test.root().join(".phrasefillrc.json").exists());

    // Verify content is valid and has expected structure
    let content = test.read_file(".phrasefillrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".phrasefillrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .phrasefillrc.json already exists
    ");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    // Initialize config
    test.command().arg("init").output()?;

    // Verify run works with the initialized config
    let output = test.run_command().arg("--offline").output()?;
    assert!(
        output.status.success(),
        "Run command should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}
