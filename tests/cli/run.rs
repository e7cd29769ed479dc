use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_run_fills_blanks_from_cache() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("glossary.csv", "source;target\nGoodbye;Au revoir\n")?;
    test.write_file(
        "tables/dialog.csv",
        "source;target\nHello;Bonjour\nGoodbye;\n",
    )?;

    let output = test.seed_command().arg("glossary.csv").output()?;
    assert!(output.status.success());

    assert_cmd_snapshot!(test.run_command().arg("--offline").arg("tables"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ tables/dialog.csv: 2 row(s), 1 from cache, 0 translated, 1 already filled

    ✓ All tables up to date

    ----- stderr -----
    ");

    let written = test.read_file("tables/dialog_translated.csv")?;
    assert_eq!(written, "source;target\nHello;Bonjour\nGoodbye;Au revoir\n");

    Ok(())
}

#[test]
fn test_run_leaves_cache_misses_blank_offline() -> Result<()> {
    let test = CliTest::with_file("tables/dialog.csv", "source;target\nHello;\n")?;

    assert_cmd_snapshot!(test.run_command().arg("--offline").arg("tables"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ tables/dialog.csv: 1 row(s), 0 from cache, 0 translated, 0 already filled, 1 unresolved

    ✘ 1 row(s) left untranslated

    ----- stderr -----
    ");

    // The output is still written; the unresolved row keeps a blank target.
    let written = test.read_file("tables/dialog_translated.csv")?;
    assert_eq!(written, "source;target\nHello;\n");

    Ok(())
}

#[test]
fn test_run_skips_completed_files() -> Result<()> {
    let test = CliTest::with_file("tables/dialog.csv", "source;target\nHello;Bonjour\n")?;

    let output = test.run_command().arg("--offline").arg("tables").output()?;
    assert!(output.status.success());

    assert_cmd_snapshot!(test.run_command().arg("--offline").arg("tables"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    1 file(s) skipped (already completed)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_run_reports_missing_column() -> Result<()> {
    let test = CliTest::with_file("tables/dialog.csv", "phrase;translation\nHello;\n")?;

    assert_cmd_snapshot!(test.run_command().arg("--offline").arg("tables"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ tables/dialog.csv: missing required column "source"

    ✘ 1 file(s) failed

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_run_rejects_missing_root() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.run_command().arg("--offline").arg("missing"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: missing is not a directory
    ");

    Ok(())
}

#[test]
fn test_run_reports_empty_scan() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.run_command().arg("--offline"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No phrase tables found.

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_run_honors_format_overrides() -> Result<()> {
    let test = CliTest::with_file("tables/dialog.csv", "english,french\nHello,Bonjour\n")?;

    assert_cmd_snapshot!(
        test.run_command()
            .arg("--offline")
            .arg("--delimiter")
            .arg(",")
            .arg("--source-column")
            .arg("english")
            .arg("--target-column")
            .arg("french")
            .arg("tables"),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ tables/dialog.csv: 1 row(s), 0 from cache, 0 translated, 1 already filled

    ✓ All tables up to date

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_run_honors_config_ignores() -> Result<()> {
    let test = CliTest::new()?;

    test.write_file(
        ".phrasefillrc.json",
        r#"{
         "ignores": ["**/drafts/**"]
     }"#,
    )?;

    test.write_file("tables/dialog.csv", "source;target\nHello;Bonjour\n")?;
    test.write_file("tables/drafts/wip.csv", "source;target\nBye;\n")?;

    assert_cmd_snapshot!(test.run_command().arg("--offline").arg("tables"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ tables/dialog.csv: 1 row(s), 0 from cache, 0 translated, 1 already filled

    ✓ All tables up to date

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_run_translates_through_endpoint() -> Result<()> {
    let test = CliTest::with_file("tables/dialog.csv", "source;target\nHello;\n")?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/translate")
        .with_header("content-type", "application/json")
        .with_body(r#"{"code": 200, "data": "Bonjour"}"#)
        .create();

    let output = test
        .run_command()
        .arg("tables")
        .arg("--endpoint")
        .arg(format!("{}/translate", server.url()))
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    mock.assert();

    let written = test.read_file("tables/dialog_translated.csv")?;
    assert_eq!(written, "source;target\nHello;Bonjour\n");

    Ok(())
}

#[test]
fn test_run_verbose_logs_to_stderr() -> Result<()> {
    let test = CliTest::with_file("tables/dialog.csv", "source;target\nHello;Bonjour\n")?;

    let output = test
        .run_command()
        .arg("--offline")
        .arg("--verbose")
        .arg("tables")
        .output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("starting run"), "stderr: {stderr}");

    Ok(())
}
