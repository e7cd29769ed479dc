use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_status_empty_ledger() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.status_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Ledger is empty.
    Cache entries: 0

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_status_after_completed_run() -> Result<()> {
    let test = CliTest::with_file("tables/dialog.csv", "source;target\nHello;Bonjour\n")?;

    let output = test.run_command().arg("--offline").arg("tables").output()?;
    assert!(output.status.success());

    assert_cmd_snapshot!(test.status_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Completed:
      tables/dialog.csv
    Cache entries: 0

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_status_counts_cache_entries() -> Result<()> {
    let test = CliTest::with_file(
        "glossary.csv",
        "source;target\nHello;Bonjour\nBye;Salut\n",
    )?;

    let output = test.seed_command().arg("glossary.csv").output()?;
    assert!(output.status.success());

    assert_cmd_snapshot!(test.status_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Ledger is empty.
    Cache entries: 2

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_status_lists_in_progress_files() -> Result<()> {
    let test = CliTest::new()?;

    // A ledger as a cancelled run leaves it behind.
    test.write_file(
        "phrasefill-status.json",
        r#"{
          "in_progress": { "tables/dialog.csv": 12 },
          "completed": ["tables/done.csv"]
        }"#,
    )?;

    assert_cmd_snapshot!(test.status_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    In progress:
      tables/dialog.csv: next row 12
    Completed:
      tables/done.csv
    Cache entries: 0

    ----- stderr -----
    ");

    Ok(())
}
