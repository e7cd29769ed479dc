use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_seed_reports_counts() -> Result<()> {
    let test = CliTest::with_file(
        "glossary.csv",
        "source;target\nHello;Bonjour\nGoodbye;Au revoir\nPending;\n",
    )?;

    assert_cmd_snapshot!(test.seed_command().arg("glossary.csv"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Seeded 1 file(s): 2 new, 0 already cached, 1 blank row(s) skipped

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_seed_twice_keeps_existing_entries() -> Result<()> {
    let test = CliTest::with_file("glossary.csv", "source;target\nHello;Bonjour\n")?;

    let output = test.seed_command().arg("glossary.csv").output()?;
    assert!(output.status.success());

    assert_cmd_snapshot!(test.seed_command().arg("glossary.csv"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Seeded 1 file(s): 0 new, 1 already cached, 0 blank row(s) skipped

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_seed_multiple_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("a.csv", "source;target\nYes;Oui\n")?;
    test.write_file("b.csv", "source;target\nNo;Non\n")?;

    assert_cmd_snapshot!(test.seed_command().arg("a.csv").arg("b.csv"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Seeded 2 file(s): 2 new, 0 already cached, 0 blank row(s) skipped

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_seed_missing_file_errors() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.seed_command().arg("absent.csv"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: cannot seed from absent.csv
    ");

    Ok(())
}

#[test]
fn test_seed_honors_cache_flag() -> Result<()> {
    let test = CliTest::with_file("glossary.csv", "source;target\nHello;Bonjour\n")?;

    let output = test
        .seed_command()
        .arg("glossary.csv")
        .arg("--cache")
        .arg("custom.db")
        .output()?;

    assert!(output.status.success());
    assert!(test.root().join("custom.db").exists());
    assert!(!test.root().join("phrasefill.db").exists());

    Ok(())
}
