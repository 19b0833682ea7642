use prompter::batch::{self, BatchConfig, BatchStats};
use tempfile::TempDir;

fn quiet(fail_fast: bool) -> BatchConfig {
    BatchConfig {
        fail_fast,
        show_progress: false,
    }
}

/// Test a whole-directory run with derived output names
#[test]
fn test_batch_directory_run() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    std::fs::write(
        src.path().join("hamlet_TXT_FolgerShakespeare.txt"),
        "Hamlet\nACT 1\nScene 1\nA line that\nwraps\n",
    )
    .unwrap();
    std::fs::write(
        src.path().join("macbeth.txt"),
        "Macbeth\nACT 1\nScene 1\nWhen shall we three meet again?\n",
    )
    .unwrap();

    let stats = batch::run(src.path(), dest.path(), &quiet(false)).expect("batch should succeed");
    assert_eq!(stats.files_total, 2);
    assert_eq!(stats.files_succeeded, 2);
    assert!(dest.path().join("hamlet_folger_mod.txt").exists());
    assert!(dest.path().join("macbeth_folger_mod.txt").exists());

    let hamlet = std::fs::read_to_string(dest.path().join("hamlet_folger_mod.txt")).unwrap();
    assert_eq!(hamlet, "Hamlet\nACT 1\nScene 1\nA line that wraps");
}

/// Test that one bad file is reported without sinking the batch
#[test]
fn test_batch_survives_a_bad_file() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    std::fs::write(src.path().join("bad.txt"), [0xFF, 0xFE, 0xFD]).unwrap();
    std::fs::write(src.path().join("good.txt"), "T\nACT 1\nScene 1\nline\n").unwrap();

    let stats = batch::run(src.path(), dest.path(), &quiet(false)).expect("batch should succeed");
    assert_eq!(stats.files_total, 2);
    assert_eq!(stats.files_succeeded, 1);
    assert_eq!(stats.files_failed, 1);

    let bad = stats
        .reports
        .iter()
        .find(|r| r.input.ends_with("bad.txt"))
        .expect("bad file should be reported");
    assert_eq!(bad.status, "failed");
    assert!(bad.error.is_some());
}

/// Test fail-fast aborts on the first failure
#[test]
fn test_batch_fail_fast_aborts() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    // "a_" sorts ahead of "z_", so the bad file is hit first
    std::fs::write(src.path().join("a_bad.txt"), [0xFF, 0xFE, 0xFD]).unwrap();
    std::fs::write(src.path().join("z_good.txt"), "T\nACT 1\nScene 1\nline\n").unwrap();

    let result = batch::run(src.path(), dest.path(), &quiet(true));
    assert!(result.is_err());
    assert!(!dest.path().join("z_good_folger_mod.txt").exists());
}

/// Test the stats artifact round trip
#[test]
fn test_stats_artifact() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    std::fs::write(src.path().join("a.txt"), "T\nACT 1\nScene 1\nx\n").unwrap();

    let stats = batch::run(src.path(), dest.path(), &quiet(false)).expect("batch should succeed");
    let stats_path = dest.path().join("stats.json");
    batch::write_stats(&stats, &stats_path).expect("stats write should succeed");

    let loaded: BatchStats =
        serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
    assert_eq!(loaded.files_total, 1);
    assert_eq!(loaded.files_failed, 0);
    assert_eq!(loaded.reports[0].output, "a_folger_mod.txt");
    assert_eq!(loaded.reports[0].status, "success");
}
