//! Binary-level tests: help, usage errors and startup failures exit before touching the terminal.
use assert_cmd::prelude::*;
use std::process::Command;

fn sourtop(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("sourtop").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    for k in [
        "SOURTOP_INTERVAL_MS",
        "SOURTOP_MOUNT",
        "SOURTOP_TOP_N",
        "SOURTOP_TEMP",
        "SOURTOP_LOG_FILE",
    ] {
        cmd.env_remove(k);
    }
    cmd
}

fn text(out: &std::process::Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

#[test]
fn help_lists_flags_and_exits_zero() {
    let td = tempfile::tempdir().unwrap();
    for flag in ["--help", "-h"] {
        let out = sourtop(td.path()).arg(flag).output().expect("run sourtop");
        assert!(out.status.success());
        let t = text(&out);
        assert!(
            t.contains("Usage:") && t.contains("--interval") && t.contains("--mount"),
            "{t}"
        );
    }
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let td = tempfile::tempdir().unwrap();
    let out = sourtop(td.path()).arg("--bogus").output().expect("run sourtop");
    assert_eq!(out.status.code(), Some(2));
    assert!(text(&out).contains("Unexpected argument"));
}

#[test]
fn invalid_interval_fails_startup() {
    let td = tempfile::tempdir().unwrap();
    let out = sourtop(td.path())
        .args(["--interval", "5"])
        .output()
        .expect("run sourtop");
    assert_eq!(out.status.code(), Some(1));
    assert!(text(&out).contains("interval_ms"), "{}", text(&out));
}

#[test]
fn malformed_config_fails_startup() {
    let td = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(td.path().join("sourtop")).unwrap();
    std::fs::write(td.path().join("sourtop").join("config.json"), "{ nope").unwrap();
    let out = sourtop(td.path()).output().expect("run sourtop");
    assert_eq!(out.status.code(), Some(1));
    assert!(text(&out).contains("malformed config"), "{}", text(&out));
}
