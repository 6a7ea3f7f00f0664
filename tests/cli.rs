//! Binary-level behavior: flags, exit codes, and log output.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn zipbundler() -> Command {
    Command::cargo_bin("zipbundler").unwrap()
}

fn write_package(parent: &Path, name: &str) -> PathBuf {
    let pkg = parent.join(name);
    fs::create_dir_all(&pkg).unwrap();
    fs::write(pkg.join("__init__.py"), "").unwrap();
    fs::write(pkg.join("module.py"), "def func():\n    pass\n").unwrap();
    pkg
}

#[test]
fn successful_build_exits_zero_and_names_the_output() {
    let tmp = TempDir::new().unwrap();
    let pkg = write_package(tmp.path(), "mypackage");
    let output = tmp.path().join("app.pyz");

    zipbundler()
        .arg(&pkg)
        .args(["-o".as_ref(), output.as_os_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("app.pyz"));

    assert!(output.exists());
}

#[test]
fn quiet_build_prints_nothing() {
    let tmp = TempDir::new().unwrap();
    let pkg = write_package(tmp.path(), "mypackage");
    let output = tmp.path().join("app.pyz");

    zipbundler()
        .arg(&pkg)
        .args(["-o".as_ref(), output.as_os_str()])
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert!(output.exists());
}

#[test]
fn verbose_build_lists_included_files() {
    let tmp = TempDir::new().unwrap();
    let pkg = write_package(tmp.path(), "mypackage");
    let output = tmp.path().join("app.pyz");

    zipbundler()
        .arg(&pkg)
        .args(["-o".as_ref(), output.as_os_str()])
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("mypackage/module.py"));
}

#[test]
fn quiet_and_verbose_conflict_before_the_build_runs() {
    let tmp = TempDir::new().unwrap();
    let pkg = write_package(tmp.path(), "mypackage");
    let output = tmp.path().join("app.pyz");

    zipbundler()
        .arg(&pkg)
        .args(["-o".as_ref(), output.as_os_str()])
        .args(["--quiet", "--verbose"])
        .assert()
        .code(2);

    assert!(!output.exists());
}

#[test]
fn missing_output_flag_is_a_usage_error() {
    let tmp = TempDir::new().unwrap();
    let pkg = write_package(tmp.path(), "mypackage");

    zipbundler().arg(&pkg).assert().code(2);
}

#[test]
fn missing_package_root_exits_66() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("app.pyz");

    zipbundler()
        .arg(tmp.path().join("nope"))
        .args(["-o".as_ref(), output.as_os_str()])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn malformed_entry_point_exits_64() {
    let tmp = TempDir::new().unwrap();
    let pkg = write_package(tmp.path(), "mypackage");
    let output = tmp.path().join("app.pyz");

    zipbundler()
        .arg(&pkg)
        .args(["-o".as_ref(), output.as_os_str()])
        .args(["--entry-point", "pkg.mod.run"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("invalid entry point"));
}

#[test]
fn collision_exits_65_and_names_the_path() {
    let tmp = TempDir::new().unwrap();
    let first = write_package(&tmp.path().join("a"), "dup");
    let second = tmp.path().join("b").join("dup");
    fs::create_dir_all(&second).unwrap();
    fs::write(second.join("__init__.py"), "# different\n").unwrap();
    let output = tmp.path().join("app.pyz");

    zipbundler()
        .arg(&first)
        .arg(&second)
        .args(["-o".as_ref(), output.as_os_str()])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("dup/__init__.py"));
}

#[cfg(unix)]
#[test]
fn unwritable_destination_exits_77() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let pkg = write_package(tmp.path(), "mypackage");
    let locked = tmp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
    // Privileged users ignore directory modes; nothing to test then.
    if fs::write(locked.join("marker"), "").is_ok() {
        return;
    }

    let output = locked.join("app.pyz");
    zipbundler()
        .arg(&pkg)
        .args(["-o".as_ref(), output.as_os_str()])
        .assert()
        .code(77)
        .stderr(predicate::str::contains("permission denied"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}
