//! Integration tests for the venv-doctor binary.
//!
//! A fake interpreter and package manager are written into a temp dir, so
//! no real Python installation is needed.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Reports 3.11, describes itself and its pip, and only imports `numpy`.
const FAKE_PYTHON: &str = r#"#!/bin/sh
case "$2" in
  *version_info*) echo 3.11 ;;
  *sys.executable*) printf '%s\n3.11.2 (main)\n%s\n/usr\n' "$0" "${VIRTUAL_ENV:-/usr}" ;;
  *sys.path*) printf '/usr/lib/python311.zip\n/usr/lib/python3/dist-packages\n' ;;
  pip) echo "pip 23.0.1 from /env/pip (python 3.11)" ;;
  "import numpy") exit 0 ;;
  "import "*) echo "ModuleNotFoundError: No module named '${2#import }'" >&2; exit 1 ;;
esac
"#;

/// Records install arguments next to itself and lists two packages.
const FAKE_PIP: &str = r#"#!/bin/sh
case "$1" in
  list) printf 'Package Version\nnumpy 1.24.2\nrequests 2.31.0\nopencv-python 4.8.0\n' ;;
  install) echo "$@" > "$(dirname "$0")/install-args" ;;
esac
"#;

struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let sandbox = Self { temp };
        fs::create_dir_all(sandbox.bin()).unwrap();
        fs::create_dir_all(sandbox.search_root()).unwrap();
        sandbox.script("python", FAKE_PYTHON);
        sandbox.script("pip", FAKE_PIP);
        sandbox
    }

    fn path(&self) -> &Path {
        self.temp.path()
    }

    fn bin(&self) -> PathBuf {
        self.path().join("bin")
    }

    fn search_root(&self) -> PathBuf {
        self.path().join("usr/lib")
    }

    fn venv(&self) -> PathBuf {
        self.path().join("env")
    }

    fn site(&self) -> PathBuf {
        self.venv().join("lib/python3.11/site-packages")
    }

    fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bin().join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn touch(&self, relative: &str) -> PathBuf {
        let path = self.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        path
    }

    /// A command with the fake programs wired in and no marker.
    fn command(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("venv-doctor"));
        cmd.current_dir(self.path())
            .env_remove("VIRTUAL_ENV")
            .env("NO_COLOR", "1")
            .arg("--python")
            .arg(self.bin().join("python"))
            .arg("--pip")
            .arg(self.bin().join("pip"));
        cmd
    }

    /// A repair command with the marker set.
    fn repair(&self) -> Command {
        let mut cmd = self.command();
        cmd.env("VIRTUAL_ENV", self.venv())
            .arg("repair")
            .arg("--search-root")
            .arg(self.search_root());
        cmd
    }
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("venv-doctor"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("repair"))
        .stdout(predicate::str::contains("diagnose"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("venv-doctor"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn missing_marker_exits_one_without_changes() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let before: Vec<_> = fs::read_dir(sandbox.path())?.collect();

    sandbox
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No active virtual environment"));

    let after: Vec<_> = fs::read_dir(sandbox.path())?.collect();
    assert_eq!(before.len(), after.len());
    assert!(!sandbox.venv().exists());
    assert!(!sandbox.bin().join("install-args").exists());
    Ok(())
}

#[test]
fn empty_marker_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .env("VIRTUAL_ENV", "")
        .arg("repair")
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn repair_creates_versioned_package_dir() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .repair()
        .assert()
        .success()
        .stdout(predicate::str::contains("Python 3.11"))
        .stdout(predicate::str::contains("lib/python3.11/site-packages"));
    assert!(sandbox.site().is_dir());
    Ok(())
}

#[test]
fn repair_is_the_default_command() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .env("VIRTUAL_ENV", sandbox.venv())
        .assert()
        .success()
        .stdout(predicate::str::contains("Virtual environment repair"));
    assert!(sandbox.site().is_dir());
    Ok(())
}

#[test]
fn repair_lists_matching_packages_only() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .repair()
        .assert()
        .success()
        .stdout(predicate::str::contains("numpy 1.24.2"))
        .stdout(predicate::str::contains("opencv-python 4.8.0"))
        .stdout(predicate::str::contains("requests").not());
    Ok(())
}

#[test]
fn repair_reports_missing_library() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .repair()
        .assert()
        .success()
        .stderr(predicate::str::contains("not found"));
    assert!(fs::symlink_metadata(sandbox.site().join("cv2.so")).is_err());
    Ok(())
}

#[test]
fn repair_links_first_match() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let first = sandbox.touch("usr/lib/python3/dist-packages/cv2.cpython-311-arm-linux-gnueabihf.so");
    sandbox.touch("usr/lib/x/cv2.so");

    sandbox.repair().assert().success();

    assert_eq!(fs::read_link(sandbox.site().join("cv2.so"))?, first);
    Ok(())
}

#[test]
fn repair_replaces_stale_link() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    let lib = sandbox.touch("usr/lib/python3/dist-packages/cv2.so");
    fs::create_dir_all(sandbox.site())?;
    std::os::unix::fs::symlink("/nonexistent/cv2.so", sandbox.site().join("cv2.so"))?;

    sandbox.repair().assert().success();

    assert_eq!(fs::read_link(sandbox.site().join("cv2.so"))?, lib);
    Ok(())
}

#[test]
fn repair_reinstalls_missing_module() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.repair().assert().success();

    let args = fs::read_to_string(sandbox.bin().join("install-args"))?;
    assert_eq!(args.trim(), "install --no-cache-dir mediapipe-rpi3");
    Ok(())
}

#[test]
fn repair_skips_reinstall_when_module_present() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.site().join("mediapipe"))?;

    sandbox.repair().assert().success();

    assert!(!sandbox.bin().join("install-args").exists());
    Ok(())
}

#[test]
fn failed_reinstall_keeps_exit_status() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.script("pip", "#!/bin/sh\n[ \"$1\" = install ] && { echo 'ERROR: boom' >&2; exit 1; }\nexit 0\n");

    sandbox
        .repair()
        .assert()
        .success()
        .stderr(predicate::str::contains("boom"));
    Ok(())
}

#[test]
fn import_checks_report_each_module() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .repair()
        .assert()
        .success()
        .stdout(predicate::str::contains("numpy imported"))
        .stderr(predicate::str::contains("cv2 import failed"))
        .stderr(predicate::str::contains("mediapipe import failed"));
    Ok(())
}

#[test]
fn unknown_interpreter_version_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox.script("python", "#!/bin/sh\necho garbage\n");

    sandbox
        .repair()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not determine version"));
    assert!(!sandbox.venv().exists());
    Ok(())
}

#[test]
fn config_file_changes_reinstall_package() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.path().join("venv-doctor.yml"),
        "reinstall_package: mediapipe\nsmoke_modules: [numpy]\n",
    )?;

    sandbox
        .repair()
        .assert()
        .success()
        .stdout(predicate::str::contains("All 1 modules imported"));

    let args = fs::read_to_string(sandbox.bin().join("install-args"))?;
    assert_eq!(args.trim(), "install --no-cache-dir mediapipe");
    Ok(())
}

#[test]
fn explicit_missing_config_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .repair()
        .arg("--config")
        .arg(sandbox.path().join("nope.yml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn invalid_config_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    fs::write(sandbox.path().join("venv-doctor.yml"), "link_name: ../cv2.so\n")?;

    sandbox
        .repair()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn diagnose_runs_without_marker() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .arg("diagnose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: 3.11.2 (main)"))
        .stdout(predicate::str::contains("pip 23.0.1 from /env/pip"))
        .stdout(predicate::str::contains("/usr/lib/python3/dist-packages"))
        .stdout(predicate::str::contains("numpy imported"));
    assert!(!sandbox.venv().exists());
    Ok(())
}

#[test]
fn completions_generate_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("venv-doctor"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("venv-doctor"));
    Ok(())
}
