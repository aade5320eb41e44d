//! Build metadata injection for `--version` and `--help`.
//!
//! Both values can be pinned through the environment for reproducible
//! builds. Otherwise they come from git and the clock, with "unknown"
//! markers when that tooling is unavailable.

use std::env;
use std::fs;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const GIT_HASH_VAR: &str = "LAUNCHDECK_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "LAUNCHDECK_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Some(reference) = head_ref() {
        println!("cargo:rerun-if-changed=.git/{reference}");
    }

    emit(GIT_HASH_VAR, || {
        capture("git", &["rev-parse", "--short=12", "HEAD"]).unwrap_or_else(|| "unknown".into())
    });
    emit(TIMESTAMP_VAR, || {
        capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]).unwrap_or_else(|| {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|delta| delta.as_secs())
                .unwrap_or(0);
            format!("unix:{secs}")
        })
    });
}

fn emit(var: &str, compute: impl FnOnce() -> String) {
    println!("cargo:rerun-if-env-changed={var}");
    let value = env::var(var).unwrap_or_else(|_| compute());
    println!("cargo:rustc-env={var}={value}");
}

/// Branch ref named by `.git/HEAD`, so new commits trigger a rebuild.
fn head_ref() -> Option<String> {
    let head = fs::read_to_string(".git/HEAD").ok()?;
    head.trim().strip_prefix("ref: ").map(str::to_string)
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|value| !value.is_empty())
}
