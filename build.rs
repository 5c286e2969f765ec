//! Build script for the DIRS engine
//!
//! Embeds the git revision, build time, target and compiler version so the
//! `version` subcommand can report exactly which build produced a stored
//! results file.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = command_output("git", &["rev-parse", "--short=8", "HEAD"]);
    let git_branch = command_output("git", &["rev-parse", "--abbrev-ref", "HEAD"]);
    let git_dirty = match Command::new("git").args(["status", "--porcelain"]).output() {
        Ok(out) if out.status.success() => {
            if out.stdout.is_empty() { "false" } else { "true" }
        }
        _ => "unknown",
    };

    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let host = env::var("HOST").unwrap_or_else(|_| "unknown".to_string());
    let rustc_version = command_output("rustc", &["--version"]);

    let vars = [
        ("DIRS_GIT_HASH", git_hash.as_str()),
        ("DIRS_GIT_BRANCH", git_branch.as_str()),
        ("DIRS_GIT_DIRTY", git_dirty),
        ("DIRS_BUILD_TIMESTAMP", build_timestamp.as_str()),
        ("DIRS_TARGET", target.as_str()),
        ("DIRS_PROFILE", profile.as_str()),
        ("DIRS_RUSTC_VERSION", rustc_version.as_str()),
        ("DIRS_HOST", host.as_str()),
    ];
    for (key, value) in vars {
        println!("cargo:rustc-env={}={}", key, value);
    }
}

/// Run a command and return its trimmed stdout, or "unknown" on any failure
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
