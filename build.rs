use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Embeds the git revision as `PIZARRA_GIT_HASH` for `pizarra --version`.
fn main() {
    let revision = git(&["describe", "--always", "--dirty=-modified"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=PIZARRA_GIT_HASH={revision}");

    if let Some(git_dir) = git_dir() {
        for watched in ["HEAD", "index", "refs", "packed-refs"] {
            let path = git_dir.join(watched);
            if path.exists()
                && let Some(display) = path.to_str()
            {
                println!("cargo:rerun-if-changed={display}");
            }
        }
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn git_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var_os("GIT_DIR") {
        return Some(PathBuf::from(dir));
    }

    let dot_git = Path::new(".git");
    if dot_git.is_dir() {
        return Some(dot_git.to_path_buf());
    }

    // Worktrees and submodules use a `gitdir: <path>` file
    let contents = fs::read_to_string(dot_git).ok()?;
    let target = PathBuf::from(contents.strip_prefix("gitdir:")?.trim());
    Some(if target.is_relative() {
        Path::new(".").join(target)
    } else {
        target
    })
}
