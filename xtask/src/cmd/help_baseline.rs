use crate::{fs, repo};
use anyhow::Result;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::process::Command;

const DEFAULT_OUT: &str = "docs/cli-baseline.txt";

/// Snapshot the launcher's user-facing surface: fixture hashes plus the
/// output of `--help`, `modes` and `schema`.
pub fn run(out: Option<PathBuf>) -> Result<()> {
    let root = repo::repo_root()?;
    let out_path = out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT));
    let out_path = if out_path.is_absolute() {
        out_path
    } else {
        root.join(out_path)
    };

    eprintln!("Capturing launcher file fixture SHA256...");
    let fixtures = fs::walk_files(&root.join("tests/fixtures"), |_| false)?;
    let mut hashes = Vec::new();
    for path in fixtures.into_iter().filter(|p| fs::is_toml(p)) {
        let rel = repo::rel_from(&root, &path);
        let hash = sha256_file(&path)?;
        hashes.push((rel, hash));
    }
    hashes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out_text = String::new();
    out_text.push_str("# tests/fixtures sha256\n");
    for (path, hash) in hashes {
        out_text.push_str(&format!("{hash}  {}\n", path.display()));
    }

    for args in [&["--help"][..], &["modes"][..], &["schema"][..]] {
        eprintln!("Capturing cmn-launch {}...", args.join(" "));
        out_text.push('\n');
        out_text.push_str(&format!("# cargo run -- {}\n", args.join(" ")));
        out_text.push_str(&capture(&root, args)?);
    }

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out_path, out_text)?;
    println!(
        "Saved baseline to {}",
        repo::rel_from(&root, &out_path).display()
    );
    Ok(())
}

fn sha256_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    Ok(format!("{digest:x}"))
}

fn capture(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("cargo")
        .arg("run")
        .arg("--quiet")
        .arg("--bin")
        .arg("cmn-launch")
        .arg("--")
        .args(args)
        .current_dir(root)
        .env("RUST_LOG", "off")
        .output()?;
    if !output.status.success() {
        anyhow::bail!(
            "cargo run -- {} failed (status {})",
            args.join(" "),
            output.status
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
