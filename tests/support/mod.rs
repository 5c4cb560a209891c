use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "catalog-browse" => PathBuf::from(env!("CARGO_BIN_EXE_catalog-browse")),
        "catalog-session" => PathBuf::from(env!("CARGO_BIN_EXE_catalog-session")),
        other => panic!("unknown helper binary {other}"),
    };
    assert!(path.is_file(), "helper {} not built", path.display());
    path
}

/// Command for `name` with catalog-related env cleared.
pub fn helper_command(name: &str) -> Command {
    let mut cmd = Command::new(helper_binary(name));
    cmd.env_remove("CATALOG_PATH").env_remove("RUST_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run `cmd` with `input` on stdin and wait for it.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn {:?}", cmd))?;
    child
        .stdin
        .take()
        .context("child stdin unavailable")?
        .write_all(input.as_bytes())?;
    let output = child.wait_with_output()?;
    if !output.status.success() {
        bail!(
            "command {:?} failed: status {:?}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Minimal valid record for on-disk fixtures.
pub fn record_json(id: i64, title: &str, category: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "category": category,
        "type": "Отчёт",
        "status": status,
        "date": "2024-05-01"
    })
}

/// Write a catalog document under `dir/catalog/records.json`.
pub fn write_catalog(dir: &Path, records: Vec<Value>) -> Result<PathBuf> {
    let catalog_dir = dir.join("catalog");
    fs::create_dir_all(&catalog_dir)?;
    let path = catalog_dir.join("records.json");
    fs::write(
        &path,
        serde_json::to_vec_pretty(&json!({
            "schema_version": "data_catalog_v1",
            "title": "FIXTURE",
            "records": records
        }))?,
    )?;
    Ok(path)
}
