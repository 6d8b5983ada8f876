//! Build tasks: `cargo xtask web` and `cargo xtask schema`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

const WASM_TARGET: &str = "wasm32-unknown-unknown";

#[derive(Parser)]
#[command(name = "xtask", about = "Build tasks for horizon")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the wasm module and its JS bindings into `dist/`.
    Web {
        /// Build without optimizations.
        #[arg(long)]
        debug: bool,
        /// Output directory for the generated bindings.
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
    /// Write the JSON schema of the hero options.
    Schema {
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn run(cmd: &mut Command) -> Result<()> {
    eprintln!("$ {cmd:?}");
    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !status.success() {
        bail!("{:?} exited with {status}", cmd.get_program());
    }
    Ok(())
}

fn web(debug: bool, out_dir: &Path) -> Result<()> {
    let root = workspace_root();
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".into());

    let mut build = Command::new(&cargo);
    let _ = build.current_dir(&root).args([
        "rustc",
        "--package",
        "horizon",
        "--lib",
        "--target",
        WASM_TARGET,
        "--no-default-features",
        "--features",
        "web",
    ]);
    if !debug {
        let _ = build.arg("--release");
    }
    let _ = build.args(["--", "--crate-type=cdylib"]);
    run(&mut build)?;

    let profile = if debug { "debug" } else { "release" };
    let wasm = root
        .join("target")
        .join(WASM_TARGET)
        .join(profile)
        .join("horizon.wasm");
    if !wasm.exists() {
        bail!("expected build output at {}", wasm.display());
    }

    let out_dir = root.join(out_dir);
    run(Command::new("wasm-bindgen")
        .arg("--target")
        .arg("web")
        .arg("--out-dir")
        .arg(&out_dir)
        .arg(&wasm))
    .context("is wasm-bindgen-cli installed? (cargo install wasm-bindgen-cli)")?;

    eprintln!("wrote {}", out_dir.display());
    Ok(())
}

fn schema(out: Option<&Path>) -> Result<()> {
    let json =
        serde_json::to_string_pretty(&horizon::Options::json_schema())?;
    match out {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::Web { debug, out_dir } => web(debug, &out_dir),
        Task::Schema { out } => schema(out.as_deref()),
    }
}
