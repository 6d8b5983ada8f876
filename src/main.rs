//! `horizon [--options path.toml]`: open the hero scene in a window.

use std::path::PathBuf;
use std::process::ExitCode;

use horizon::{Options, Viewer};

fn parse_args() -> Result<Option<PathBuf>, String> {
    let mut args = std::env::args().skip(1);
    let mut options = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--options" | "-o" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--options needs a path".to_owned())?;
                options = Some(PathBuf::from(path));
            }
            other => return Err(format!("unexpected argument: {other}")),
        }
    }
    Ok(options)
}

fn main() -> ExitCode {
    env_logger::init();

    let options_path = match parse_args() {
        Ok(path) => path,
        Err(e) => {
            log::error!("{e}\nusage: horizon [--options path.toml]");
            return ExitCode::FAILURE;
        }
    };

    let options = match options_path {
        Some(path) => match Options::load(&path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    match Viewer::builder().with_options(options).build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
