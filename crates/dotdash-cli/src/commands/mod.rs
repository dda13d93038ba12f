//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::fs::File;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use dotdash_core::models::config::DotdashConfig;
use dotdash_core::{ConversionResult, UnmappedPolicy};

/// Command-line spelling of [`UnmappedPolicy`].
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PolicyArg {
    /// Silently drop characters and symbols with no table entry
    Drop,
    /// Fail on the first character or symbol with no table entry
    Reject,
}

impl From<PolicyArg> for UnmappedPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Drop => UnmappedPolicy::Drop,
            PolicyArg::Reject => UnmappedPolicy::Reject,
        }
    }
}

/// Load the config file if one was given, defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DotdashConfig> {
    match config_path {
        Some(path) => Ok(DotdashConfig::from_file(Path::new(path))?),
        None => Ok(DotdashConfig::default()),
    }
}

/// Write a result into `dir` under `filename`.
///
/// An existing file is never overwritten: `_1`, `_2`, ... is inserted
/// before the direction suffix until a free name is found.
pub fn persist(dir: &Path, filename: &str, result: &ConversionResult) -> anyhow::Result<PathBuf> {
    write_new(dir, filename, result.direction.suffix(), |file| {
        file.write_all(result.text.as_bytes())
    })
}

/// Stage the content in a temporary file inside `dir`, then move it to the
/// first free name. Nothing is left behind when `fill` fails.
fn write_new<F>(dir: &Path, filename: &str, suffix: &str, fill: F) -> anyhow::Result<PathBuf>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    std::fs::create_dir_all(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    fill(staged.as_file_mut())?;
    staged.as_file().sync_all()?;

    let base = filename.strip_suffix(suffix).unwrap_or(filename);
    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            filename.to_string()
        } else {
            format!("{}_{}{}", base, attempt, suffix)
        };
        let path = dir.join(name);

        match staged.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                staged = e.file;
                attempt += 1;
            }
            Err(e) => return Err(e.error.into()),
        }
    }
}
