use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use icsfix_core::{ConvertMode, ZoneProfile};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::CliError;

const OUTPUT_EXTENSION: &str = ".ics";

/// Check the output name and open the input. Nothing is created on disk.
pub fn open(input: &Path, output: &Path) -> Result<File, CliError> {
    check_output_extension(output)?;
    File::open(input).map_err(|e| CliError::InputNotFound(input.to_path_buf(), e))
}

/// Convert the opened `input` into `output`, returning the number of events
/// written.
///
/// The calendar is written to a temporary file next to `output` and only
/// moved into place once every event has converted, so a failed run never
/// leaves a partial calendar behind.
pub fn run(
    source: File,
    input: &Path,
    output: &Path,
    zone: &ZoneProfile,
    mode: ConvertMode,
) -> Result<usize> {
    let mut staged = stage_output(output)
        .map_err(|e| CliError::OutputUnwritable(output.to_path_buf(), e))?;
    debug!(staged = %staged.path().display(), "Staging output");

    let count = {
        let mut writer = BufWriter::new(staged.as_file_mut());
        icsfix_core::fix_calendar(BufReader::new(source), &mut writer, zone, mode)
            .with_context(|| format!("Failed to convert {}", input.display()))?
    };

    staged
        .persist(output)
        .map_err(|e| CliError::OutputUnwritable(output.to_path_buf(), e.error))?;

    Ok(count)
}

pub fn check_output_extension(output: &Path) -> Result<(), CliError> {
    if output.to_string_lossy().ends_with(OUTPUT_EXTENSION) {
        Ok(())
    } else {
        Err(CliError::InvalidOutputExtension)
    }
}

fn stage_output(output: &Path) -> io::Result<NamedTempFile> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(".icsfix-").suffix(OUTPUT_EXTENSION);

    // Match what File::create would give the final file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }

    builder.tempfile_in(dir)
}
