//! Command output helper.
//!
//! Writes compact single-line JSON to stdout and, inside GitHub Actions,
//! appends `json=<...>` to the `GITHUB_OUTPUT` file so later steps can read it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::AppError;

/// Environment variable naming the Actions step output file.
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Write command output to stdout and to `GITHUB_OUTPUT` when it is set.
pub fn write_output<T: Serialize>(output: &T) -> Result<(), AppError> {
    let github_output = std::env::var_os(GITHUB_OUTPUT);
    let json = write_output_to(output, github_output.as_deref().map(Path::new))?;
    println!("{}", json);
    Ok(())
}

/// Serialize `output` and append it to `github_output` if given. Returns the JSON line.
pub fn write_output_to<T: Serialize>(
    output: &T,
    github_output: Option<&Path>,
) -> Result<String, AppError> {
    let json = serde_json::to_string(output)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize output: {}", e)))?;

    debug_assert!(!json.contains('\n'), "output JSON must be single-line");

    if let Some(path) = github_output {
        let mut file = OpenOptions::new().create(true).append(true).open(path).map_err(|e| {
            AppError::InternalError(format!("Failed to open {}: {}", GITHUB_OUTPUT, e))
        })?;
        writeln!(file, "json={}", json).map_err(|e| {
            AppError::InternalError(format!("Failed to write {}: {}", GITHUB_OUTPUT, e))
        })?;
    }

    Ok(json)
}
