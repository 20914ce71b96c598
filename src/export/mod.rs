//! File export.
//!
//! Two artifacts leave the process: the informational README text file and
//! JSON-lines step traces (see [`crate::replay`] for the line layout).

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::algorithms::Algorithm;
use crate::error::{SortError, SortResult};
use crate::replay::StepTrace;

/// File name used when the README target is a directory.
pub const README_FILE_NAME: &str = "README-sortviz.txt";

/// Contents of the README artifact.
#[must_use]
pub fn readme_text() -> String {
    let algorithms: Vec<&str> = Algorithm::ALL.iter().map(|a| a.label()).collect();
    format!(
        "Sorting Algorithms Visualizer {version}\n\
         Implemented algorithms: {list}.\n\
         Run headless: sortviz run --algorithm quick --size 30\n\
         Run interactive: sortviz-tui (build with --features tui)\n",
        version = env!("CARGO_PKG_VERSION"),
        list = algorithms.join(", "),
    )
}

/// Write the README artifact.
///
/// A directory target receives [`README_FILE_NAME`]; any other path is
/// written as given. Returns the path written.
///
/// # Errors
///
/// Returns error if file operations fail.
pub fn write_readme(target: &Path) -> SortResult<PathBuf> {
    let path = if target.is_dir() {
        target.join(README_FILE_NAME)
    } else {
        target.to_path_buf()
    };

    let file =
        File::create(&path).map_err(|e| SortError::io(format!("Failed to create file: {e}")))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(readme_text().as_bytes())
        .map_err(|e| SortError::io(format!("Write failed: {e}")))?;
    writer
        .flush()
        .map_err(|e| SortError::io(format!("Flush failed: {e}")))?;

    tracing::info!(path = %path.display(), "wrote readme");
    Ok(path)
}

/// Write a trace as JSON lines.
///
/// # Errors
///
/// Returns error if file operations or serialization fail.
pub fn write_trace(trace: &StepTrace, path: &Path) -> SortResult<()> {
    let file =
        File::create(path).map_err(|e| SortError::io(format!("Failed to create file: {e}")))?;
    trace.write_json_lines(BufWriter::new(file))?;
    tracing::info!(
        path = %path.display(),
        steps = trace.len(),
        "wrote trace"
    );
    Ok(())
}

/// Read a JSON-lines trace and check its checksum.
///
/// # Errors
///
/// Returns error if the file cannot be read or the trace is inconsistent.
pub fn read_trace(path: &Path) -> SortResult<StepTrace> {
    let file = File::open(path).map_err(|e| SortError::io(format!("Failed to open file: {e}")))?;
    StepTrace::read_json_lines(BufReader::new(file))
}
