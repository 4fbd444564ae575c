mod interactive;
mod lookup;

pub use interactive::handle_interactive;
pub use lookup::{handle_descendants, handle_subordinates, handle_validate};

use orgtree_core::{Config, SubordinateReport};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

fn input_path(config: &Config, file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| config.input_path())
}

fn write_report(path: &Path, report: &SubordinateReport) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    tracing::debug!(path = %path.display(), count = report.count, "wrote subordinate report");
    Ok(())
}

fn join_ids(report: &SubordinateReport) -> String {
    report
        .ids()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
