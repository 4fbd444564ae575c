use orgtree_core::{Config, OrgChart, UserId};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use super::{input_path, join_ids, write_report};

const PATH_PROMPT: &str = "Please enter a file location or leave blank to use default: ";
const ID_PROMPT: &str = "Please enter an Employee ID: ";
const INVALID_ID: &str = "Invalid Employee ID.";

pub fn handle_interactive(
    config: &Config,
    file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let default_path = input_path(config, file);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(stdin.lock(), stdout.lock(), &default_path, &config.output_path())
}

/// Prompt for a data file until one loads, then answer employee id queries
/// until the input ends.
fn run_session<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    default_path: &Path,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "Loading default user-role file: {}", default_path.display())?;

    let chart = loop {
        writeln!(out, "{}", PATH_PROMPT)?;
        let Some(line) = read_line(&mut input)? else {
            return Ok(());
        };
        let path = if line.trim().is_empty() {
            default_path.to_path_buf()
        } else {
            PathBuf::from(line.trim())
        };

        match OrgChart::from_path(&path) {
            Ok(chart) => break chart,
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    };

    loop {
        writeln!(out, "{}", ID_PROMPT)?;
        let Some(line) = read_line(&mut input)? else {
            return Ok(());
        };

        let Ok(id) = line.trim().parse::<i64>() else {
            writeln!(out, "{}", INVALID_ID)?;
            continue;
        };

        match chart.report_for(UserId(id)) {
            Ok(report) => {
                writeln!(
                    out,
                    "Found {} subordinates: {}",
                    report.count,
                    join_ids(&report)
                )?;
                let file_name = output_path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_else(|| output_path.to_string_lossy());
                writeln!(out, "Writing result to file '{}'.", file_name)?;
                write_report(output_path, &report)?;
            }
            Err(_) => writeln!(out, "{}", INVALID_ID)?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
