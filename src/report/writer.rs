//! Fixed-format text output for both report modes

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::{AuditError, Result};

use super::aggregate::{DetailedReport, SummaryResult};
use super::format::{format_size, format_timestamp};

/// Detailed reports are always written to this file in the working directory.
pub const REPORT_FILE_NAME: &str = "file_analysis.txt";

const SEPARATOR: &str = "_______________________________________";

/// Render the detailed report: every owner's files followed by that owner's totals.
pub fn render_detailed<W: Write>(report: &DetailedReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "File Analysis Report")?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "Owner\tSize\tLast Modified\t\tFile Path")?;

    for owner in &report.owners {
        for record in &owner.listing {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                record.owner,
                record.size_bytes,
                format_timestamp(record.modified),
                record.path.display()
            )?;
        }
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "Owner: {}", owner.owner)?;
        writeln!(out, "Total Size: {} bytes", owner.total_size_bytes)?;
        writeln!(out, "Number of Files: {}", owner.file_count)?;
        writeln!(out, "{}", SEPARATOR)?;
    }

    Ok(())
}

/// Write the detailed report to `path`, replacing any existing file.
pub fn write_detailed(report: &DetailedReport, path: &Path) -> Result<()> {
    let to_error = |source| AuditError::WriteReport {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut out = BufWriter::new(file);
    render_detailed(report, &mut out).map_err(to_error)?;
    out.flush().map_err(to_error)?;
    Ok(())
}

/// Render the summary report. Only the title is styled.
pub fn render_summary<W: WriteColor>(summary: &SummaryResult, out: &mut W) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    out.set_color(&bold)?;
    write!(out, "Summary Report")?;
    out.reset()?;
    writeln!(out)?;

    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "Total File Count: {}", summary.file_count)?;
    writeln!(out, "Total Size: {} bytes", summary.total_size_bytes)?;
    match &summary.largest_file {
        Some(largest) => writeln!(
            out,
            "Largest File: {} {}",
            format_size(largest.size_bytes),
            largest.path.display()
        )?,
        None => writeln!(out, "Largest File: none")?,
    }
    writeln!(out, "{}", SEPARATOR)?;
    Ok(())
}

/// Print the summary report to stdout.
pub fn print_summary(summary: &SummaryResult, use_color: bool) -> Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);
    render_summary(summary, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
