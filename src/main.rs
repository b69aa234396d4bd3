//! CLI entry point for fileaudit

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use fileaudit::report::{REPORT_FILE_NAME, print_summary, write_detailed};
use fileaudit::{FilterSpec, Report, ReportMode, audit};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "fileaudit")]
#[command(about = "Analyze files under a directory by extension, size, permissions and age")]
#[command(
    long_about = "Analyze files under a directory by extension, size, permissions and age.\n\n\
    By default a detailed report is written to file_analysis.txt, listing every matched \
    file grouped by owner, with owners sorted by total size occupied. With -r a summary \
    (file count, total size, largest file) is printed instead."
)]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Directory to analyze
    directory: PathBuf,

    /// Only include files named *.EXT (exact, case-sensitive)
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    extension: Option<String>,

    /// Size filter in bytes: +N larger than, -N smaller than, =N exactly N
    #[arg(short = 's', long = "size", value_name = "SIZE", allow_hyphen_values = true)]
    size: Option<String>,

    /// Permission filter: octal (644) or symbolic (u=rw,go=r) mode;
    /// prefix with - to require all bits or / to require any bit
    #[arg(
        short = 'p',
        long = "permissions",
        value_name = "MODE",
        allow_hyphen_values = true
    )]
    permissions: Option<String>,

    /// Modified filter in days: +N more than N days ago, -N within the last N days
    #[arg(short = 'm', long = "modified", value_name = "DAYS", allow_hyphen_values = true)]
    modified: Option<String>,

    /// Print a summary report to stdout instead of writing the detailed report
    #[arg(short = 'r', long = "report")]
    report: bool,

    /// Log filter details and walk statistics to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            extension: self.extension.clone(),
            size: self.size.clone(),
            permissions: self.permissions.clone(),
            modified: self.modified.clone(),
        }
    }

    fn mode(&self) -> ReportMode {
        if self.report {
            ReportMode::Summary
        } else {
            ReportMode::Detailed
        }
    }
}

/// Color is used only on a terminal and only when NO_COLOR is unset.
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let matches = Args::command().try_get_matches().unwrap_or_else(|e| {
        let code = match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
            _ => 1,
        };
        let _ = e.print();
        process::exit(code);
    });
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| {
        eprintln!("fileaudit: argument parsing error: {}", e);
        process::exit(1);
    });

    init_logging(args.verbose);

    let result = audit(&args.directory, &args.filter_spec(), args.mode()).and_then(|report| {
        match report {
            Report::Detailed(detailed) => {
                write_detailed(&detailed, Path::new(REPORT_FILE_NAME))?;
                log::debug!(
                    "wrote {} files for {} owners to {}",
                    detailed.file_count(),
                    detailed.owners.len(),
                    REPORT_FILE_NAME
                );
                Ok(())
            }
            Report::Summary(summary) => print_summary(&summary, should_use_color()),
        }
    });

    if let Err(e) = result {
        eprintln!("fileaudit: {}", e);
        process::exit(1);
    }
}
