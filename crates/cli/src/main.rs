// cellswap CLI - bulk find/replace across spreadsheet workbooks

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cellswap_service::{authorize, process, ProcessRequest, TargetFile, ARCHIVE_FILE_NAME};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
// 2 is clap's usage-error exit
pub const EXIT_IO_ERROR: u8 = 3;

/// Environment variable holding the gate secret. When set, `--password`
/// must match it before any file is touched.
const PASSWORD_ENV: &str = "CELLSWAP_PASSWORD";

#[derive(Parser)]
#[command(name = "cellswap")]
#[command(about = "Bulk, rule-driven find/replace across spreadsheet workbooks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite matching cells in target workbooks and bundle the results
    #[command(after_help = "\
The replacement map is a workbook whose first sheet holds key/value columns
under a header row. Matching is ordered: earlier rows win in full mode, and
apply first in partial mode.

Examples:
  cellswap process q1.xlsx q2.xlsx --replacement map.xlsx
  cellswap process book.xlsx -r map.xlsx --mode full -o out.zip
  cellswap process book.xlsx -r map.xlsx --report-only --json")]
    Process {
        /// Target workbooks (xlsx/xls/xlsb/ods), processed in order
        #[arg(required = true)]
        targets: Vec<PathBuf>,

        /// Replacement-map workbook
        #[arg(long, short = 'r')]
        replacement: PathBuf,

        /// Matching mode: "full" = whole-cell exact match, anything else = substring
        #[arg(long, default_value = "partial")]
        mode: String,

        /// Output archive path
        #[arg(long, short = 'o', default_value = ARCHIVE_FILE_NAME)]
        out: PathBuf,

        /// Print the report without writing the archive
        #[arg(long)]
        report_only: bool,

        /// Emit the report as JSON instead of text lines
        #[arg(long)]
        json: bool,

        /// Credential checked against CELLSWAP_PASSWORD when that is set
        #[arg(long)]
        password: Option<String>,

        /// Suppress report output
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            targets,
            replacement,
            mode,
            out,
            report_only,
            json,
            password,
            quiet,
        } => cmd_process(
            &targets,
            &replacement,
            &mode,
            &out,
            report_only,
            json,
            password.as_deref(),
            quiet,
        ),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err((code, message)) => {
            eprintln!("error: {message}");
            ExitCode::from(code)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_process(
    targets: &[PathBuf],
    replacement: &Path,
    mode: &str,
    out: &Path,
    report_only: bool,
    json: bool,
    password: Option<&str>,
    quiet: bool,
) -> Result<(), (u8, String)> {
    // Gate only when a secret is configured; a plain local run has no
    // transport boundary to guard.
    if let Ok(secret) = env::var(PASSWORD_ENV) {
        authorize(password, Some(&secret)).map_err(|e| (EXIT_ERROR, e.to_string()))?;
    }

    let replacement_bytes = fs::read(replacement)
        .map_err(|e| (EXIT_IO_ERROR, format!("cannot read {}: {e}", replacement.display())))?;

    let mut target_files = Vec::with_capacity(targets.len());
    for path in targets {
        let bytes = fs::read(path)
            .map_err(|e| (EXIT_IO_ERROR, format!("cannot read {}: {e}", path.display())))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        target_files.push(TargetFile { name, bytes });
    }

    let response = process(ProcessRequest {
        targets: target_files,
        replacement: replacement_bytes,
        mode: Some(mode.to_string()),
    })
    .map_err(|e| (EXIT_ERROR, e.to_string()))?;

    if !report_only {
        fs::write(out, &response.archive)
            .map_err(|e| (EXIT_IO_ERROR, format!("cannot write {}: {e}", out.display())))?;
        if !quiet {
            eprintln!("Wrote {}", out.display());
        }
    }

    if !quiet {
        if json {
            let rendered = serde_json::to_string_pretty(&response.outcomes)
                .map_err(|e| (EXIT_ERROR, format!("cannot render report: {e}")))?;
            println!("{rendered}");
        } else {
            println!("{}", response.report);
        }
    }

    Ok(())
}
