// The request pipeline: one linear pass, all-or-nothing.
//
// Map build -> per-file decode/walk/encode -> report -> archive. Files are
// processed strictly in submission order, sheets in declared order; the
// next file is not started until the previous one has re-encoded.

use cellswap_engine::replace::{self, Mode};
use cellswap_engine::FileOutcome;
use cellswap_io::{bundle, xlsx};

use crate::error::ProcessError;

/// Suggested download filename for the archive.
pub const ARCHIVE_FILE_NAME: &str = "processed_files.zip";

/// Content type of the archive payload.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// One submitted target workbook.
#[derive(Debug, Clone)]
pub struct TargetFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A complete replacement submission.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Target workbooks, in submission order. Must be non-empty.
    pub targets: Vec<TargetFile>,
    /// The replacement-map workbook payload. Must be non-empty.
    pub replacement: Vec<u8>,
    /// Mode field as submitted: `"full"` selects exact matching, anything
    /// else (including absent) selects substring matching.
    pub mode: Option<String>,
}

/// The finished archive plus the report surfaced separately, so a caller
/// can render a summary without opening the archive.
#[derive(Debug)]
pub struct ProcessResponse {
    pub archive: Vec<u8>,
    pub report: String,
    /// Per-file tallies, in submission order.
    pub outcomes: Vec<FileOutcome>,
}

impl ProcessResponse {
    /// The report, percent-encoded for header transport.
    pub fn report_header(&self) -> String {
        urlencoding::encode(&self.report).into_owned()
    }
}

/// Run a replacement request to completion.
pub fn process(request: ProcessRequest) -> Result<ProcessResponse, ProcessError> {
    if request.targets.is_empty() {
        return Err(ProcessError::MissingInput("targets"));
    }
    if request.replacement.is_empty() {
        return Err(ProcessError::MissingInput("replacement"));
    }

    let mode = Mode::from_field(request.mode.as_deref());

    let map_workbook = xlsx::import(&request.replacement).map_err(|message| {
        ProcessError::Decode {
            file: "replacement".to_string(),
            message,
        }
    })?;
    let pairs = replace::build_map(&map_workbook);

    let mut outcomes: Vec<FileOutcome> = Vec::with_capacity(request.targets.len());
    let mut entries: Vec<(String, Vec<u8>)> = Vec::with_capacity(request.targets.len() + 1);

    for target in &request.targets {
        let mut workbook = xlsx::import(&target.bytes).map_err(|message| {
            ProcessError::Decode {
                file: target.name.clone(),
                message,
            }
        })?;

        let outcome = replace::process_workbook(&mut workbook, &target.name, &pairs, mode);

        let bytes = xlsx::export(&workbook).map_err(|message| ProcessError::Encode {
            file: target.name.clone(),
            message,
        })?;

        entries.push((format!("replaced_{}", target.name), bytes));
        outcomes.push(outcome);
    }

    let report = render_report(&outcomes);
    entries.push(("report.txt".to_string(), report.clone().into_bytes()));

    let archive = bundle::write_archive(&entries).map_err(ProcessError::Bundle)?;

    Ok(ProcessResponse {
        archive,
        report,
        outcomes,
    })
}

/// One line per ranged sheet, files in submission order then sheets in
/// declared order.
pub fn render_report(outcomes: &[FileOutcome]) -> String {
    let mut lines = Vec::new();
    for file in outcomes {
        for sheet in &file.sheets {
            lines.push(format!(
                "File: {} | Sheet: {} | Replaced: {}",
                file.file_name, sheet.sheet_name, sheet.replaced
            ));
        }
    }
    lines.join("\n")
}
