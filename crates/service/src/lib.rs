// Request pipeline around the replacement engine.
//
// This crate is the boundary a transport (HTTP handler, CLI, test harness)
// talks to: it validates the submission, runs the engine over every target
// workbook, and assembles the report and the downloadable archive. It holds
// no state across requests and performs no retries — any stage failure
// aborts the whole request.

pub mod auth;
pub mod error;
pub mod request;

pub use auth::{authorize, DEFAULT_SECRET};
pub use error::ProcessError;
pub use request::{process, ProcessRequest, ProcessResponse, TargetFile, ARCHIVE_FILE_NAME};
