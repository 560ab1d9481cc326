// Replacement engine: workbook model + ordered key/value substitution

pub mod cell;
pub mod replace;
pub mod sheet;
pub mod workbook;

pub use cell::CellValue;
pub use replace::{FileOutcome, Mode, ReplacementPair, SheetOutcome};
pub use sheet::Sheet;
pub use workbook::Workbook;
