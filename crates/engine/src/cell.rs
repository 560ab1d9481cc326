use serde::{Deserialize, Serialize};

/// A scalar cell value.
///
/// Formulas are out of scope: workbooks are imported values-only, so a cell
/// is either text, a number, or a boolean. Date/time cells arrive as their
/// Excel serial number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Canonical display text for matching and reporting.
    ///
    /// Integral floats render without a decimal point ("42", not "42.0"),
    /// booleans as TRUE/FALSE.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Bool(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }
}
