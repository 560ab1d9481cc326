use serde::{Deserialize, Serialize};

use crate::sheet::Sheet;

/// A workbook: sheets in declared order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheets_mut(&mut self) -> &mut [Sheet] {
        &mut self.sheets
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// First sheet in declared order, if any. The replacement map is always
    /// read from here.
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }
}
