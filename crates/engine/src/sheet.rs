use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// One worksheet: a name plus its populated cells.
///
/// Cells are keyed by `(row, col)` in a BTreeMap so iteration is row-major
/// (rows outer, columns inner, both ascending) without an explicit sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(usize, usize), CellValue>,
    /// Whether the source sheet declared a used range. A sheet can declare a
    /// range yet hold no populated cells; one that declares none is skipped
    /// by the walker and produces no report line.
    pub has_range: bool,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: BTreeMap::new(),
            has_range: false,
        }
    }

    /// Set a cell value. Marks the sheet as ranged.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        self.cells.insert((row, col), value);
        self.has_range = true;
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Populated cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (&(usize, usize), &CellValue)> {
        self.cells.iter()
    }

    /// Populated cells in row-major order, values mutable.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = (&(usize, usize), &mut CellValue)> {
        self.cells.iter_mut()
    }

    /// Rows of the used range's first two columns, in row order. Used to
    /// read a replacement map sheet: yields `(row, first, second)` with
    /// absent cells as `None`. The base column is the leftmost populated
    /// one, so a map sheet's data need not start in column A.
    pub fn two_column_rows(&self) -> Vec<(usize, Option<&CellValue>, Option<&CellValue>)> {
        let Some(base) = self.cells.keys().map(|(_, c)| *c).min() else {
            return Vec::new();
        };
        let mut rows: Vec<usize> = self
            .cells
            .keys()
            .filter(|(_, c)| *c <= base + 1)
            .map(|(r, _)| *r)
            .collect();
        rows.dedup();
        rows.into_iter()
            .map(|r| (r, self.get(r, base), self.get(r, base + 1)))
            .collect()
    }
}
