//! Ordered key/value substitution over workbook cells.
//!
//! The replacement map is an explicit ordered sequence of pairs, not a hash
//! map: order is semantically significant. In exact mode the first matching
//! pair wins and iteration stops; in substring mode every pair is applied in
//! turn to the *current* value, so a later pair's key may match text
//! introduced by an earlier pair's replacement. That cumulative rewrite is
//! deliberate, contract-level behavior.

use serde::Serialize;

use crate::cell::CellValue;
use crate::sheet::Sheet;
use crate::workbook::Workbook;

/// Matching mode for a whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Cell value must equal a key exactly; first matching pair wins.
    Full,
    /// Every occurrence of every key is replaced, literally, in pair order.
    Partial,
}

impl Mode {
    /// Parse the request's mode field: `"full"` selects exact matching,
    /// anything else (including absent) selects substring matching.
    pub fn from_field(field: Option<&str>) -> Self {
        match field {
            Some("full") => Mode::Full,
            _ => Mode::Partial,
        }
    }
}

/// One key → value substitution rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplacementPair {
    pub key: String,
    pub value: String,
}

/// Per-sheet replacement tally.
#[derive(Debug, Clone, Serialize)]
pub struct SheetOutcome {
    pub sheet_name: String,
    pub replaced: usize,
}

/// Per-file replacement tally, one entry per ranged sheet in declared order.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file_name: String,
    pub sheets: Vec<SheetOutcome>,
}

impl FileOutcome {
    pub fn total_replaced(&self) -> usize {
        self.sheets.iter().map(|s| s.replaced).sum()
    }
}

/// Build the ordered replacement map from the map workbook's first sheet.
///
/// Row 0 is a header and is skipped. Keys and values come from the used
/// range's first two columns, wherever that range starts. A row is included
/// only when both cells are defined — an explicit empty *value* is a
/// deletion rule and is kept; scalars are coerced to their canonical
/// display text. Rows whose coerced key is empty are dropped — an empty key
/// would match every cell unconditionally in substring mode. Duplicate keys
/// are kept; earlier rows take precedence by construction of the matching
/// algorithms.
pub fn build_map(replacement: &Workbook) -> Vec<ReplacementPair> {
    let Some(sheet) = replacement.first_sheet() else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for (row, key, value) in sheet.two_column_rows() {
        if row == 0 {
            continue; // header
        }
        let (Some(key), Some(value)) = (key, value) else {
            continue;
        };
        let key = key.display();
        if key.is_empty() {
            continue;
        }
        pairs.push(ReplacementPair {
            key,
            value: value.display(),
        });
    }
    pairs
}

/// Apply the replacement map to one cell's display text.
///
/// Returns the new text and the number of pair-applications that matched.
/// A pair counts when its key matched, whether or not the replacement text
/// differs from what it replaced.
pub fn apply(value: &str, mode: Mode, pairs: &[ReplacementPair]) -> (String, usize) {
    match mode {
        Mode::Full => {
            for pair in pairs {
                if value == pair.key {
                    return (pair.value.clone(), 1);
                }
            }
            (value.to_string(), 0)
        }
        Mode::Partial => {
            let mut current = value.to_string();
            let mut matched = 0;
            for pair in pairs {
                if current.contains(&pair.key) {
                    // str::replace is literal and replaces every occurrence.
                    current = current.replace(&pair.key, &pair.value);
                    matched += 1;
                }
            }
            (current, matched)
        }
    }
}

/// Run the matcher over every populated cell of one sheet, in row-major
/// order, writing changed values back.
///
/// A rewritten cell always becomes textual, so a numeric cell whose value
/// was substituted is not silently coerced back to a number on re-encode.
/// Returns `None` for a sheet that declared no used range — such sheets
/// contribute no report line at all.
pub fn walk_sheet(sheet: &mut Sheet, pairs: &[ReplacementPair], mode: Mode) -> Option<SheetOutcome> {
    if !sheet.has_range {
        return None;
    }

    let mut replaced = 0;
    for (_, cell) in sheet.cells_mut() {
        let original = cell.display();
        let (new_value, matched) = apply(&original, mode, pairs);
        replaced += matched;
        if new_value != original {
            *cell = CellValue::Text(new_value);
        }
    }

    Some(SheetOutcome {
        sheet_name: sheet.name.clone(),
        replaced,
    })
}

/// Run the walker over every sheet of one workbook, in declared order.
pub fn process_workbook(
    workbook: &mut Workbook,
    file_name: &str,
    pairs: &[ReplacementPair],
    mode: Mode,
) -> FileOutcome {
    let sheets = workbook
        .sheets_mut()
        .iter_mut()
        .filter_map(|sheet| walk_sheet(sheet, pairs, mode))
        .collect();

    FileOutcome {
        file_name: file_name.to_string(),
        sheets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<ReplacementPair> {
        entries
            .iter()
            .map(|(k, v)| ReplacementPair {
                key: k.to_string(),
                value: v.to_string(),
            })
            .collect()
    }

    // ── Matcher ─────────────────────────────────────────────────────

    #[test]
    fn full_mode_first_matching_pair_wins() {
        let map = pairs(&[("A", "X"), ("AA", "Y")]);
        assert_eq!(apply("A", Mode::Full, &map), ("X".to_string(), 1));
        assert_eq!(apply("AA", Mode::Full, &map), ("Y".to_string(), 1));
    }

    #[test]
    fn full_mode_requires_exact_equality() {
        let map = pairs(&[("A", "X"), ("AA", "Y")]);
        assert_eq!(apply("AAB", Mode::Full, &map), ("AAB".to_string(), 0));
    }

    #[test]
    fn full_mode_duplicate_keys_earlier_wins() {
        let map = pairs(&[("A", "first"), ("A", "second")]);
        assert_eq!(apply("A", Mode::Full, &map), ("first".to_string(), 1));
    }

    #[test]
    fn partial_mode_replaces_all_occurrences() {
        let map = pairs(&[("ab", "x")]);
        assert_eq!(apply("ab-ab-ab", Mode::Partial, &map), ("x-x-x".to_string(), 1));
    }

    #[test]
    fn partial_mode_cumulative_rewrite() {
        // The second pair's key matches text the first pair introduced.
        let map = pairs(&[("foo", "bar"), ("bar", "baz")]);
        assert_eq!(apply("foo", Mode::Partial, &map), ("baz".to_string(), 2));
    }

    #[test]
    fn partial_mode_keys_are_literal_not_patterns() {
        let map = pairs(&[("a.c", "X")]);
        // "abc" must not match the dot as a wildcard.
        assert_eq!(apply("abc", Mode::Partial, &map), ("abc".to_string(), 0));
        assert_eq!(apply("a.c", Mode::Partial, &map), ("X".to_string(), 1));
    }

    #[test]
    fn empty_map_leaves_value_untouched() {
        assert_eq!(apply("anything", Mode::Full, &[]), ("anything".to_string(), 0));
        assert_eq!(apply("anything", Mode::Partial, &[]), ("anything".to_string(), 0));
    }

    #[test]
    fn mode_field_parsing() {
        assert_eq!(Mode::from_field(Some("full")), Mode::Full);
        assert_eq!(Mode::from_field(Some("partial")), Mode::Partial);
        assert_eq!(Mode::from_field(Some("anything-else")), Mode::Partial);
        assert_eq!(Mode::from_field(None), Mode::Partial);
    }

    // ── Map builder ─────────────────────────────────────────────────

    fn map_workbook(rows: &[(Option<CellValue>, Option<CellValue>)]) -> Workbook {
        let mut sheet = Sheet::new("Map");
        sheet.set(0, 0, CellValue::Text("key".into()));
        sheet.set(0, 1, CellValue::Text("value".into()));
        for (i, (k, v)) in rows.iter().enumerate() {
            if let Some(k) = k {
                sheet.set(i + 1, 0, k.clone());
            }
            if let Some(v) = v {
                sheet.set(i + 1, 1, v.clone());
            }
        }
        let mut wb = Workbook::new();
        wb.add_sheet(sheet);
        wb
    }

    fn text(s: &str) -> Option<CellValue> {
        Some(CellValue::Text(s.to_string()))
    }

    #[test]
    fn build_map_skips_header_and_preserves_order() {
        let wb = map_workbook(&[(text("b"), text("1")), (text("a"), text("2"))]);
        let map = build_map(&wb);
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].key, "b");
        assert_eq!(map[1].key, "a");
    }

    #[test]
    fn build_map_requires_both_columns() {
        let wb = map_workbook(&[
            (text("only-key"), None),
            (None, text("only-value")),
            (text("both"), text("ok")),
        ]);
        let map = build_map(&wb);
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].key, "both");
    }

    #[test]
    fn build_map_coerces_scalars_to_display_text() {
        let wb = map_workbook(&[(
            Some(CellValue::Number(42.0)),
            Some(CellValue::Bool(true)),
        )]);
        let map = build_map(&wb);
        assert_eq!(map[0].key, "42");
        assert_eq!(map[0].value, "TRUE");
    }

    #[test]
    fn build_map_keeps_empty_values_as_deletion_rules() {
        let wb = map_workbook(&[(text("foo"), text(""))]);
        let map = build_map(&wb);
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].key, "foo");
        assert_eq!(map[0].value, "");
        // The deletion rule erases every occurrence in substring mode.
        assert_eq!(apply("foobar foo", Mode::Partial, &map), ("bar ".to_string(), 1));
    }

    #[test]
    fn build_map_follows_a_used_range_off_column_a() {
        let mut sheet = Sheet::new("Map");
        sheet.set(0, 2, CellValue::Text("key".into()));
        sheet.set(0, 3, CellValue::Text("value".into()));
        sheet.set(1, 2, CellValue::Text("a".into()));
        sheet.set(1, 3, CellValue::Text("x".into()));
        let mut wb = Workbook::new();
        wb.add_sheet(sheet);

        let map = build_map(&wb);
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].key, "a");
        assert_eq!(map[0].value, "x");
    }

    #[test]
    fn build_map_drops_empty_keys_and_keeps_duplicates() {
        let wb = map_workbook(&[
            (text(""), text("dropped")),
            (text("dup"), text("first")),
            (text("dup"), text("second")),
        ]);
        let map = build_map(&wb);
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].value, "first");
        assert_eq!(map[1].value, "second");
    }

    // ── Walker ──────────────────────────────────────────────────────

    #[test]
    fn walker_counts_every_matching_cell() {
        let mut sheet = Sheet::new("Data");
        sheet.set(0, 0, CellValue::Text("A".into()));
        sheet.set(0, 1, CellValue::Text("B".into()));
        sheet.set(1, 0, CellValue::Text("A".into()));

        let map = pairs(&[("A", "X")]);
        let outcome = walk_sheet(&mut sheet, &map, Mode::Full).unwrap();
        assert_eq!(outcome.replaced, 2);
        assert_eq!(sheet.get(0, 0), Some(&CellValue::Text("X".into())));
        assert_eq!(sheet.get(0, 1), Some(&CellValue::Text("B".into())));
        assert_eq!(sheet.get(1, 0), Some(&CellValue::Text("X".into())));
    }

    #[test]
    fn walker_retypes_rewritten_numeric_cells() {
        let mut sheet = Sheet::new("Data");
        sheet.set(0, 0, CellValue::Number(42.0));
        sheet.set(0, 1, CellValue::Number(7.0));

        let map = pairs(&[("42", "forty-two")]);
        let outcome = walk_sheet(&mut sheet, &map, Mode::Full).unwrap();
        assert_eq!(outcome.replaced, 1);
        // Matched numeric cell becomes textual.
        assert_eq!(sheet.get(0, 0), Some(&CellValue::Text("forty-two".into())));
        // Unmatched numeric cell keeps its type and value.
        assert_eq!(sheet.get(0, 1), Some(&CellValue::Number(7.0)));
    }

    #[test]
    fn walker_with_empty_map_changes_nothing() {
        let mut sheet = Sheet::new("Data");
        sheet.set(0, 0, CellValue::Number(1.5));
        sheet.set(0, 1, CellValue::Text("hello".into()));

        let outcome = walk_sheet(&mut sheet, &[], Mode::Partial).unwrap();
        assert_eq!(outcome.replaced, 0);
        assert_eq!(sheet.get(0, 0), Some(&CellValue::Number(1.5)));
        assert_eq!(sheet.get(0, 1), Some(&CellValue::Text("hello".into())));
    }

    #[test]
    fn walker_skips_rangeless_sheets() {
        let mut sheet = Sheet::new("Empty");
        assert!(walk_sheet(&mut sheet, &[], Mode::Full).is_none());
    }

    #[test]
    fn process_workbook_visits_sheets_in_declared_order() {
        let mut wb = Workbook::new();
        let mut first = Sheet::new("First");
        first.set(0, 0, CellValue::Text("A".into()));
        let mut second = Sheet::new("Second");
        second.set(0, 0, CellValue::Text("A".into()));
        second.set(0, 1, CellValue::Text("A".into()));
        wb.add_sheet(first);
        wb.add_sheet(Sheet::new("Rangeless"));
        wb.add_sheet(second);

        let map = pairs(&[("A", "X")]);
        let outcome = process_workbook(&mut wb, "book.xlsx", &map, Mode::Full);
        assert_eq!(outcome.file_name, "book.xlsx");
        let names: Vec<&str> = outcome.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(outcome.total_replaced(), 3);
    }
}
