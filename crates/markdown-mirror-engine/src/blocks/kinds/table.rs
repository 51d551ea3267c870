use once_cell::sync::Lazy;
use regex::Regex;

use crate::cst::TableAlign;

/// A GFM table's delimiter row: at least two columns of `:?-{3,}:?` cells.
static DELIMITER_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|?\s*:?-{3,}:?\s*(\|\s*:?-{3,}:?\s*)+\|?$").unwrap());

/// GFM table recognition helpers.
///
/// A table forms when a single-line paragraph is followed by a delimiter row
/// with the same cell count; body rows are the following non-blank lines
/// containing a pipe.
pub struct Table;

impl Table {
    pub fn is_delimiter_row(text: &str) -> bool {
        DELIMITER_ROW.is_match(text)
    }

    /// Per-column alignment from the delimiter row.
    pub fn parse_aligns(text: &str) -> Vec<TableAlign> {
        Self::split_cells(text)
            .iter()
            .map(|(_, cell)| {
                let trimmed = cell.trim();
                let left = trimmed.starts_with(':');
                let right = trimmed.len() > 1 && trimmed.ends_with(':');
                match (left, right) {
                    (true, true) => TableAlign::Center,
                    (true, false) => TableAlign::Left,
                    (false, true) => TableAlign::Right,
                    (false, false) => TableAlign::None,
                }
            })
            .collect()
    }

    /// Splits a row into `(code-point offset, raw cell)` pairs between
    /// unescaped pipes. Leading and trailing pipes delimit, they do not
    /// produce empty cells.
    pub fn split_cells(text: &str) -> Vec<(usize, &str)> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let n = chars.len();
        let mut cells = Vec::new();

        let mut cell_start = usize::from(chars.first().map(|&(_, c)| c) == Some('|'));
        let mut escaped = false;
        for k in cell_start..n {
            let c = chars[k].1;
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '|' => {
                    cells.push((cell_start, &text[chars[cell_start].0..chars[k].0]));
                    cell_start = k + 1;
                }
                _ => {}
            }
        }
        if cell_start < n {
            cells.push((cell_start, &text[chars[cell_start].0..]));
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_delimiter_rows() {
        assert!(Table::is_delimiter_row("| --- | --- |"));
        assert!(Table::is_delimiter_row(":--- | ---:"));
        assert!(Table::is_delimiter_row("|:---:|----|"));
    }

    #[test]
    fn rejects_non_delimiter_rows() {
        assert!(!Table::is_delimiter_row("| -- | -- |")); // too short
        assert!(!Table::is_delimiter_row("| --- |")); // single column
        assert!(!Table::is_delimiter_row("a | b"));
    }

    #[test]
    fn alignments_from_colons() {
        assert_eq!(
            Table::parse_aligns("| :--- | :---: | ---: | --- |"),
            vec![
                TableAlign::Left,
                TableAlign::Center,
                TableAlign::Right,
                TableAlign::None
            ]
        );
    }

    #[test]
    fn split_cells_handles_outer_pipes() {
        let cells = Table::split_cells("| a | b |");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], (1, " a "));
        assert_eq!(cells[1], (5, " b "));

        let cells = Table::split_cells("a|b");
        assert_eq!(cells, vec![(0, "a"), (2, "b")]);
    }

    #[test]
    fn split_cells_skips_escaped_pipes() {
        let cells = Table::split_cells("a \\| b|c");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].1, "a \\| b");
    }
}
