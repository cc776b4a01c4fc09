// src/export/format.rs
use crate::process::numeric::{decimal_places, parse_number};
use crate::process::raw_table::RawTable;

/// How a column is written to the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Written verbatim as text.
    Text,
    /// Numeric cells become numbers shown with `decimals` places.
    Numeric { decimals: usize },
}

/// Excel number format with exactly `decimals` digits after the point.
pub fn number_format(decimals: usize) -> String {
    if decimals == 0 {
        "0".to_string()
    } else {
        format!("0.{}", "0".repeat(decimals))
    }
}

/// Classify every column of `table`.
///
/// The `sentinel` column stays text. Any other column holding at least one
/// number is numeric, with the largest precision seen, capped at
/// `max_decimals`.
pub fn column_kinds(table: &RawTable, sentinel: &str, max_decimals: usize) -> Vec<ColumnKind> {
    (0..table.width())
        .map(|c| {
            if table.headers[c] == sentinel {
                return ColumnKind::Text;
            }
            table
                .column(c)
                .filter_map(decimal_places)
                .max()
                .map(|d| ColumnKind::Numeric {
                    decimals: d.min(max_decimals),
                })
                .unwrap_or(ColumnKind::Text)
        })
        .collect()
}

/// Value of one cell as it should land in the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    Blank,
    Text(&'a str),
    Number(f64),
}

pub fn cell_value(raw: &str, kind: ColumnKind) -> CellValue<'_> {
    if raw.is_empty() {
        return CellValue::Blank;
    }
    match kind {
        ColumnKind::Text => CellValue::Text(raw),
        ColumnKind::Numeric { .. } => match parse_number(raw) {
            Some(v) => CellValue::Number(v),
            None => CellValue::Text(raw),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_format_digits() {
        assert_eq!(number_format(0), "0");
        assert_eq!(number_format(1), "0.0");
        assert_eq!(number_format(4), "0.0000");
        for d in 1..=6 {
            let fmt = number_format(d);
            let (_, frac) = fmt.split_once('.').expect("decimal marker");
            assert_eq!(frac.len(), d);
        }
    }

    #[test]
    fn test_column_kinds() {
        let table = RawTable {
            headers: vec!["Date".into(), "Temp".into(), "Count".into(), "Note".into(), "Fine".into()],
            rows: vec![
                vec!["2024-01-01".into(), "5,2".into(), "3".into(), "ok".into(), "0.12345678".into()],
                vec!["2024-01-02".into(), "1.234,567".into(), "".into(), "".into(), "1".into()],
            ],
        };
        assert_eq!(
            column_kinds(&table, "Date", 6),
            vec![
                ColumnKind::Text,
                ColumnKind::Numeric { decimals: 3 },
                ColumnKind::Numeric { decimals: 0 },
                ColumnKind::Text,
                ColumnKind::Numeric { decimals: 6 },
            ]
        );
    }

    #[test]
    fn test_extreme_exponents_stay_numeric() {
        let table = RawTable {
            headers: vec!["Date".into(), "V".into()],
            rows: vec![
                vec!["d".into(), "1e-99999999999999999999".into()],
                vec!["d".into(), "1e-9223372036854775808".into()],
            ],
        };
        assert_eq!(
            column_kinds(&table, "Date", 6),
            vec![ColumnKind::Text, ColumnKind::Numeric { decimals: 6 }]
        );
        assert_eq!(
            cell_value(&table.rows[0][1], ColumnKind::Numeric { decimals: 6 }),
            CellValue::Number(0.0)
        );
    }

    #[test]
    fn test_date_column_never_numeric() {
        let table = RawTable {
            headers: vec!["Date".into(), "X".into()],
            rows: vec![vec!["45292".into(), "1".into()]],
        };
        assert_eq!(column_kinds(&table, "Date", 6)[0], ColumnKind::Text);
    }

    #[test]
    fn test_cell_values() {
        let num = ColumnKind::Numeric { decimals: 2 };
        assert_eq!(cell_value("12,5", num), CellValue::Number(12.5));
        assert_eq!(cell_value("err", num), CellValue::Text("err"));
        assert_eq!(cell_value("", num), CellValue::Blank);
        assert_eq!(cell_value("12,5", ColumnKind::Text), CellValue::Text("12,5"));
    }
}
