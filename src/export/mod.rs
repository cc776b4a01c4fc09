// src/export/mod.rs
pub mod format;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ConvertError, Result};
use crate::process::raw_table::RawTable;
use format::{cell_value, column_kinds, number_format, CellValue, ColumnKind};

/// Extension of the files this module produces.
pub const SPREADSHEET_EXTENSION: &str = "xlsx";

/// Write `table` to a new workbook at `path`: a header row followed by one
/// row per record. The `sentinel` column is kept as text; numeric columns
/// get a fixed decimal format derived from their data.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display(), rows = table.len()))]
pub fn write_xlsx<P: AsRef<Path>>(
    table: &RawTable,
    sentinel: &str,
    max_decimals: usize,
    path: P,
) -> Result<Vec<ColumnKind>> {
    let path = path.as_ref();
    let kinds = column_kinds(table, sentinel, max_decimals);
    debug!(?kinds, "column formats");

    build_workbook(table, &kinds)
        .and_then(|mut wb| wb.save(path))
        .map_err(|e| ConvertError::WriteFailure {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    info!(columns = kinds.len(), "workbook written");
    Ok(kinds)
}

fn build_workbook(table: &RawTable, kinds: &[ColumnKind]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    // text columns never receive numbers, their format is unused
    let formats: Vec<Format> = kinds
        .iter()
        .map(|k| match k {
            ColumnKind::Numeric { decimals } => Format::new().set_num_format(number_format(*decimals)),
            ColumnKind::Text => Format::new(),
        })
        .collect();

    for (c, name) in table.headers.iter().enumerate() {
        sheet.write_string_with_format(0, col_num(c)?, name, &header_format)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row_num = u32::try_from(r + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (c, ((raw, kind), fmt)) in row.iter().zip(kinds).zip(&formats).enumerate() {
            match cell_value(raw, *kind) {
                CellValue::Blank => {}
                CellValue::Number(v) => {
                    sheet.write_number_with_format(row_num, col_num(c)?, v, fmt)?;
                }
                CellValue::Text(s) => {
                    sheet.write_string(row_num, col_num(c)?, s)?;
                }
            }
        }
    }

    Ok(workbook)
}

fn col_num(c: usize) -> Result<u16, XlsxError> {
    u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::{fs::File, io::Read};
    use tempfile::tempdir;

    fn read_part(path: &Path, name: &str) -> Result<String> {
        let mut archive = zip::ZipArchive::new(File::open(path)?)?;
        let mut part = archive.by_name(name)?;
        let mut text = String::new();
        part.read_to_string(&mut text)?;
        Ok(text)
    }

    fn sample_table() -> RawTable {
        RawTable {
            headers: vec!["Date".into(), "Temp".into(), "Count".into()],
            rows: vec![
                vec!["2024-01-01".into(), "5,125".into(), "3".into()],
                vec!["2024-01-02".into(), "1.5".into(), "".into()],
            ],
        }
    }

    #[test]
    fn test_number_format_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.xlsx");

        let kinds = write_xlsx(&sample_table(), "Date", 6, &path)?;
        assert_eq!(kinds[1], ColumnKind::Numeric { decimals: 3 });

        let styles = read_part(&path, "xl/styles.xml")?;
        assert!(
            styles.contains(r#"formatCode="0.000""#),
            "number format missing from styles: {styles}"
        );

        let strings = read_part(&path, "xl/sharedStrings.xml")?;
        assert!(strings.contains("2024-01-01"), "date written as text");
        Ok(())
    }

    #[test]
    fn test_precision_is_capped() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("capped.xlsx");
        let table = RawTable {
            headers: vec!["Date".into(), "V".into()],
            rows: vec![vec!["d".into(), "0,123456789".into()]],
        };
        let kinds = write_xlsx(&table, "Date", 4, &path)?;
        assert_eq!(kinds[1], ColumnKind::Numeric { decimals: 4 });
        assert!(read_part(&path, "xl/styles.xml")?.contains(r#"formatCode="0.0000""#));
        Ok(())
    }

    fn attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
        let key = format!("{name}=\"");
        let start = tag.find(&key)? + key.len();
        let len = tag[start..].find('"')?;
        Some(&tag[start..start + len])
    }

    /// Number format string applied to `cell` (e.g. "B2") of the first sheet.
    fn cell_number_format(path: &Path, cell: &str) -> Result<String> {
        let sheet = read_part(path, "xl/worksheets/sheet1.xml")?;
        let tag_start = sheet
            .find(&format!("<c r=\"{cell}\""))
            .ok_or_else(|| anyhow::anyhow!("cell {cell} missing"))?;
        let tag = &sheet[tag_start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        let style: usize = attr(tag, " s").unwrap_or("0").parse()?;

        let styles = read_part(path, "xl/styles.xml")?;
        let xfs_start = styles
            .find("<cellXfs")
            .ok_or_else(|| anyhow::anyhow!("no cellXfs"))?;
        let xfs = &styles[xfs_start..];
        let xfs = &xfs[..xfs.find("</cellXfs>").unwrap_or(xfs.len())];
        let xf = xfs
            .split("<xf ")
            .nth(style + 1)
            .ok_or_else(|| anyhow::anyhow!("no xf {style}"))?;
        let id: u32 = attr(xf, "numFmtId").unwrap_or("0").parse()?;

        Ok(match id {
            0 => "General".to_string(),
            1 => "0".to_string(),
            2 => "0.00".to_string(),
            _ => {
                let decl = format!("<numFmt numFmtId=\"{id}\"");
                let at = styles
                    .find(&decl)
                    .ok_or_else(|| anyhow::anyhow!("numFmt {id} missing"))?;
                attr(&styles[at..], "formatCode")
                    .ok_or_else(|| anyhow::anyhow!("formatCode missing"))?
                    .to_string()
            }
        })
    }

    #[test]
    fn test_cell_format_matches_precision() -> Result<()> {
        let dir = tempdir()?;
        for d in 0..=6 {
            let path = dir.path().join(format!("d{d}.xlsx"));
            let value = if d == 0 {
                "3".to_string()
            } else {
                format!("1,{}", "5".repeat(d))
            };
            let table = RawTable {
                headers: vec!["Date".into(), "V".into()],
                rows: vec![vec!["2024-01-01".into(), value]],
            };
            let kinds = write_xlsx(&table, "Date", 6, &path)?;
            assert_eq!(kinds[1], ColumnKind::Numeric { decimals: d });
            assert_eq!(cell_number_format(&path, "B2")?, number_format(d), "d = {d}");
        }
        Ok(())
    }

    #[test]
    fn test_unwritable_path_is_write_failure() {
        let err = write_xlsx(&sample_table(), "Date", 6, "/no/such/dir/out.xlsx").unwrap_err();
        assert_eq!(err.kind(), "write_failure");
    }
}
