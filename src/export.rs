use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::table::{Cell, Table};

pub fn query_export_file_name(query_id: u32, extension: &str) -> String {
    format!("query_{query_id}_results.{extension}")
}

pub fn query_export_path(dir: &Path, query_id: u32, extension: &str) -> PathBuf {
    dir.join(query_export_file_name(query_id, extension))
}

/// Header row followed by every row; NULL cells are written empty.
pub fn write_csv<W: Write>(table: &Table, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(&table.columns)
        .context("write csv header")?;
    for (idx, row) in table.rows.iter().enumerate() {
        writer
            .write_record(row.iter().map(|cell| cell.export_text()))
            .with_context(|| format!("write csv row {idx}"))?;
    }
    writer.flush().context("flush csv")?;
    Ok(())
}

pub fn csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

pub fn export_csv(table: &Table, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_csv(table, file)?;
    log::info!("exported {} rows to {}", table.rows.len(), path.display());
    Ok(())
}

pub fn export_xlsx(table: &Table, sheet_name: &str, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name)?;
        write_rows(sheet, table)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    log::info!("exported {} rows to {}", table.rows.len(), path.display());
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col_idx, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, name)
            .with_context(|| format!("write header cell {col_idx}"))?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        let xlsx_row = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            let written = match cell.as_f64() {
                Some(num) if !matches!(cell, Cell::Text(_)) => {
                    worksheet.write_number(xlsx_row, col, num).map(|_| ())
                }
                _ => worksheet
                    .write_string(xlsx_row, col, cell.export_text())
                    .map(|_| ()),
            };
            written.with_context(|| format!("write cell ({xlsx_row},{col_idx})"))?;
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create export dir {}", dir.display()))?;
        }
    }
    Ok(())
}
