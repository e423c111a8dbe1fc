//! Excel workbook export of the annotated gene table

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use super::csv::table_header;
use super::results::VariableGeneResults;
use crate::error::{Result, VarGenesError};

const SHEET_NAME: &str = "variable_genes";

pub(super) fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// NaN is left as a blank cell
fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> std::result::Result<(), XlsxError> {
    if !value.is_nan() {
        sheet.write_number(row, col, value)?;
    }
    Ok(())
}

/// Write the annotated gene table as a single-sheet workbook.
///
/// Same columns as the delimited export. Numbers are stored as numeric
/// cells and the outlier flag as the strings `True`/`False`.
pub(super) fn write_results_workbook(path: &Path, results: &VariableGeneResults) -> Result<()> {
    let header = table_header(results);
    let too_large = |what: &str| VarGenesError::InvalidInput {
        reason: format!("too many {} for an Excel worksheet", what),
    };
    let n_cols = u16::try_from(header.len()).map_err(|_| too_large("columns"))?;
    u32::try_from(results.n_genes() + 1).map_err(|_| too_large("rows"))?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in (0..n_cols).zip(header.iter()) {
        sheet.write_string(0, col, *name)?;
    }

    let n_samples = results.sample_ids.len() as u16;
    for (i, gene_id) in results.gene_ids.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, gene_id.as_str())?;
        for (j, &count) in results.gene_counts(i).iter().enumerate() {
            write_value(sheet, row, 1 + j as u16, count)?;
        }

        let col = 1 + n_samples;
        let stats = [
            results.base_means[i],
            results.variances[i],
            results.dispersions[i],
            results.log10_base_means[i],
            results.log10_dispersions[i],
            results.bin_index(i) as f64,
            results.bin_means[i],
            results.bin_stds[i],
            results.disp_minus_mean[i],
        ];
        for (k, value) in stats.into_iter().enumerate() {
            write_value(sheet, row, col + k as u16, value)?;
        }
        let flag = if results.outliers[i] { "True" } else { "False" };
        sheet.write_string(row, col + stats.len() as u16, flag)?;
    }

    workbook.save(path)?;
    Ok(())
}
