//! Delimited-text reading and writing for count matrices and result tables

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use ndarray::Array2;

use super::results::VariableGeneResults;
use super::xlsx::{is_workbook, write_results_workbook};
use crate::data::CountMatrix;
use crate::error::{Result, VarGenesError};

/// Column headers of the annotated table, after the gene id and sample columns
pub const RESULT_COLUMNS: [&str; 10] = [
    "basemean",
    "var",
    "dispersion",
    "log10_basemean",
    "log10_dispersion",
    "Bin",
    "meanOfBin",
    "stdOfBin",
    "disp_minus_mean",
    "outlier_by_bins",
];

/// Comma for `.csv` paths, tab for everything else
fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
        _ => b'\t',
    }
}

/// Empty cell for NaN, shortest round-trip representation otherwise
fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn parse_count(field: &str, gene_id: &str, sample_id: &str) -> Result<f64> {
    field.parse::<f64>().map_err(|_| VarGenesError::InvalidCountMatrix {
        reason: format!(
            "Invalid count value '{}' for gene '{}' in sample '{}'",
            field, gene_id, sample_id
        ),
    })
}

/// Read a count matrix from a delimited file.
///
/// Expected format: a header row, then one row per gene with the gene ID in
/// the first column and one numeric column per sample. Tab-separated unless
/// the file ends in `.csv`. A header that omits the gene-ID column (as R's
/// `write.table` produces for row names) is accepted as well.
pub fn read_count_matrix<P: AsRef<Path>>(path: P) -> Result<CountMatrix> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;

    let header: StringRecord = reader.headers()?.clone();
    if header.is_empty() {
        return Err(VarGenesError::EmptyData {
            reason: format!("Empty count file: {}", path.display()),
        });
    }

    let records: Vec<StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    if records.is_empty() {
        return Err(VarGenesError::EmptyData {
            reason: "No genes found in count matrix".to_string(),
        });
    }

    let row_names_header = records[0].len() == header.len() + 1;
    let sample_ids: Vec<String> = if row_names_header {
        header.iter().map(str::to_string).collect()
    } else {
        header.iter().skip(1).map(str::to_string).collect()
    };
    let n_samples = sample_ids.len();
    if n_samples == 0 {
        return Err(VarGenesError::InvalidCountMatrix {
            reason: "Not enough columns in header".to_string(),
        });
    }

    let mut gene_ids: Vec<String> = Vec::with_capacity(records.len());
    let mut values: Vec<f64> = Vec::with_capacity(records.len() * n_samples);

    for (row, record) in records.iter().enumerate() {
        if record.len() != n_samples + 1 {
            return Err(VarGenesError::InvalidCountMatrix {
                reason: format!(
                    "Row {} has {} columns, expected {}",
                    row + 2,
                    record.len(),
                    n_samples + 1
                ),
            });
        }

        let gene_id = &record[0];
        for (field, sample_id) in record.iter().skip(1).zip(sample_ids.iter()) {
            values.push(parse_count(field, gene_id, sample_id)?);
        }
        gene_ids.push(gene_id.to_string());
    }

    let counts = Array2::from_shape_vec((gene_ids.len(), n_samples), values).map_err(|e| {
        VarGenesError::InvalidCountMatrix {
            reason: e.to_string(),
        }
    })?;

    CountMatrix::new(counts, gene_ids, sample_ids)
}

/// Header of the annotated table: gene ID, sample columns, [`RESULT_COLUMNS`]
pub(super) fn table_header(results: &VariableGeneResults) -> Vec<&str> {
    let mut header: Vec<&str> = Vec::with_capacity(1 + results.sample_ids.len() + RESULT_COLUMNS.len());
    header.push("gene_id");
    header.extend(results.sample_ids.iter().map(String::as_str));
    header.extend(RESULT_COLUMNS.iter());
    header
}

/// Write the annotated gene table.
///
/// Columns: gene ID, the per-sample counts, then [`RESULT_COLUMNS`]. Unbinned
/// genes get `Bin = -1`; undefined statistics are written as empty cells.
/// A path ending in `.xlsx` produces an Excel workbook, `.csv` a
/// comma-separated file, anything else a tab-separated file.
pub fn write_results_table<P: AsRef<Path>>(path: P, results: &VariableGeneResults) -> Result<()> {
    let path = path.as_ref();
    if is_workbook(path) {
        return write_results_workbook(path, results);
    }

    let mut writer = WriterBuilder::new()
        .delimiter(delimiter_for(path))
        .from_path(path)?;

    let header = table_header(results);
    writer.write_record(&header)?;

    for (i, gene_id) in results.gene_ids.iter().enumerate() {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        row.push(gene_id.clone());
        row.extend(results.gene_counts(i).iter().map(|&c| format_value(c)));
        row.push(format_value(results.base_means[i]));
        row.push(format_value(results.variances[i]));
        row.push(format_value(results.dispersions[i]));
        row.push(format_value(results.log10_base_means[i]));
        row.push(format_value(results.log10_dispersions[i]));
        row.push(results.bin_index(i).to_string());
        row.push(format_value(results.bin_means[i]));
        row.push(format_value(results.bin_stds[i]));
        row.push(format_value(results.disp_minus_mean[i]));
        row.push(if results.outliers[i] { "True" } else { "False" }.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_read_count_matrix() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene_id\ts1\ts2\ts3").unwrap();
        writeln!(file, "gene1\t100\t200\t150").unwrap();
        writeln!(file, "\"gene2\"\t50.5\t75\t60").unwrap();

        let matrix = read_count_matrix(file.path()).unwrap();
        assert_eq!(matrix.n_genes(), 2);
        assert_eq!(matrix.n_samples(), 3);
        assert_eq!(matrix.gene_ids(), &["gene1", "gene2"]);
        assert_eq!(matrix.gene_counts(1).to_vec(), vec![50.5, 75.0, 60.0]);
    }

    #[test]
    fn test_read_row_names_header() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "s1\ts2").unwrap();
        writeln!(file, "gene1\t1\t2").unwrap();

        let matrix = read_count_matrix(file.path()).unwrap();
        assert_eq!(matrix.sample_ids(), &["s1", "s2"]);
        assert_eq!(matrix.gene_ids(), &["gene1"]);
    }

    #[test]
    fn test_read_csv_extension() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "gene,a,b").unwrap();
        writeln!(file, "g1,3,4").unwrap();

        let matrix = read_count_matrix(file.path()).unwrap();
        assert_eq!(matrix.sample_ids(), &["a", "b"]);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene_id\ts1\ts2").unwrap();
        writeln!(file, "gene1\t10\tNA?").unwrap();

        assert!(matches!(
            read_count_matrix(file.path()),
            Err(VarGenesError::InvalidCountMatrix { .. })
        ));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene_id\ts1\ts2").unwrap();
        writeln!(file, "gene1\t10\t20").unwrap();
        writeln!(file, "gene2\t10").unwrap();

        assert!(read_count_matrix(file.path()).is_err());
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            read_count_matrix(file.path()),
            Err(VarGenesError::EmptyData { .. })
        ));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(f64::NAN), "");
        assert_eq!(format_value(30.0), "30");
        assert_eq!(format_value(0.5), "0.5");
    }
}
