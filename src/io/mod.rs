//! Input/Output operations

mod csv;
mod results;
mod summary;
mod xlsx;

pub use self::csv::{read_count_matrix, write_results_table, RESULT_COLUMNS};
pub use results::{ResultsSummary, VariableGeneResults};
pub use summary::{write_bin_summary, BinReport};
