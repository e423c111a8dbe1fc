//! Data structures for variable-gene detection

mod count_matrix;
mod expression;

pub use count_matrix::CountMatrix;
pub use expression::GeneExpressionTable;
