use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkerError {
    #[error("Column not found in marker table: {0}")]
    MissingColumn(String),

    #[error("Row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
