use thiserror::Error;

/// Result type alias for struct conversion operations
pub type Result<T> = std::result::Result<T, StructsError>;

/// Errors that can occur when bridging between fixed-size matrix shapes
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructsError {
    #[error("unsupported matrix shape: cols={cols} rows={rows}")]
    DimensionMismatch { cols: usize, rows: usize },
}
