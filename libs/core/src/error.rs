use thiserror::Error;

/// Failures of the scan node's structural contracts.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A required field cannot be located in the source schema, or its type
    /// cannot widen to the declared output type. Fatal at plan construction
    /// time.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A record cannot be mapped to the expected shape. Fatal at the first
    /// occurrence during execution, never retried.
    #[error("row conversion failed: {0}")]
    Conversion(String),
}

impl ScanError {
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        ScanError::SchemaMismatch(message.into())
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        ScanError::Conversion(message.into())
    }
}
