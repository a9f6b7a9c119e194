/// All errors that can be returned by a `RecordStore` implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The selected backend is declared but not implemented.
    #[error("datastore backend '{backend}' is not implemented")]
    Unimplemented { backend: &'static str },

    /// A record could not be converted into the store's item format.
    #[error("record serialization failed: {message}")]
    Serialization { message: String },

    /// The provider rejected or failed the write.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The provider kept reporting unprocessed items past the retry budget.
    #[error("{count} items still unprocessed after {attempts} attempts")]
    UnprocessedItems { count: usize, attempts: u32 },
}
