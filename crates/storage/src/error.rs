/// Errors from storage-provider integrations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token endpoint rejected the request ({status}): {body}")]
    Token { status: u16, body: String },
}
