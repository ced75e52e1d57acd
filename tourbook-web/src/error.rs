use tourbook_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Malformed page event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("storage.backend is redis but storage.redis_url is not set")]
    MissingRedisUrl,
}

pub type WebResult<T> = Result<T, WebError>;
