pub type SkucardResult<T> = Result<T, SkucardError>;

#[derive(thiserror::Error, Debug)]
pub enum SkucardError {
    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("composition error: {0}")]
    Compose(String),

    #[error("persistence error: {0}")]
    Persist(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SkucardError {
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn compose(msg: impl Into<String>) -> Self {
        Self::Compose(msg.into())
    }

    pub fn persist(msg: impl Into<String>) -> Self {
        Self::Persist(msg.into())
    }
}
