use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("relay reported an error: {0}")]
    Relay(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON encoding error for {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no <pre> block in relayed page for {url}")]
    MissingPreBlock { url: String },

    #[error("product {product_id} has no usable card16x9 or logo image")]
    MissingImage { product_id: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl StoreError {
    /// Returns `true` when the upstream answered but the payload did not have
    /// the expected shape, as opposed to a transport or relay failure.
    #[must_use]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            StoreError::Deserialize { .. }
                | StoreError::MissingPreBlock { .. }
                | StoreError::MissingImage { .. }
        )
    }
}
