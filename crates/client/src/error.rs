use grocery_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        field: Option<String>,
    },

    /// A blank item name was submitted; no request was sent.
    #[error("Item name is required")]
    EmptyName,

    /// The item is not in the local collection.
    #[error("Item {0} is not in the shopping list")]
    UnknownItem(DbId),
}

impl ClientError {
    /// Whether the server reported the item as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { code, .. } if code == "NOT_FOUND")
    }
}
