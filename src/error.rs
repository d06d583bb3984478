pub type Result<T> = std::result::Result<T, NotifierError>;

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    /// A Harvest API call failed, either on the wire or with a non-2xx status.
    #[error("Upstream error ({endpoint}): {message}")]
    Upstream {
        endpoint: &'static str,
        message: String,
    },

    /// The webhook post failed, either on the wire or with a non-2xx status.
    #[error("Delivery error: {message}")]
    Delivery { message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NotifierError {
    pub fn upstream(endpoint: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            endpoint,
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}
