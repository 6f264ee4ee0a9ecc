use thiserror::Error;

/// Failures the adapter surfaces to the host.
///
/// Anything else (a search with no match, a click on an element without an
/// identifier) degrades silently and is only logged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Unknown switch key or an unusable configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A required element or global entry point is absent from the embedded document.
    #[error("binding error: {0}")]
    Binding(String),
}

impl BridgeError {
    pub fn unknown_switch(key: &str) -> Self {
        Self::Configuration(format!("unknown switch `{key}`"))
    }

    pub fn missing(what: impl Into<String>) -> Self {
        Self::Binding(format!("missing {}", what.into()))
    }

    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    #[inline]
    pub fn is_binding(&self) -> bool {
        matches!(self, Self::Binding(_))
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
