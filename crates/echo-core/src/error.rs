//! Error types for the EchoWhisper companion.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire companion.
///
/// Variants follow the failure taxonomy of the session core: input validation,
/// configuration, upstream model failures, client-side network failures and
/// storage corruption, plus the bookkeeping errors of the persistence layer.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EchoError {
    /// Empty or oversized input, rejected before any network or storage effect
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing upstream credential or malformed configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-success response from the model call
    #[error("Upstream failure: {message}")]
    Upstream {
        status_code: Option<u16>,
        message: String,
    },

    /// Transport failure before an upstream response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Persisted data could not be parsed or migrated
    #[error("Storage corruption in {collection}: {message}")]
    StorageCorruption {
        collection: &'static str,
        message: String,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Caller exceeded its request budget
    #[error("Rate limit exceeded for '{token}' (limit {limit})")]
    RateLimited { token: String, limit: u32 },

    /// A premium personality was selected without an active entitlement
    #[error("Entitlement required: {0}")]
    Entitlement(String),

    /// A model call is already outstanding for this session
    #[error("A response is still pending; wait before sending again")]
    SendInFlight,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EchoError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an Upstream error
    pub fn upstream(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a StorageCorruption error
    pub fn storage_corruption(collection: &'static str, message: impl Into<String>) -> Self {
        Self::StorageCorruption {
            collection,
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a storage corruption error
    pub fn is_storage_corruption(&self) -> bool {
        matches!(self, Self::StorageCorruption { .. })
    }

    /// Whether the caller may resurface the composer with the same input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Upstream { .. } | Self::SendInFlight | Self::RateLimited { .. }
        )
    }

    // ============================================================================
    // Presentation
    // ============================================================================

    /// HTTP-style status class used by the chat endpoint surface.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Entitlement(_) => 403,
            Self::NotFound { .. } => 404,
            Self::SendInFlight => 409,
            Self::RateLimited { .. } => 429,
            Self::Configuration(_) => 503,
            _ => 500,
        }
    }

    /// A human-readable message that is safe to show to the user.
    ///
    /// Never exposes upstream bodies, file paths or parser output.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Configuration(_) => "AI service is temporarily unavailable".to_string(),
            Self::Upstream { .. } | Self::Internal(_) => {
                "I'm having trouble connecting right now. Please try again in a moment.".to_string()
            }
            Self::Network(_) => {
                "I'm having trouble connecting right now. Please try again.".to_string()
            }
            Self::RateLimited { .. } => {
                "You're sending messages a little too quickly. Please wait a moment.".to_string()
            }
            Self::Entitlement(_) => {
                "This companion is part of Pro. Start your free trial to unlock it.".to_string()
            }
            Self::SendInFlight => "Please wait for the current reply to arrive.".to_string(),
            Self::NotFound { entity_type, .. } => format!("That {} could not be found.", entity_type),
            Self::StorageCorruption { .. }
            | Self::Io { .. }
            | Self::Serialization { .. } => {
                "There was a problem saving your data. Please try again.".to_string()
            }
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for EchoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for EchoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EchoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(format!("Invalid TOML: {}", err))
    }
}

impl From<toml::ser::Error> for EchoError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for EchoError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, EchoError>`.
pub type Result<T> = std::result::Result<T, EchoError>;
