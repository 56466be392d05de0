use std::io;

use crate::site::StubbingSite;
use crate::types::Type;

/// Errors that can occur while resolving stub values
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot stub {ty} at {site}")]
    Unresolvable { ty: Type, site: StubbingSite },

    #[error("Unsupported type {ty} for {operation}")]
    UnsupportedType { ty: Type, operation: &'static str },

    #[error("Invalid stubbing site: {0}")]
    InvalidSite(String),

    #[error("Failed to stub {ty} at {site}: {message}")]
    Produce {
        ty: Type,
        site: StubbingSite,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// No strategy accepted `ty` at `site`
    pub fn unresolvable(ty: &Type, site: &StubbingSite) -> Self {
        Error::Unresolvable {
            ty: ty.clone(),
            site: site.clone(),
        }
    }

    /// Create a production failure for the given type and site
    pub fn produce(ty: &Type, site: &StubbingSite, message: impl Into<String>) -> Self {
        Error::Produce {
            ty: ty.clone(),
            site: site.clone(),
            message: message.into(),
        }
    }

    /// The requested type, if the error carries one
    pub fn ty(&self) -> Option<&Type> {
        match self {
            Error::Unresolvable { ty, .. }
            | Error::UnsupportedType { ty, .. }
            | Error::Produce { ty, .. } => Some(ty),
            _ => None,
        }
    }

    /// The site at which resolution failed, if the error carries one
    pub fn site(&self) -> Option<&StubbingSite> {
        match self {
            Error::Unresolvable { site, .. } | Error::Produce { site, .. } => Some(site),
            _ => None,
        }
    }
}

/// Result type alias for stubbing operations
pub type Result<T> = std::result::Result<T, Error>;
