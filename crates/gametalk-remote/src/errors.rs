//! Remote failure taxonomy
//!
//! The display text of each variant is the message a screen shows
//! verbatim; `kind()` classifies it for logging.

use gametalk_core::errors::{GtError, GtErrorKind};
use reqwest::StatusCode;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("No se pudo conectar al servidor. Verifica la URL y tu conexión.")]
    Unresolvable { cause: String },

    #[error("Tiempo de espera agotado. El servidor no responde.")]
    Timeout { cause: String },

    #[error("Error de conexión. Verifica que el servidor esté ejecutándose.")]
    Connect { cause: String },

    #[error("Error de red: {cause}")]
    Network { cause: String },

    #[error("Error de red: {cause}")]
    Decode { cause: String },

    #[error("Respuesta vacía del servidor")]
    BodyEmpty,

    #[error("{message}")]
    Status { status: u16, message: String },
}

impl RemoteError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: StatusCode) -> Self {
        let message = match status.as_u16() {
            400 => "Solicitud incorrecta".to_string(),
            401 => "No autorizado".to_string(),
            403 => "Acceso prohibido".to_string(),
            404 => "No encontrado".to_string(),
            500 => "Error interno del servidor".to_string(),
            503 => "Servicio no disponible".to_string(),
            code => format!(
                "Error: {} - {}",
                code,
                status.canonical_reason().unwrap_or_default()
            ),
        };
        RemoteError::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// Classify a reqwest failure that happened before a status was read
    /// or while the body was streaming
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let cause = error_chain(err);
        if err.is_timeout() {
            RemoteError::Timeout { cause }
        } else if is_dns_failure(&cause) {
            RemoteError::Unresolvable { cause }
        } else if err.is_connect() {
            RemoteError::Connect { cause }
        } else if err.is_decode() {
            RemoteError::Decode { cause }
        } else {
            RemoteError::Network { cause }
        }
    }

    pub fn kind(&self) -> GtErrorKind {
        match self {
            RemoteError::Unresolvable { .. }
            | RemoteError::Connect { .. }
            | RemoteError::Network { .. } => GtErrorKind::NetworkUnreachable,
            RemoteError::Timeout { .. } => GtErrorKind::Timeout,
            RemoteError::Decode { .. } => GtErrorKind::Serialization,
            RemoteError::BodyEmpty => GtErrorKind::BodyEmpty,
            RemoteError::Status { status, .. } if *status >= 500 => GtErrorKind::HttpServerError,
            RemoteError::Status { .. } => GtErrorKind::HttpClientError,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<RemoteError> for GtError {
    fn from(err: RemoteError) -> Self {
        let kind = err.kind();
        let message = match &err {
            RemoteError::Unresolvable { cause }
            | RemoteError::Timeout { cause }
            | RemoteError::Connect { cause } => format!("{} ({})", err, cause),
            _ => err.to_string(),
        };
        GtError::new(kind).with_message(message)
    }
}

/// The error and all of its sources joined, since reqwest keeps the useful
/// detail (e.g. the resolver failure) several levels down
fn error_chain(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}

fn is_dns_failure(chain: &str) -> bool {
    let chain = chain.to_ascii_lowercase();
    chain.contains("dns error")
        || chain.contains("failed to lookup address")
        || chain.contains("name or service not known")
        || chain.contains("no such host")
}
