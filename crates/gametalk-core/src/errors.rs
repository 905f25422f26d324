use gametalk_core_types::RequestId;
use thiserror::Error;

/// Result type alias using GtError
pub type Result<T> = std::result::Result<T, GtError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure that can leave a GameTalk crate is classified by one of
/// these kinds. Each kind maps to a stable code usable in tests and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GtErrorKind {
    // Input / domain
    InvalidInput,
    NotFound,
    AlreadyExists,
    InvalidCredentials,

    // Remote transport
    /// DNS failure or connection refused
    NetworkUnreachable,
    Timeout,
    /// HTTP 4xx
    HttpClientError,
    /// HTTP 5xx
    HttpServerError,
    /// Success status without the expected body
    BodyEmpty,

    // Local store
    Persistence,
    Serialization,
    Concurrency,

    // Setup
    Config,

    // Internal
    Internal,
}

impl GtErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            GtErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            GtErrorKind::NotFound => "ERR_NOT_FOUND",
            GtErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            GtErrorKind::InvalidCredentials => "ERR_INVALID_CREDENTIALS",
            GtErrorKind::NetworkUnreachable => "ERR_NETWORK_UNREACHABLE",
            GtErrorKind::Timeout => "ERR_TIMEOUT",
            GtErrorKind::HttpClientError => "ERR_HTTP_CLIENT",
            GtErrorKind::HttpServerError => "ERR_HTTP_SERVER",
            GtErrorKind::BodyEmpty => "ERR_BODY_EMPTY",
            GtErrorKind::Persistence => "ERR_PERSISTENCE",
            GtErrorKind::Serialization => "ERR_SERIALIZATION",
            GtErrorKind::Concurrency => "ERR_CONCURRENCY",
            GtErrorKind::Config => "ERR_CONFIG",
            GtErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the failure came from the remote side of the client
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            GtErrorKind::NetworkUnreachable
                | GtErrorKind::Timeout
                | GtErrorKind::HttpClientError
                | GtErrorKind::HttpServerError
                | GtErrorKind::BodyEmpty
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// context (operation, entity, request) for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct GtError {
    kind: GtErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl GtError {
    /// Create a new error with the specified kind
    pub fn new(kind: GtErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> GtErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Human-readable message, suitable for rendering verbatim
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for GtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for GtError {}

// ========== End Error Facility ==========

/// Domain failures of the forum client
///
/// The display strings are the user-facing texts the screens show verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForumError {
    #[error("El correo ya está registrado")]
    EmailAlreadyRegistered { email: String },

    #[error("Credenciales incorrectas")]
    InvalidCredentials,

    #[error("No se encontró el tema")]
    TopicNotFound { topic_id: i64 },

    #[error("No se encontró la categoría")]
    CategoryNotFound { category_id: i64 },

    #[error("No se encontró el usuario")]
    UserNotFound { user_id: i64 },

    #[error("El título no puede estar vacío")]
    BlankTitle,

    #[error("La descripción no puede estar vacía")]
    BlankDescription,

    #[error("URL del servidor inválida '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<ForumError> for GtError {
    fn from(err: ForumError) -> Self {
        let message = err.to_string();
        match err {
            ForumError::EmailAlreadyRegistered { email } => GtError::new(GtErrorKind::AlreadyExists)
                .with_op("register_user")
                .with_entity_id(email)
                .with_message(message),

            ForumError::InvalidCredentials => GtError::new(GtErrorKind::InvalidCredentials)
                .with_op("login")
                .with_message(message),

            ForumError::TopicNotFound { topic_id } => GtError::new(GtErrorKind::NotFound)
                .with_entity_id(topic_id)
                .with_message(message),

            ForumError::CategoryNotFound { category_id } => GtError::new(GtErrorKind::NotFound)
                .with_entity_id(category_id)
                .with_message(message),

            ForumError::UserNotFound { user_id } => GtError::new(GtErrorKind::NotFound)
                .with_entity_id(user_id)
                .with_message(message),

            ForumError::BlankTitle | ForumError::BlankDescription => {
                GtError::new(GtErrorKind::InvalidInput).with_message(message)
            }

            ForumError::InvalidServerUrl { .. } => GtError::new(GtErrorKind::Config)
                .with_op("set_base_url")
                .with_message(message),

            ForumError::Serialization { .. } => {
                GtError::new(GtErrorKind::Serialization).with_message(message)
            }

            ForumError::Internal { .. } => GtError::new(GtErrorKind::Internal).with_message(message),
        }
    }
}

impl From<serde_json::Error> for ForumError {
    fn from(err: serde_json::Error) -> Self {
        ForumError::Serialization {
            message: err.to_string(),
        }
    }
}
