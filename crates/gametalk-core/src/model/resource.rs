/// Result envelope of every asynchronous client or repository operation
///
/// An operation yields `Loading` first and then exactly one terminal value,
/// except the hybrid topic stream which may yield an extra cached `Success`
/// before its terminal value. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Resource<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Resource::Error(message.into())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Resource::Error(_))
    }

    /// `Success` and `Error` end a call; `Loading` never does
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Resource::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Resource<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Resource::Loading => Resource::Loading,
            Resource::Success(data) => Resource::Success(f(data)),
            Resource::Error(message) => Resource::Error(message),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Resource<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(err) => Resource::Error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_is_not_terminal() {
        let r: Resource<()> = Resource::Loading;
        assert!(!r.is_terminal());
        assert!(Resource::Success(1).is_terminal());
        assert!(Resource::<i32>::error("x").is_terminal());
    }

    #[test]
    fn test_map_preserves_variant() {
        let ok = Resource::Success(vec![1, 2, 3]).map(|v| v.len());
        assert_eq!(ok, Resource::Success(3));

        let err: Resource<usize> = Resource::<Vec<i32>>::error("No encontrado").map(|v| v.len());
        assert_eq!(err.error_message(), Some("No encontrado"));

        let loading: Resource<usize> = Resource::<Vec<i32>>::Loading.map(|v| v.len());
        assert!(loading.is_loading());
    }

    #[test]
    fn test_from_result_uses_display_text() {
        let r: Resource<i32> = Err::<i32, _>("Credenciales incorrectas").into();
        assert_eq!(r, Resource::Error("Credenciales incorrectas".to_string()));
    }
}
