use gametalk_core_types::Sensitive;

/// A registered forum user
///
/// The password only ever lives in the local store; remote read responses
/// never carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password: Sensitive<String>,
}

/// Registration input, before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: Sensitive<String>,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<Sensitive<String>>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}
