pub mod categories;
pub mod server;
pub mod topics;
pub mod users;
