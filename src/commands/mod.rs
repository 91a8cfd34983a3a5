pub mod connection;
pub mod file_management;
pub mod session;

pub use connection::Connection;
pub use file_management::{FileManagement, SavedFile};
pub use session::Session;
