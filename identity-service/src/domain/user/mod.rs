pub mod errors;
pub mod events;
pub mod models;
pub mod ports;
pub mod service;

pub use errors::AuthError;
pub use models::PublicUser;
pub use models::User;
pub use ports::AuthServicePort;
pub use ports::UserDirectory;
pub use service::AuthService;
