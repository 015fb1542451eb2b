//! External service integrations and delivery.

pub mod life360;
pub mod session;
pub mod transmitter;

pub use life360::Life360Client;
pub use session::{AccessToken, SessionManager};
pub use transmitter::Transmitter;
