//! Seams between the session manager and its environment.

mod store;
mod transport;

pub use store::TokenStore;
pub use transport::Transport;
