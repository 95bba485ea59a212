/// Application state: persistent client identity and transient view state.

pub mod identity;
pub mod view;

pub use identity::{ensure_client_id, IdentityStore, SqliteIdentityStore};
pub use view::{RequestToken, ViewState};
