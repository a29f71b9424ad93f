pub mod errors;
pub mod manager;
pub mod memory;
pub mod store;

pub use errors::SessionError;
pub use manager::SessionManager;
pub use memory::InMemorySessionStore;
pub use store::Session;
pub use store::SessionId;
pub use store::SessionStore;
