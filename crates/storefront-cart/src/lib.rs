//! In-memory cart state: one store per shopping session, no persistence.

mod entry;
mod store;

pub use entry::CartEntry;
pub use store::CartStore;
