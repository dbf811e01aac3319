//! Storage access for users: the `UserStore` seam and its PostgreSQL and in-memory implementations.

mod memory;
mod users;
pub use memory::MemoryUserStore;
pub use users::{PgUserStore, UserStore};
