//! Domain models: the static drug reference table, the caller-owned profile, and chat turns.

pub mod chat;
pub mod drug;
pub mod profile;
pub mod summary;
