//! Text normalization and adapters from upstream API shapes into engine models.

pub mod query;
pub(crate) mod summary;
pub mod text;
