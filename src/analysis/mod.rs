//! Interaction and risk analysis over reference-table drugs and fetched text.

pub mod interactions;
pub mod rules;
