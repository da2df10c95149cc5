#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod adapters;
pub mod analysis;
pub mod cli;
pub mod engine;
pub mod entities;
pub mod error;
pub mod transform;

mod render;
mod sources;

pub use engine::{Engine, EngineConfig};
pub use entities::chat::{ChatMessage, ChatReply, GroundingSource, Role};
pub use entities::profile::{EmergencyContact, Gender, Language, OrganFunction, UserProfile};
