pub mod diff;
pub mod input;
pub mod layout;
pub mod result;
pub mod state;
pub mod stats;

pub use state::{Completion, Phase, Session};
