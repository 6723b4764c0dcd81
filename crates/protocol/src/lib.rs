pub mod commands;
pub mod selector;
pub mod tone;
pub mod types;

pub use commands::VisualCommand;
pub use selector::Selector;
pub use tone::Tone;
pub use types::{Ease, PointerEvents, Transition};
