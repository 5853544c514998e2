//! Editable input state owned by the app.

mod input;

pub use input::{DraftInput, IntentForm};
