pub mod composer;

pub use composer::{InputComposer, IntakeError, SelectedFile};
