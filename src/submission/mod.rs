pub mod controller;

pub use controller::{SubmissionController, SubmissionPhase};
