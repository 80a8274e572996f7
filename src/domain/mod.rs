pub mod batch;
pub mod types;
pub mod view;

pub use types::{BatchRequest, CategoryTone, ClassificationResult};
pub use view::ViewRecord;
