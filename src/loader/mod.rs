mod options;
mod pipeline;

pub use options::{BatchFailure, BatchFailurePolicy, LoadOptions, LoadProgress, LoadReport};
pub use pipeline::{batch_count, load};
