pub mod config;
pub mod datasets;
pub mod io;
pub mod metrics;
pub mod pipeline;
pub mod preprocessors;

// Re-export public API
pub use sieve_core::*;
pub use sieve_models::*;

pub use config::{PriorKind, RunConfig};
pub use datasets::Dataset;
pub use metrics::ClassificationReport;
pub use pipeline::{run, RunSummary, SpamFilter};
pub use preprocessors::{Tokenizer, Vocabulary};
