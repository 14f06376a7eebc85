//! Synthetic engagement pipeline.
//!
//! Generates a seeded table of social posts, cleans their text, imputes
//! missing impression counts from category medians, derives engagement and
//! lexicon-sentiment features, and aggregates per category.

pub mod aggregate;
pub mod clean;
pub mod error;
pub mod features;
pub mod generator;
pub mod impute;
pub mod pipeline;
pub mod scorer;
pub mod stats;

pub use aggregate::{summarize_by_category, top_posts_per_category};
pub use clean::{clean_posts, clean_text, drop_empty_text, FilterOutcome};
pub use error::PipelineError;
pub use features::{derive_features, enrich_post};
pub use generator::{generate, generate_posts, inject_missing, GeneratorParams};
pub use impute::{impute_impressions, ImpressionMedians};
pub use pipeline::{run_pipeline, PipelineOutput};
pub use scorer::lexicon_score;
