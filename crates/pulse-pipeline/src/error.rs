use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid {distribution} parameters: {reason}")]
    Distribution {
        distribution: &'static str,
        reason: String,
    },

    #[error("cannot blank {requested} {field} values in a table of {rows} rows")]
    MissingCountTooLarge {
        field: &'static str,
        requested: usize,
        rows: usize,
    },

    #[error("post {post_id} has no impressions and no observed impressions exist to impute from")]
    NoObservedImpressions { post_id: String },
}
