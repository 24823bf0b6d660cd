//! Integration module for connecting detection producers with the counter.
//!
//! This module provides the `DetectionSource` trait, a JSON Lines source for
//! recorded detector output, the confidence filter applied before counting,
//! and a pipeline that drives a source through an `EggCounter`.

mod annotations;
mod builder;
mod detector;
mod jsonl;
mod pipeline;

pub use annotations::AnnotationWriter;
pub use builder::DetectionBuilder;
pub use detector::{ConfidenceFilter, DetectionSource, IntoDetections};
pub use jsonl::JsonLinesSource;
pub use pipeline::{CountingPipeline, FrameOutcome, PipelineConfig, RunSummary};
