//! Counts objects crossing a fixed vertical line in a stream of per-frame
//! bounding-box detections, crediting each tracked object at most once.

pub mod config;
pub mod counter;
pub mod error;
pub mod integration;

pub use config::{AppConfig, OutputConfig};
pub use counter::{
    Annotation, BBox, CountMessage, CounterConfig, Detection, Direction, EggCounter, FrameUpdate,
    Point, TrackedObject,
};
pub use error::{ConfigError, CounterError, SourceError};
pub use integration::{
    AnnotationWriter, ConfidenceFilter, CountingPipeline, DetectionBuilder, DetectionSource,
    FrameOutcome, IntoDetections, JsonLinesSource, PipelineConfig, RunSummary,
};
