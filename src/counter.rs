mod association;
mod bbox;
mod direction;
mod egg_counter;
mod export;
mod tracked_object;

pub use association::{Detection, MATCH_DISTANCE_GATE, centroid_distance, nearest_within};
pub use bbox::{BBox, Point};
pub use direction::Direction;
pub use egg_counter::{CounterConfig, EggCounter, FrameUpdate};
pub use export::{COUNT_PLACEHOLDER, CountMessage, DEFAULT_RESULT_FILE};
pub use tracked_object::{Annotation, TrackedObject};
