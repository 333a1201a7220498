pub mod sample;
pub mod link_stats;

pub use sample::{Orientation, RawAccel, Sample};
pub use link_stats::LinkStats;
