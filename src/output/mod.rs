pub mod progress;
pub mod stats;

pub use progress::{CountingWriter, ProgressDisplay};
pub use stats::{format_bytes, Stats};
