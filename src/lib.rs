//! `std::io::Read` / `std::io::Write` wrappers and a copy helper that keep
//! throughput under a given bandwidth (bytes per second).
//!
//! Every wrapper owns a [`Limiter`] that buckets transferred bytes and puts
//! the calling thread to sleep whenever the bucket grew faster than the
//! configured rate. Windows that stay open abnormally long (a stalled
//! source, an idle peer) are reset so the stall is not paid back as a burst.
//! A bandwidth of zero or less disables limiting.
//!
//! ```no_run
//! use std::io;
//!
//! # fn main() -> io::Result<()> {
//! let src = std::fs::File::open("large.bin")?;
//! let mut dst = io::sink();
//! let copied = bwio::copy(&mut dst, src, 500 * 1024)?;
//! println!("{} bytes", copied);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod copy;
pub mod error;
pub mod limiter;
pub mod options;
pub mod output;
pub mod reader;
pub mod writer;

pub use config::Config;
pub use copy::{copy, copy_buffer, DEFAULT_BUFFER_SIZE};
pub use error::{BwioError, Result};
pub use limiter::Limiter;
pub use options::{parse_bandwidth, LimitSide, Options};
pub use reader::ThrottledReader;
pub use writer::ThrottledWriter;
