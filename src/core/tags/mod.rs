//! core/tags/mod.rs
//!
//! ID3 tag read utilities.
//! Public API:
//! - [`read_track`] reads an MP3 into a [`Track`](super::types::Track) (non-fatal on tag read failure).

mod read;
mod util;

pub use read::read_track;
