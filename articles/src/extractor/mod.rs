//! HTML extraction for kadrovik.uz pages.
//!
//! Both entry points are pure functions of the page text (plus the clock, for listing items
//! that carry no publish date), so they are tested against fixture files without a server.

mod detail;
mod listing;
mod text;

pub use detail::{extract_detail, CONTENT_NOT_FOUND};
pub use listing::{extract_listing, UNTITLED};

/// Composed article text at or below this many characters counts as a failed extraction.
pub const MIN_CONTENT_CHARS: usize = 50;
