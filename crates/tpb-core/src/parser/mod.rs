//! HTML parsers for TPB pages
//!
//! Contains modules for parsing different page types.

pub mod created;
pub mod details;
pub mod listing;

pub use created::parse_created;
pub use details::{parse_file_list, parse_torrent_info};
pub use listing::{build_torrent, parse_listing, torrent_rows};
