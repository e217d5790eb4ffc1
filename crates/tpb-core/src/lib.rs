//! TPB Scraper Core Library
//!
//! Provides an async API for the search, recent and top listings of
//! The Pirate Bay (or any mirror with the same page layout).
//!
//! # Overview
//!
//! - Listing URLs are built from named path segments that can be changed
//!   between fetches (query, page, order, category)
//! - Listings are consumed as lazy streams of [`Torrent`]s; in multi-page mode
//!   following pages are fetched on demand until an empty page is returned
//! - Torrent descriptions and file lists are fetched on first access and
//!   cached
//!
//! # Example
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use tpb_core::{constants::categories, Result, SearchOptions, Tpb};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let tpb = Tpb::new("https://thepiratebay.org")?;
//!
//!     let mut search = tpb.search("breaking bad", SearchOptions {
//!         category: categories::video::TV_SHOWS,
//!         ..Default::default()
//!     });
//!     let torrents: Vec<_> = search.items().try_collect().await?;
//!
//!     for torrent in &torrents {
//!         println!("{} ({} seeders): {}", torrent.title, torrent.seeders, torrent.magnet_link);
//!     }
//!
//!     if let Some(torrent) = torrents.first() {
//!         for (name, size) in tpb.torrent_files(torrent).await? {
//!             println!("{name}: {size}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # End of results
//!
//! Multi-page iteration stops at the first page without rows. A site that
//! answers past-the-end page numbers with a repeat of its last page instead
//! of an empty table would never end the stream; bound such iterations with
//! `StreamExt::take`.

mod client;
pub mod constants;
mod error;
pub mod list;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, DEFAULT_BASE_URL, RateLimiter, TpbClient};

// Re-export error types
pub use error::{Result, TpbError};

// Re-export listings
pub use list::{Listing, Pagination, Recent, Search, Top};

// Re-export main scraper API
pub use scraper::{SearchOptions, Tpb};

// Re-export data types
pub use types::Torrent;

// Re-export URL helpers for convenience
pub use url::{UrlSegments, extract_torrent_id};
