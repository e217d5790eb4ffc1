//! Listing pages: search, recent and top
//!
//! All three share [`Listing`], which owns the page URL and knows how to
//! fetch and parse one page. [`Search`] and [`Recent`] are paginated and can
//! switch to multi-page mode, in which [`items`](Listing::items) keeps
//! fetching successive pages until the site returns an empty one.
//!
//! # Example
//!
//! ```no_run
//! use futures::{StreamExt, TryStreamExt};
//! use tpb_core::{SearchOptions, Tpb};
//!
//! # async fn example() -> tpb_core::Result<()> {
//! let tpb = Tpb::new("https://thepiratebay.org")?;
//! let mut search = tpb.search("breaking bad", SearchOptions::default());
//! search.multipage();
//!
//! // With 30 torrents per page this stops on page 3
//! let first_hundred: Vec<_> = search.items().take(100).try_collect().await?;
//! println!("{} torrents, last page {}", first_hundred.len(), search.page());
//! # Ok(())
//! # }
//! ```

use std::vec;

use chrono::Local;
use futures::stream::{self, Stream};

use crate::client::TpbClient;
use crate::constants::{categories, orders};
use crate::error::Result;
use crate::parser::parse_listing;
use crate::types::Torrent;
use crate::url::UrlSegments;

const QUERY: &str = "query";
const PAGE: &str = "page";
const ORDER: &str = "order";
const CATEGORY: &str = "category";

/// How [`Listing::items`] walks pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// The listing has no page segment
    Unpaginated,
    /// Only the current page is fetched
    SinglePage,
    /// Pages are fetched one after another until an empty one
    MultiPage,
}

/// Fetch-and-parse core shared by every listing kind
#[derive(Debug, Clone)]
pub struct Listing {
    client: TpbClient,
    url: UrlSegments,
    pagination: Pagination,
}

/// Iteration state of [`Listing::items`]
struct Cursor<'a> {
    listing: &'a mut Listing,
    buffered: vec::IntoIter<Torrent>,
    fetched: bool,
    exhausted: bool,
}

impl Listing {
    fn new(client: TpbClient, url: UrlSegments, pagination: Pagination) -> Self {
        Self {
            client,
            url,
            pagination,
        }
    }

    /// URL of the current page
    pub fn url(&self) -> String {
        self.url.build()
    }

    /// Segment model backing [`url`](Self::url)
    pub fn segments(&self) -> &UrlSegments {
        &self.url
    }

    /// Client every page request goes through
    pub fn client(&self) -> &TpbClient {
        &self.client
    }

    /// Current pagination mode
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    fn text_segment(&self, name: &str) -> &str {
        self.url.get(name).unwrap_or_default()
    }

    fn int_segment<T: std::str::FromStr + Default>(&self, name: &str) -> T {
        self.text_segment(name).parse().unwrap_or_default()
    }

    fn set_segment(&mut self, name: &str, value: impl ToString) {
        if let Some(slot) = self.url.slot_mut(name) {
            *slot = value.to_string();
        }
    }

    fn page(&self) -> i64 {
        self.int_segment(PAGE)
    }

    fn set_page(&mut self, page: i64) {
        self.set_segment(PAGE, page);
    }

    /// Fetches and parses the current page
    ///
    /// # Errors
    /// - `HttpError` / `NotFound` / `RateLimited` if the request fails
    /// - `ParseError` if a row does not match the listing layout
    pub async fn fetch_page(&self) -> Result<Vec<Torrent>> {
        let url = self.url.build();
        tracing::debug!(%url, "fetching listing page");

        let html = self.client.fetch(&url).await?;
        let torrents = parse_listing(&html, self.client.base_url(), Local::now())?;

        tracing::debug!(%url, count = torrents.len(), "parsed listing page");
        Ok(torrents)
    }

    /// Lazily yields the torrents of this listing
    ///
    /// Nothing is fetched until the stream is polled. Every call starts over
    /// from the current page. In multi-page mode the page segment is advanced
    /// only once a page has been fully consumed, and the stream ends at the
    /// first empty page. An error ends the stream after being yielded.
    pub fn items(&mut self) -> impl Stream<Item = Result<Torrent>> + '_ {
        let cursor = Cursor {
            listing: self,
            buffered: Vec::new().into_iter(),
            fetched: false,
            exhausted: false,
        };

        stream::try_unfold(cursor, |cursor| cursor.advance())
    }
}

impl Cursor<'_> {
    /// Yields the next buffered torrent, fetching a page when the buffer is empty
    async fn advance(mut self) -> Result<Option<(Torrent, Self)>> {
        loop {
            if let Some(torrent) = self.buffered.next() {
                return Ok(Some((torrent, self)));
            }
            if self.exhausted {
                return Ok(None);
            }

            if self.fetched {
                if self.listing.pagination != Pagination::MultiPage {
                    return Ok(None);
                }
                let next = self.listing.page() + 1;
                self.listing.set_page(next);
            }

            let page = self.listing.fetch_page().await?;
            self.fetched = true;
            if page.is_empty() {
                tracing::debug!(url = %self.listing.url(), "empty page, end of listing");
                self.exhausted = true;
            } else {
                self.buffered = page.into_iter();
            }
        }
    }
}

/// Generates the page accessors shared by the paginated listings
macro_rules! paginated {
    ($ty:ty) => {
        #[allow(clippy::should_implement_trait)]
        impl $ty {
            /// Current page number
            pub fn page(&self) -> i64 {
                self.listing.page()
            }

            /// Jump to `page`
            pub fn set_page(&mut self, page: i64) -> &mut Self {
                self.listing.set_page(page);
                self
            }

            /// Jump to the next page
            pub fn next(&mut self) -> &mut Self {
                let page = self.page();
                self.set_page(page + 1)
            }

            /// Jump to the previous page
            ///
            /// There is no lower bound, page `-1` is the server's problem.
            pub fn previous(&mut self) -> &mut Self {
                let page = self.page();
                self.set_page(page - 1)
            }

            /// Keep fetching following pages while iterating
            pub fn multipage(&mut self) -> &mut Self {
                self.listing.pagination = Pagination::MultiPage;
                self
            }

            /// Whether [`multipage`](Self::multipage) is on
            pub fn is_multipage(&self) -> bool {
                self.listing.pagination == Pagination::MultiPage
            }

            /// Lazily yields the torrents of this listing, see [`Listing::items`]
            pub fn items(&mut self) -> impl Stream<Item = Result<Torrent>> + '_ {
                self.listing.items()
            }

            /// URL of the current page
            pub fn url(&self) -> String {
                self.listing.url()
            }

            /// Shared fetch-and-parse core
            pub fn listing(&self) -> &Listing {
                &self.listing
            }
        }
    };
}

/// Paginated search with query, order and category
///
/// URL shape: `/search/{query}/{page}/{order}/{category}`
#[derive(Debug, Clone)]
pub struct Search {
    listing: Listing,
}

impl Search {
    /// Search `query` on page 0, sorted by seeders, in all categories
    pub fn new(client: TpbClient, query: &str) -> Self {
        Self::with_options(client, query, 0, orders::DEFAULT, categories::ALL)
    }

    pub fn with_options(
        client: TpbClient,
        query: &str,
        page: i64,
        order: u32,
        category: u32,
    ) -> Self {
        let url = UrlSegments::fixed(
            client.base_url().as_str(),
            "/search",
            [
                (QUERY, query.to_string()),
                (PAGE, page.to_string()),
                (ORDER, order.to_string()),
                (CATEGORY, category.to_string()),
            ],
        );
        Self {
            listing: Listing::new(client, url, Pagination::SinglePage),
        }
    }

    pub fn query(&self) -> &str {
        self.listing.text_segment(QUERY)
    }

    pub fn set_query(&mut self, query: &str) -> &mut Self {
        self.listing.set_segment(QUERY, query);
        self
    }

    /// Sort order code, see [`orders`](crate::constants::orders)
    pub fn order(&self) -> u32 {
        self.listing.int_segment(ORDER)
    }

    pub fn set_order(&mut self, order: u32) -> &mut Self {
        self.listing.set_segment(ORDER, order);
        self
    }

    /// Category code, see [`categories`](crate::constants::categories)
    pub fn category(&self) -> u32 {
        self.listing.int_segment(CATEGORY)
    }

    pub fn set_category(&mut self, category: u32) -> &mut Self {
        self.listing.set_segment(CATEGORY, category);
        self
    }
}

paginated!(Search);

/// Paginated most recent uploads
///
/// URL shape: `/recent/{page}`
#[derive(Debug, Clone)]
pub struct Recent {
    listing: Listing,
}

impl Recent {
    pub fn new(client: TpbClient, page: i64) -> Self {
        let url = UrlSegments::fixed(
            client.base_url().as_str(),
            "/recent",
            [(PAGE, page.to_string())],
        );
        Self {
            listing: Listing::new(client, url, Pagination::SinglePage),
        }
    }
}

paginated!(Recent);

/// Top torrents, optionally filtered by category
///
/// URL shape: `/top/{category}`. Not paginated.
#[derive(Debug, Clone)]
pub struct Top {
    listing: Listing,
}

impl Top {
    pub fn new(client: TpbClient, category: u32) -> Self {
        let url = UrlSegments::fixed(
            client.base_url().as_str(),
            "/top",
            [(CATEGORY, category.to_string())],
        );
        Self {
            listing: Listing::new(client, url, Pagination::Unpaginated),
        }
    }

    /// Category code, see [`categories`](crate::constants::categories)
    pub fn category(&self) -> u32 {
        self.listing.int_segment(CATEGORY)
    }

    pub fn set_category(&mut self, category: u32) -> &mut Self {
        self.listing.set_segment(CATEGORY, category);
        self
    }

    /// Lazily yields the torrents of this listing, see [`Listing::items`]
    pub fn items(&mut self) -> impl Stream<Item = Result<Torrent>> + '_ {
        self.listing.items()
    }

    /// URL of the current page
    pub fn url(&self) -> String {
        self.listing.url()
    }

    /// Shared fetch-and-parse core
    pub fn listing(&self) -> &Listing {
        &self.listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;

    const BASE: &str = "http://127.0.0.1:8000";

    fn client() -> TpbClient {
        TpbClient::with_config(ClientConfig::with_base_url(BASE)).unwrap()
    }

    #[test]
    fn test_search_defaults() {
        let search = Search::new(client(), "breaking bad");
        assert_eq!(search.query(), "breaking bad");
        assert_eq!(search.page(), 0);
        assert_eq!(search.order(), 7);
        assert_eq!(search.category(), 0);
        assert!(!search.is_multipage());
        assert_eq!(search.url(), format!("{}/search/breaking%20bad/0/7/0", BASE));
    }

    #[test]
    fn test_search_setters_chain() {
        let mut search = Search::new(client(), "breaking bad");
        search.set_query("x").set_page(1).set_order(9).set_category(100);
        assert_eq!(search.query(), "x");
        assert_eq!(search.page(), 1);
        assert_eq!(search.order(), 9);
        assert_eq!(search.category(), 100);
        assert!(search.url().ends_with("/search/x/1/9/100"));
    }

    #[test]
    fn test_search_with_options() {
        let search = Search::with_options(
            client(),
            "ubuntu",
            2,
            orders::size::ASC,
            categories::applications::UNIX,
        );
        assert_eq!(search.url(), format!("{}/search/ubuntu/2/6/303", BASE));
    }

    #[test]
    fn test_recent_next_previous_round_trip() {
        let mut recent = Recent::new(client(), 0);
        recent.set_page(1);
        let original = recent.url();
        recent.next().previous();
        assert_eq!(recent.url(), original);
        assert_eq!(recent.page(), 1);
    }

    #[test]
    fn test_previous_has_no_lower_bound() {
        let mut recent = Recent::new(client(), 0);
        recent.previous();
        assert_eq!(recent.page(), -1);
        assert!(recent.url().ends_with("/recent/-1"));
    }

    #[test]
    fn test_top_category() {
        let mut top = Top::new(client(), categories::ALL);
        assert_eq!(top.url(), format!("{}/top/0", BASE));
        top.set_category(100);
        assert_eq!(top.category(), 100);
        assert_eq!(top.url(), format!("{}/top/100", BASE));
    }

    #[test]
    fn test_top_is_unpaginated() {
        let top = Top::new(client(), 0);
        assert_eq!(top.listing().pagination(), Pagination::Unpaginated);
        assert_eq!(top.listing().segments().names().collect::<Vec<_>>(), ["category"]);
    }

    #[test]
    fn test_multipage_switch() {
        let mut recent = Recent::new(client(), 0);
        recent.multipage();
        assert!(recent.is_multipage());
        assert_eq!(recent.listing().pagination(), Pagination::MultiPage);
    }

    #[test]
    fn test_lists_do_not_share_segments() {
        let mut a = Recent::new(client(), 0);
        let b = a.clone();
        a.set_page(5);
        assert_eq!(b.page(), 0);
    }
}
