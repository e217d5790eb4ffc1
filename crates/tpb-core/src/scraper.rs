//! Main scraper API
//!
//! [`Tpb`] holds a configured client and hands out listings bound to it.
//! Building a listing never touches the network; pages are fetched when the
//! listing's `items()` stream is polled.

use std::collections::BTreeMap;

use crate::client::{ClientConfig, TpbClient};
use crate::constants::{categories, orders};
use crate::error::Result;
use crate::list::{Recent, Search, Top};
use crate::types::Torrent;

/// Search parameters besides the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub page: i64,
    /// See [`orders`](crate::constants::orders)
    pub order: u32,
    /// See [`categories`](crate::constants::categories)
    pub category: u32,
    /// Chain following pages while iterating
    pub multipage: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page: 0,
            order: orders::DEFAULT,
            category: categories::ALL,
            multipage: false,
        }
    }
}

/// Entry point: search, recent and top listings of one site
pub struct Tpb {
    client: TpbClient,
}

impl Tpb {
    /// Create a scraper for the site at `base_url` with default settings
    ///
    /// # Errors
    /// Returns `InvalidUrl` if `base_url` is not an absolute http(s) URL
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::with_base_url(base_url))
    }

    /// Create a scraper with custom client configuration
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = TpbClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: TpbClient) -> Self {
        Self { client }
    }

    /// Client shared by every listing created from this scraper
    pub fn client(&self) -> &TpbClient {
        &self.client
    }

    /// Search for `query`
    ///
    /// # Example
    /// ```
    /// # fn example() -> tpb_core::Result<()> {
    /// use tpb_core::{SearchOptions, Tpb};
    /// let tpb = Tpb::new("https://thepiratebay.org")?;
    /// let search = tpb.search("breaking bad", SearchOptions { page: 1, ..Default::default() });
    /// assert_eq!(search.url(), "https://thepiratebay.org/search/breaking%20bad/1/7/0");
    /// # Ok(())
    /// # }
    /// ```
    pub fn search(&self, query: &str, options: SearchOptions) -> Search {
        let mut search = Search::with_options(
            self.client.clone(),
            query,
            options.page,
            options.order,
            options.category,
        );
        if options.multipage {
            search.multipage();
        }
        search
    }

    /// Most recent uploads starting at `page`
    pub fn recent(&self, page: i64) -> Recent {
        Recent::new(self.client.clone(), page)
    }

    /// Top torrents in `category` (0 for all)
    pub fn top(&self, category: u32) -> Top {
        Top::new(self.client.clone(), category)
    }

    /// Description text of `torrent`, fetched once and cached on it
    pub async fn torrent_info<'a>(&self, torrent: &'a Torrent) -> Result<&'a str> {
        torrent.info(&self.client).await
    }

    /// File list of `torrent`, fetched once and cached on it
    pub async fn torrent_files<'a>(
        &self,
        torrent: &'a Torrent,
    ) -> Result<&'a BTreeMap<String, String>> {
        torrent.files(&self.client).await
    }
}
