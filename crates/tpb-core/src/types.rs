//! Core data types for the TPB scraper

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};
use reqwest::Url;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::client::TpbClient;
use crate::error::{Result, TpbError};
use crate::parser::{parse_created, parse_file_list, parse_torrent_info};
use crate::url::extract_torrent_id;

/// A single torrent scraped from a listing row
///
/// The detail page description and the file list are not part of the
/// listing; they are fetched on first access through [`Torrent::info`] and
/// [`Torrent::files`] and cached for the lifetime of the value.
///
/// Fields are public for reading. They are filled once from the listing row,
/// nothing in this crate writes them afterwards, and editing `url` does not
/// reset the cached `info` or `files`.
#[derive(Debug, Clone, Serialize)]
pub struct Torrent {
    /// Torrent title
    pub title: String,

    /// Absolute URL of the detail page, also used as identifier
    pub url: String,

    /// Main category (e.g. "Video")
    pub category: String,

    /// Sub category (e.g. "TV shows")
    pub sub_category: String,

    /// Magnet URI
    pub magnet_link: String,

    /// Direct `.torrent` file link, when the listing provides one
    pub torrent_link: Option<String>,

    /// Upload time as shown by the site (e.g. "Today 14:31", "5 mins ago")
    pub created_raw: String,

    /// Human readable size (e.g. "1.7 GiB")
    pub size: String,

    /// Uploader username
    pub user: String,

    pub seeders: u32,

    pub leechers: u32,

    /// When the row was scraped; relative upload times are anchored to it
    pub scraped_at: DateTime<Local>,

    #[serde(skip)]
    pub(crate) info: OnceCell<String>,

    #[serde(skip)]
    pub(crate) files: OnceCell<BTreeMap<String, String>>,
}

impl Torrent {
    /// A torrent known only by its detail page URL
    ///
    /// Listing fields are left empty; useful to call [`info`](Self::info) or
    /// [`files`](Self::files) on a bookmarked detail page.
    pub fn from_url(url: &str) -> Self {
        Self {
            title: String::new(),
            url: url.to_string(),
            category: String::new(),
            sub_category: String::new(),
            magnet_link: String::new(),
            torrent_link: None,
            created_raw: String::new(),
            size: String::new(),
            user: String::new(),
            seeders: 0,
            leechers: 0,
            scraped_at: Local::now(),
            info: OnceCell::new(),
            files: OnceCell::new(),
        }
    }

    /// Numeric id taken from the detail URL (`/torrent/{id}/...`)
    pub fn id(&self) -> Option<u64> {
        extract_torrent_id(&self.url)
    }

    /// Absolute upload time
    ///
    /// Relative times ("3 mins ago") are resolved against
    /// [`scraped_at`](Self::scraped_at). Unparsable values resolve to
    /// `scraped_at` itself.
    pub fn created(&self) -> DateTime<Local> {
        parse_created(&self.created_raw, self.scraped_at)
    }

    /// Description text from the detail page
    ///
    /// Fetched on first call, cached afterwards.
    pub async fn info(&self, client: &TpbClient) -> Result<&str> {
        let info = self
            .info
            .get_or_try_init(|| async {
                tracing::debug!(url = %self.url, "fetching torrent info");
                let html = client.fetch(&self.url).await?;
                parse_torrent_info(&html)
            })
            .await?;
        Ok(info.as_str())
    }

    /// File name → human readable size
    ///
    /// Fetched on first call, cached afterwards.
    ///
    /// # Errors
    /// - `InvalidUrl` if [`url`](Self::url) is not absolute or carries no torrent id
    /// - `HttpError` / `NotFound` if the file list request fails
    pub async fn files(&self, client: &TpbClient) -> Result<&BTreeMap<String, String>> {
        self.files
            .get_or_try_init(|| async {
                let id = self
                    .id()
                    .ok_or_else(|| TpbError::InvalidUrl(self.url.clone()))?;
                // the file list lives on the same host as the detail page
                let path = format!("/ajax_details_filelist.php?id={}", id);
                let url = Url::parse(&self.url)
                    .and_then(|detail| detail.join(&path))
                    .map_err(|e| TpbError::InvalidUrl(format!("{}: {}", self.url, e)))?;

                tracing::debug!(%url, id, "fetching torrent file list");
                let html = client.fetch(url.as_str()).await?;
                parse_file_list(&html)
            })
            .await
    }
}

impl PartialEq for Torrent {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Torrent {}

impl fmt::Display for Torrent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "URL: {}", self.url)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Sub-Category: {}", self.sub_category)?;
        writeln!(f, "Magnet Link: {}", self.magnet_link)?;
        writeln!(
            f,
            "Torrent Link: {}",
            self.torrent_link.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "Uploaded: {}", self.created().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Size: {}", self.size)?;
        writeln!(f, "User: {}", self.user)?;
        writeln!(f, "Seeders: {}", self.seeders)?;
        write!(f, "Leechers: {}", self.leechers)
    }
}

#[cfg(test)]
pub(crate) fn sample_torrent() -> Torrent {
    Torrent {
        title: "Breaking Bad S05E16".to_string(),
        url: "https://thepiratebay.org/torrent/8519467/Breaking_Bad_S05E16".to_string(),
        category: "Video".to_string(),
        sub_category: "TV shows".to_string(),
        magnet_link: "magnet:?xt=urn:btih:0123456789abcdef".to_string(),
        torrent_link: None,
        created_raw: "1 hour ago".to_string(),
        size: "1.2 GiB".to_string(),
        user: "eztv".to_string(),
        seeders: 1024,
        leechers: 64,
        scraped_at: Local::now(),
        info: OnceCell::new(),
        files: OnceCell::new(),
    }
}
