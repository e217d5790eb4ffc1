//! Listing page parser
//!
//! Search, recent and top pages share one table layout:
//!
//! | column | content                                                    |
//! |--------|------------------------------------------------------------|
//! | 0      | category link, sub-category link                           |
//! | 1      | title link, magnet link, optional `.torrent` link, meta text |
//! | 2      | seeders                                                    |
//! | 3      | leechers                                                   |

use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tokio::sync::OnceCell;

use crate::error::{Result, TpbError};
use crate::types::Torrent;

static META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Uploaded (.*), Size (.*), ULed by (.*)").expect("meta pattern is valid")
});

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| TpbError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}

/// Replaces non-breaking spaces with ordinary ones
pub(crate) fn normalize_spaces(text: &str) -> String {
    text.replace('\u{a0}', " ")
}

/// Parses a listing page into torrents
///
/// # Arguments
/// * `html` - Raw HTML of a search, recent or top page
/// * `base_url` - Site root used to resolve relative links
/// * `scraped_at` - Anchor for relative upload times
///
/// # Returns
/// Torrents in page order, empty if the page has no listing table
///
/// # Errors
/// Returns `ParseError` on the first row that does not match the layout
pub fn parse_listing(
    html: &str,
    base_url: &Url,
    scraped_at: DateTime<Local>,
) -> Result<Vec<Torrent>> {
    let document = Html::parse_document(html);
    torrent_rows(&document)?
        .iter()
        .map(|row| build_torrent(row, base_url, scraped_at))
        .collect()
}

/// Returns the data rows of the listing table
///
/// Skips the header row and the trailing pagination row. A document
/// without a table yields no rows.
pub fn torrent_rows(document: &Html) -> Result<Vec<ElementRef<'_>>> {
    let table = match document.select(&selector("table#searchResult")?).next() {
        Some(table) => Some(table),
        None => document.select(&selector("table")?).next(),
    };
    let Some(table) = table else {
        return Ok(Vec::new());
    };

    let row_selector = selector("tr")?;
    Ok(table
        .select(&row_selector)
        .skip(1)
        .filter(|row| !is_pagination_row(row))
        .collect())
}

/// Pagination controls sit in a single cell spanning the whole table
fn is_pagination_row(row: &ElementRef) -> bool {
    let cells = cells(row);
    cells.len() == 1 && cells[0].value().attr("colspan").is_some()
}

fn cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect()
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Builds a torrent out of a single listing row
///
/// # Errors
/// Returns `ParseError` if the row has too few columns, misses the title or
/// magnet link, has no meta text matching `Uploaded …, Size …, ULed by …`,
/// or has non-numeric seeder/leecher counts. A missing `.torrent` link is not
/// an error.
pub fn build_torrent(
    row: &ElementRef,
    base_url: &Url,
    scraped_at: DateTime<Local>,
) -> Result<Torrent> {
    let cols = cells(row);
    if cols.len() < 4 {
        return Err(TpbError::ParseError(format!(
            "expected 4 columns in torrent row, found {}",
            cols.len()
        )));
    }

    let link_selector = selector("a")?;

    let categories: Vec<String> = cols[0].select(&link_selector).map(|a| text_of(&a)).collect();
    let [category, sub_category] = match <[String; 2]>::try_from(categories) {
        Ok(pair) => pair,
        Err(found) => {
            return Err(TpbError::ParseError(format!(
                "expected category and sub-category links, found {}",
                found.len()
            )));
        }
    };

    let links: Vec<ElementRef> = cols[1].select(&link_selector).collect();
    let title_link = links
        .first()
        .ok_or_else(|| TpbError::ParseError("missing title link".to_string()))?;
    let title = text_of(title_link);
    let href = title_link
        .value()
        .attr("href")
        .ok_or_else(|| TpbError::ParseError("title link has no href".to_string()))?;
    let url = base_url
        .join(href)
        .map_err(|e| TpbError::ParseError(format!("bad detail link {}: {}", href, e)))?
        .to_string();

    let magnet_link = links
        .get(1)
        .and_then(|a| a.value().attr("href"))
        .ok_or_else(|| TpbError::ParseError(format!("missing magnet link for {}", title)))?
        .to_string();

    let torrent_link = links
        .get(2)
        .and_then(|a| a.value().attr("href"))
        .filter(|href| href.ends_with(".torrent"))
        .map(|href| {
            base_url
                .join(href)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.to_string())
        });

    let meta = cols[1]
        .select(&selector("font")?)
        .next()
        .map(|font| normalize_spaces(&text_of(&font)))
        .ok_or_else(|| TpbError::ParseError(format!("missing meta text for {}", title)))?;
    let captures = META
        .captures(&meta)
        .ok_or_else(|| TpbError::ParseError(format!("unexpected meta text: {}", meta)))?;
    let created_raw = captures[1].trim().to_string();
    let size = captures[2].trim().to_string();
    let user = captures[3].trim().to_string();

    let seeders = parse_count(&cols[2], "seeders")?;
    let leechers = parse_count(&cols[3], "leechers")?;

    Ok(Torrent {
        title,
        url,
        category,
        sub_category,
        magnet_link,
        torrent_link,
        created_raw,
        size,
        user,
        seeders,
        leechers,
        scraped_at,
        info: OnceCell::new(),
        files: OnceCell::new(),
    })
}

fn parse_count(cell: &ElementRef, what: &str) -> Result<u32> {
    let text = text_of(cell);
    text.parse()
        .map_err(|_| TpbError::ParseError(format!("invalid {} count: {:?}", what, text)))
}
