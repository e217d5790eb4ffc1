//! Detail page and file list parsers

use std::collections::BTreeMap;

use scraper::Html;

use super::listing::{normalize_spaces, selector};
use crate::error::{Result, TpbError};

const INFO_SELECTOR: &str = "#details > .nfo > pre";

/// Extracts the description text of a torrent detail page
///
/// # Errors
/// Returns `ElementNotFound` if the page has no description block
pub fn parse_torrent_info(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    document
        .select(&selector(INFO_SELECTOR)?)
        .next()
        .map(|pre| pre.text().collect::<String>())
        .ok_or_else(|| TpbError::ElementNotFound(INFO_SELECTOR.to_string()))
}

/// Parses the file list returned by the details AJAX endpoint
///
/// Each row holds a file name and a human readable size.
///
/// # Errors
/// Returns `ParseError` if a row does not have exactly two cells
pub fn parse_file_list(html: &str) -> Result<BTreeMap<String, String>> {
    let document = Html::parse_fragment(html);
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let mut files = BTreeMap::new();
    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();

        match cells.as_slice() {
            [name, size] => {
                files.insert(name.clone(), normalize_spaces(size));
            }
            _ => {
                return Err(TpbError::ParseError(format!(
                    "expected file name and size, found {} cells",
                    cells.len()
                )));
            }
        }
    }

    Ok(files)
}
