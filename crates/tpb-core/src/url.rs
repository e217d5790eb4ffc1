//! URL segment model for listing pages
//!
//! Listing URLs encode their parameters positionally as path segments,
//! e.g. `/search/{query}/{page}/{order}/{category}`. [`UrlSegments`] keeps the
//! base URL, the fixed base path and an ordered set of named segments whose
//! values can be read and replaced by name.

use std::fmt;

use crate::error::{Result, TpbError};

/// Base URL + base path + ordered, named, mutable path segments
///
/// The number and names of segments are fixed at construction, only the
/// values change afterwards.
///
/// # Example
/// ```
/// use tpb_core::url::UrlSegments;
/// let mut url = UrlSegments::new(
///     "https://thepiratebay.org",
///     "/recent",
///     &["page"],
///     &["0"],
/// )?;
/// url.set("page", "2")?;
/// assert_eq!(url.build(), "https://thepiratebay.org/recent/2");
/// # Ok::<(), tpb_core::TpbError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSegments {
    base: String,
    path: String,
    segments: Vec<(String, String)>,
}

impl UrlSegments {
    /// Create a segment model from parallel lists of names and default values
    ///
    /// # Errors
    /// - `Config` if `names` and `defaults` differ in length
    /// - `Config` if a segment name is declared twice
    pub fn new<N, D>(base: &str, path: &str, names: &[N], defaults: &[D]) -> Result<Self>
    where
        N: AsRef<str>,
        D: AsRef<str>,
    {
        if names.len() != defaults.len() {
            return Err(TpbError::Config(format!(
                "{} segments but {} defaults",
                names.len(),
                defaults.len()
            )));
        }

        let mut segments: Vec<(String, String)> = Vec::with_capacity(names.len());
        for (name, value) in names.iter().zip(defaults) {
            let name = name.as_ref();
            if segments.iter().any(|(existing, _)| existing == name) {
                return Err(TpbError::Config(format!("duplicate segment: {}", name)));
            }
            segments.push((name.to_string(), value.as_ref().to_string()));
        }

        Ok(Self {
            base: base.to_string(),
            path: path.to_string(),
            segments,
        })
    }

    /// Build a model whose segment names are known to be distinct
    pub(crate) fn fixed<const N: usize>(
        base: &str,
        path: &str,
        segments: [(&str, String); N],
    ) -> Self {
        Self {
            base: base.to_string(),
            path: path.to_string(),
            segments: segments
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// Current value of a segment, `None` if no such segment is declared
    pub fn get(&self, name: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|(segment, _)| segment == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the value of a single segment
    ///
    /// # Errors
    /// Returns `Config` if no segment with that name is declared
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<&mut Self> {
        let Some(slot) = self.slot_mut(name) else {
            return Err(TpbError::Config(format!("unknown segment: {}", name)));
        };
        *slot = value.into();
        Ok(self)
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut String> {
        self.segments
            .iter_mut()
            .find(|(segment, _)| segment == name)
            .map(|(_, value)| value)
    }

    /// Segment names in declared order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|(name, _)| name.as_str())
    }

    /// Base URL the model was created with
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Render the full URL
    ///
    /// Concatenates base URL, base path and every segment value in declared
    /// order, percent-encoding each value on its own.
    pub fn build(&self) -> String {
        let mut url = String::with_capacity(self.base.len() + self.path.len() + 32);
        url.push_str(self.base.trim_end_matches('/'));
        url.push_str(self.path.trim_end_matches('/'));
        for (_, value) in &self.segments {
            url.push('/');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

impl fmt::Display for UrlSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

/// Extracts the numeric torrent id from a detail page URL
///
/// Detail pages live at `/torrent/{id}/{title}`.
///
/// # Example
/// ```
/// use tpb_core::url::extract_torrent_id;
/// let id = extract_torrent_id("https://thepiratebay.org/torrent/8519467/Breaking_Bad");
/// assert_eq!(id, Some(8519467));
/// ```
pub fn extract_torrent_id(url: &str) -> Option<u64> {
    let path = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            &rest[rest.find('/')?..]
        }
        None => url,
    };
    let path = path.split(['?', '#']).next().unwrap_or(path);

    path.trim_start_matches('/').split('/').nth(1)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abc() -> UrlSegments {
        UrlSegments::new("", "/", &["alpha", "beta", "gamma"], &["0", "1", "2"]).unwrap()
    }

    #[test]
    fn test_build_defaults() {
        assert_eq!(abc().build(), "/0/1/2");
    }

    #[test]
    fn test_set_all_segments() {
        let mut url = abc();
        url.set("alpha", "9").unwrap();
        url.set("beta", "8").unwrap();
        url.set("gamma", "7").unwrap();
        assert_eq!(url.to_string(), "/9/8/7");
    }

    #[test]
    fn test_segments_are_per_instance() {
        let url = abc();
        let other = UrlSegments::new("", "/", &["one", "two", "three"], &["0", "1", "2"]).unwrap();
        assert!(url.get("alpha").is_some());
        assert!(url.get("one").is_none());
        assert!(other.get("one").is_some());
        assert!(other.get("alpha").is_none());
    }

    #[test]
    fn test_mismatched_defaults_is_config_error() {
        let result = UrlSegments::new("", "/", &["alpha", "beta"], &["0"]);
        assert!(matches!(result, Err(TpbError::Config(_))));
    }

    #[test]
    fn test_duplicate_name_is_config_error() {
        let result = UrlSegments::new("", "/", &["page", "page"], &["0", "1"]);
        assert!(matches!(result, Err(TpbError::Config(_))));
    }

    #[test]
    fn test_set_unknown_segment() {
        let mut url = abc();
        assert!(matches!(url.set("delta", "3"), Err(TpbError::Config(_))));
        assert_eq!(url.build(), "/0/1/2");
    }

    #[test]
    fn test_build_with_base_and_path() {
        let url = UrlSegments::new(
            "https://thepiratebay.org/",
            "/search",
            &["query", "page", "order", "category"],
            &["breaking bad", "0", "7", "0"],
        )
        .unwrap();
        assert_eq!(
            url.build(),
            "https://thepiratebay.org/search/breaking%20bad/0/7/0"
        );
    }

    #[test]
    fn test_segment_with_slash_is_encoded() {
        let url = UrlSegments::new("http://localhost", "/search", &["query"], &["AC/DC"]).unwrap();
        assert_eq!(url.build(), "http://localhost/search/AC%2FDC");
    }

    #[test]
    fn test_no_segments() {
        let url = UrlSegments::new::<&str, &str>("http://localhost", "/top", &[], &[]).unwrap();
        assert_eq!(url.build(), "http://localhost/top");
    }

    #[test]
    fn test_build_does_not_mutate() {
        let url = abc();
        let before = url.clone();
        let _ = url.build();
        assert_eq!(url, before);
    }

    #[test]
    fn test_extract_torrent_id_from_path() {
        assert_eq!(extract_torrent_id("/torrent/123/Some_Title"), Some(123));
    }

    #[test]
    fn test_extract_torrent_id_from_full_url() {
        assert_eq!(
            extract_torrent_id("http://127.0.0.1:8000/torrent/7786210/Breaking.Bad?x=1"),
            Some(7786210)
        );
    }

    #[test]
    fn test_extract_torrent_id_invalid() {
        assert_eq!(extract_torrent_id("/torrent/abc/Title"), None);
        assert_eq!(extract_torrent_id("/torrent"), None);
        assert_eq!(extract_torrent_id("https://thepiratebay.org"), None);
    }

    proptest! {
        #[test]
        fn prop_set_segment_lands_at_its_position(
            index in 0usize..4,
            value in "[a-zA-Z0-9]{1,12}",
        ) {
            let names = ["query", "page", "order", "category"];
            let defaults = ["q", "0", "7", "0"];
            let mut url = UrlSegments::new("http://localhost", "/search", &names, &defaults).unwrap();
            url.set(names[index], value.clone()).unwrap();

            let built = url.build();
            let rendered: Vec<&str> = built
                .trim_start_matches("http://localhost/search/")
                .split('/')
                .collect();

            prop_assert_eq!(rendered.len(), 4);
            for (i, segment) in rendered.iter().enumerate() {
                if i == index {
                    prop_assert_eq!(*segment, value.as_str());
                } else {
                    prop_assert_eq!(*segment, defaults[i]);
                }
            }
        }
    }
}
