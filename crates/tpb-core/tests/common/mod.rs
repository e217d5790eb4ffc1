//! HTML fixtures and mock server helpers shared by the integration tests
#![allow(dead_code)]

use tpb_core::{ClientConfig, Tpb};
use wiremock::MockServer;

/// One listing row; `with_torrent_link` adds the optional `.torrent` link
pub fn row(id: u64, with_torrent_link: bool) -> String {
    let torrent_link = if with_torrent_link {
        format!(r#"<a href="//torrents.example.org/{id}/Torrent_{id}.torrent" title="Download this torrent"><img src="/static/img/dl.gif"></a>"#)
    } else {
        String::new()
    };

    format!(
        r#"<tr>
            <td class="vertTh"><center>
                <a href="/browse/200" title="More from this category">Video</a><br>
                (<a href="/browse/205" title="More from this category">TV shows</a>)
            </center></td>
            <td>
                <div class="detName"><a href="/torrent/{id}/Torrent_{id}" class="detLink">Torrent {id}</a></div>
                <a href="magnet:?xt=urn:btih:{id:040x}" title="Download this torrent using magnet"><img src="/static/img/icon-magnet.gif"></a>
                {torrent_link}
                <font class="detDesc">Uploaded {minutes}&nbsp;mins&nbsp;ago, Size 700.5&nbsp;MiB, ULed by <a class="detDesc" href="/user/uploader/">uploader</a></font>
            </td>
            <td align="right">{seeders}</td>
            <td align="right">{leechers}</td>
        </tr>"#,
        minutes = id % 60,
        seeders = id * 2,
        leechers = id % 7,
    )
}

/// A listing page with `count` rows whose ids start at `first_id`
pub fn listing_page(first_id: u64, count: u64) -> String {
    let rows: String = (first_id..first_id + count).map(|id| row(id, true)).collect();
    page_with_rows(&rows)
}

pub fn page_with_rows(rows: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html><head><title>The Pirate Bay</title></head><body>
        <div id="main-content">
        <table id="searchResult">
            <thead id="tableHead">
                <tr class="header"><th>Type</th><th>Name</th><th>SE</th><th>LE</th></tr>
            </thead>
            {rows}
            <tr><td colspan="9" style="text-align:center;"><b>1</b> <a href="/recent/1">2</a></td></tr>
        </table>
        </div>
        </body></html>"#
    )
}

/// A page without a listing table, as served for a search with no hits
pub fn no_results_page() -> String {
    r#"<!DOCTYPE html><html><body><div id="main-content"><h2>No hits. Try adding an asterisk in you search phrase.</h2></div></body></html>"#.to_string()
}

/// Scraper pointed at the mock server, without rate limiting delays
pub fn tpb(server: &MockServer) -> Tpb {
    Tpb::with_config(ClientConfig {
        requests_per_second: 1000.0,
        ..ClientConfig::with_base_url(server.uri())
    })
    .expect("client should build")
}

pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}
