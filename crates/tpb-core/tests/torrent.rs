mod common;

use std::time::Duration;

use chrono::{Duration as TimeDelta, Local};
use futures::TryStreamExt;
use tpb_core::{ClientConfig, Torrent, Tpb, TpbError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{page_with_rows, row, tpb};

async fn single_torrent(server: &MockServer, tpb: &Tpb, id: u64) -> Torrent {
    Mock::given(method("GET"))
        .and(path("/top/0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_with_rows(&row(id, true))))
        .mount(server)
        .await;

    let mut top = tpb.top(0);
    let mut torrents: Vec<Torrent> = top.items().try_collect().await.unwrap();
    torrents.remove(0)
}

#[tokio::test]
async fn test_info_is_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/torrent/1000/Torrent_1000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><div id="details">
                <div class="nfo"><pre>Season finale, 720p.</pre></div>
            </div></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let tpb = tpb(&server);
    let torrent = single_torrent(&server, &tpb, 1000).await;

    assert_eq!(tpb.torrent_info(&torrent).await.unwrap(), "Season finale, 720p.");
    assert_eq!(torrent.info(tpb.client()).await.unwrap(), "Season finale, 720p.");
}

#[tokio::test]
async fn test_files_are_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ajax_details_filelist.php"))
        .and(query_param("id", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div id="fileList"><table>
                <tr><td align="left">Torrent.1000.mkv</td><td align="right">700.5&nbsp;MiB</td></tr>
                <tr><td align="left">Torrent.1000.nfo</td><td align="right">2.1&nbsp;KiB</td></tr>
            </table></div>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let tpb = tpb(&server);
    let torrent = single_torrent(&server, &tpb, 1000).await;

    let files = tpb.torrent_files(&torrent).await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files["Torrent.1000.mkv"], "700.5 MiB");
    assert_eq!(files["Torrent.1000.nfo"], "2.1 KiB");

    let again = torrent.files(tpb.client()).await.unwrap();
    assert_eq!(again.len(), 2);
}

#[tokio::test]
async fn test_failed_info_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/torrent/7/Torrent_7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(2)
        .mount(&server)
        .await;

    let tpb = tpb(&server);
    let torrent = single_torrent(&server, &tpb, 7).await;

    assert!(matches!(
        tpb.torrent_info(&torrent).await,
        Err(TpbError::ElementNotFound(_))
    ));
    assert!(tpb.torrent_info(&torrent).await.is_err());
}

#[tokio::test]
async fn test_relative_created_is_resolved_against_scrape_time() {
    let server = MockServer::start().await;
    let tpb = tpb(&server);
    // row 1005 is uploaded "45 mins ago"
    let torrent = single_torrent(&server, &tpb, 1005).await;

    assert_eq!(torrent.created_raw, "45 mins ago");
    assert_eq!(torrent.created(), torrent.scraped_at - TimeDelta::minutes(45));
    assert!(Local::now() - torrent.scraped_at < TimeDelta::seconds(5));
}

#[tokio::test]
async fn test_retry_recovers_from_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recent/0"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/recent/0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_with_rows(&row(1, false))))
        .mount(&server)
        .await;

    let tpb = Tpb::with_config(ClientConfig {
        requests_per_second: 1000.0,
        max_retries: 1,
        timeout_secs: 5,
        ..ClientConfig::with_base_url(server.uri())
    })
    .unwrap();

    let started = std::time::Instant::now();
    let mut recent = tpb.recent(0);
    let torrents: Vec<Torrent> = recent.items().try_collect().await.unwrap();

    assert_eq!(torrents.len(), 1);
    assert!(started.elapsed() >= Duration::from_millis(900));
}

#[tokio::test]
async fn test_files_are_fetched_from_the_torrent_host() {
    let mirror = MockServer::start().await;
    let configured = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ajax_details_filelist.php"))
        .and(query_param("id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<table><tr><td>Mirror.42.mkv</td><td>1.0&nbsp;GiB</td></tr></table>"#,
        ))
        .expect(1)
        .mount(&mirror)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&configured)
        .await;

    let tpb = tpb(&configured);
    let torrent = Torrent::from_url(&format!("{}/torrent/42/Mirror_42", mirror.uri()));

    let files = tpb.torrent_files(&torrent).await.unwrap();
    assert_eq!(files["Mirror.42.mkv"], "1.0 GiB");
}
