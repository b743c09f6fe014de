use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use hikegear_scraper::{FetchOptions, PageClient, ScrapeError, scrape_backpack};

const PAGE: &str = r#"<html><body>
<h1 class="lpListName">Weekend</h1>
<ul><li class="lpCategory"><h2 class="lpCategoryName">Sleep</h2><ul>
<li class="lpItem"><span class="lpName">Quilt</span><span class="lpDescription"></span>
<span class="lpWeight">0.5</span><div class="lpUnitSelect"><span class="lpDisplay">kg</span></div>
<span class="lpQtyCell">1</span></li>
</ul></li></ul>
</body></html>"#;

/// Serve `responses` in order, one per connection, then stop.
fn serve(responses: Vec<(u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            let reply = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).unwrap();
        }
    });
    format!("http://{addr}/r/abc")
}

fn fast_options(max_attempts: u32) -> FetchOptions {
    FetchOptions {
        max_attempts,
        timeout: Duration::from_secs(5),
        retry_delay: Duration::from_millis(10),
        ..FetchOptions::default()
    }
}

#[test]
fn fetches_page_body() {
    let url = serve(vec![(200, PAGE)]);
    let client = PageClient::new(fast_options(3)).unwrap();
    let body = client.fetch(&url).unwrap();
    assert!(body.contains("lpListName"));
}

#[test]
fn not_found_and_bad_request_map_to_not_found() {
    let url = serve(vec![(404, "gone"), (400, "bad")]);
    let client = PageClient::new(fast_options(3)).unwrap();
    assert!(matches!(client.fetch(&url), Err(ScrapeError::NotFound { .. })));
    assert!(matches!(client.fetch(&url), Err(ScrapeError::NotFound { .. })));
}

#[test]
fn other_failures_are_server_errors() {
    let url = serve(vec![(503, "maintenance")]);
    let client = PageClient::new(fast_options(3)).unwrap();
    match client.fetch(&url) {
        Err(ScrapeError::ServerError { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[test]
fn refused_connection_gives_up_after_max_attempts() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = PageClient::new(fast_options(3)).unwrap();
    match client.fetch(&format!("http://{addr}/r/abc")) {
        Err(ScrapeError::Unreachable { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("expected unreachable, got {other:?}"),
    }
}

#[test]
fn rejects_non_http_urls() {
    let client = PageClient::new(fast_options(1)).unwrap();
    assert!(matches!(
        client.fetch("ftp://example.com/list"),
        Err(ScrapeError::InvalidUrl(_))
    ));
    assert!(matches!(client.fetch("not a url"), Err(ScrapeError::InvalidUrl(_))));
}

#[test]
fn zero_attempts_is_a_config_error() {
    assert!(matches!(
        PageClient::new(fast_options(0)),
        Err(ScrapeError::Config(_))
    ));
}

#[test]
fn scrape_and_import_end_to_end() {
    let url = serve(vec![(200, PAGE)]);
    let client = PageClient::new(fast_options(3)).unwrap();
    let page = scrape_backpack(&client, &url);
    let draft = hikegear_import::import_remote(page).unwrap();
    assert_eq!(draft.name, "Weekend");
    assert_eq!(draft.description, "");
    assert_eq!(draft.list[0].items[0].weight, 500.0);
}

#[test]
fn scrape_failure_becomes_not_found_import() {
    let url = serve(vec![(404, "")]);
    let client = PageClient::new(fast_options(3)).unwrap();
    let page = scrape_backpack(&client, &url);
    assert!(page.is_none());
    let err = hikegear_import::import_remote(page).unwrap_err();
    assert_eq!(err.status_code(), 404);
}
