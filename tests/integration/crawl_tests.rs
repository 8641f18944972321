//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end through the HTTP fetcher.

use domain_crawler::config::{CrawlerConfig, FailurePolicy, HttpConfig, UserAgentConfig};
use domain_crawler::crawler::{crawl, crawl_with_config, HttpFetcher};
use domain_crawler::graph::{Link, PageGraph};
use domain_crawler::state::PageState;
use domain_crawler::{CrawlError, FetchError};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_fetcher() -> Arc<HttpFetcher> {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
    };
    let http = HttpConfig {
        timeout_secs: 5,
        connect_timeout_secs: 5,
    };
    Arc::new(HttpFetcher::new(&user_agent, &http).expect("Failed to build fetcher"))
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_with_cycle() {
    let mock_server = MockServer::start().await;
    let seed = format!("{}/", mock_server.uri());

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><link rel="stylesheet" href="site.css"></head>
           <body><a href="/link1.html">Link 1</a></body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/link1.html",
        r#"<html><body><img src="logo.png"><a href="/link2.html">Link 2</a></body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/link2.html",
        r#"<html><body><a href="/">Home</a></body></html>"#,
    )
    .await;

    let graph = crawl(&seed, http_fetcher()).await.expect("Crawl failed");

    let mut expected = PageGraph::new(seed.clone());
    let root = expected.root();
    let link1 = expected.add_page(format!("{}/link1.html", mock_server.uri()));
    let link2 = expected.add_page(format!("{}/link2.html", mock_server.uri()));
    expected[root].push_static_asset("site.css");
    expected[root].push_link(Link::new("Link 1", link1));
    expected[link1].push_static_asset("logo.png");
    expected[link1].push_link(Link::new("Link 2", link2));
    expected[link2].push_link(Link::back_reference("Home", root));

    assert_eq!(graph, expected);
    assert_eq!(graph.len(), 3);
    assert!(graph
        .iter()
        .all(|(_, page)| page.state() == PageState::Processed));
}

#[tokio::test]
async fn test_out_of_domain_links_are_not_fetched() {
    let mock_server = MockServer::start().await;
    let seed = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="http://example.org/elsewhere">Elsewhere</a>
           <a href="/inside">Inside</a>"#,
    )
    .await;
    mount_page(&mock_server, "/inside", "<p>leaf</p>").await;

    let graph = crawl(&seed, http_fetcher()).await.expect("Crawl failed");

    let outside = graph
        .find("http://example.org/elsewhere")
        .expect("out-of-domain page is recorded");
    assert_eq!(graph[outside].state(), PageState::Discovered);
    assert!(graph[outside].links().is_empty());

    let inside = graph
        .find(&format!("{}/inside", seed))
        .expect("in-domain page is recorded");
    assert_eq!(graph[inside].state(), PageState::Processed);
}

#[tokio::test]
async fn test_best_effort_flags_missing_page() {
    let mock_server = MockServer::start().await;
    let seed = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Missing</a><a href="/present">Present</a>"#,
    )
    .await;
    mount_page(&mock_server, "/present", "<p>here</p>").await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let graph = crawl(&seed, http_fetcher()).await.expect("Crawl failed");

    let missing = graph
        .find(&format!("{}/missing", seed))
        .expect("missing page is recorded");
    assert!(graph[missing].fetch_failed());
    assert_eq!(graph[missing].state(), PageState::Failed);

    let present = graph
        .find(&format!("{}/present", seed))
        .expect("present page is recorded");
    assert!(!graph[present].fetch_failed());
    assert!(graph.to_string().contains("/missing ✗"));
}

#[tokio::test]
async fn test_fail_fast_returns_first_error() {
    let mock_server = MockServer::start().await;
    let seed = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/broken">Broken</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = CrawlerConfig {
        max_concurrent_fetches: 4,
        failure_policy: FailurePolicy::FailFast,
    };
    let result = crawl_with_config(&seed, http_fetcher(), &config).await;

    match result {
        Err(CrawlError::Fetch { url, source }) => {
            assert_eq!(url, format!("{}/broken", seed));
            assert!(matches!(source, FetchError::Status(500)));
        }
        other => panic!("Expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_seed_with_path_scopes_crawl() {
    let mock_server = MockServer::start().await;
    let seed = format!("{}/docs", mock_server.uri());
    let blog = format!("{}/blog", mock_server.uri());

    mount_page(
        &mock_server,
        "/docs",
        &format!(r#"<a href="/intro">Intro</a><a href="{}">Blog</a>"#, blog),
    )
    .await;
    mount_page(
        &mock_server,
        "/docs/intro",
        &format!(r#"<a href="{}">Back</a>"#, seed),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let graph = crawl(&seed, http_fetcher()).await.expect("Crawl failed");

    assert_eq!(graph.domain(), seed);
    let intro = graph
        .find(&format!("{}/intro", seed))
        .expect("root-relative link resolves against the seed");
    assert_eq!(graph[intro].state(), PageState::Processed);

    let blog = graph.find(&blog).expect("out-of-scope page is recorded");
    assert_eq!(graph[blog].state(), PageState::Discovered);
}
