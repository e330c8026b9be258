//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small catalog over HTTP and run the
//! full crawl cycle end-to-end through the HTTP page driver.

use catalog_crawler::config::{CatalogConfig, Config, OutputConfig, TimingConfig};
use catalog_crawler::crawler::Orchestrator;
use catalog_crawler::{CatalogError, HttpPageDriver};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG: &str = "/test-sites/e-commerce/allinone";

/// Creates a test configuration pointing at the mock catalog
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let out = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
    Config {
        catalog: CatalogConfig {
            root_url: format!("{}{}", base_url, CATALOG),
            path_marker: "allinone".to_string(),
        },
        timing: TimingConfig {
            element_wait_ms: 200,
            poll_interval_ms: 10,
            page_settle_ms: 0, // No settling needed for static pages
            click_retries: 2,
        },
        output: OutputConfig {
            table_path: out("products.csv"),
            table_fallback_path: out("products_output.csv"),
            summary_path: out("analysis.txt"),
            top_n: 3,
        },
        ..Config::default()
    }
}

fn side_menu() -> String {
    format!(
        r#"<ul id="side-menu">
            <li><a href="{c}/phones">Phones</a></li>
            <li><a href="{c}/computers">Computers</a></li>
        </ul>"#,
        c = CATALOG
    )
}

fn card(name: &str, price: &str, rating: u8, reviews: &str) -> String {
    format!(
        r#"<div class="thumbnail">
            <h4 class="price">{}</h4>
            <a class="title" href="/product/1">{}</a>
            <div class="ratings">
                <p class="review-count">{}</p>
                <p data-rating="{}"></p>
            </div>
        </div>"#,
        price, name, reviews, rating
    )
}

fn page(body: &str) -> String {
    format!("<html><body>{}{}</body></html>", side_menu(), body)
}

async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Mounts a catalog with two categories, one subcategory and a two-page listing
async fn mount_catalog(server: &MockServer) {
    mount_page(server, CATALOG, page("<h1>Welcome</h1>")).await;

    mount_page(
        server,
        &format!("{}/phones", CATALOG),
        page(&format!(
            "{}{}",
            card("Nokia 123", "$24.99", 3, "7 reviews"),
            card("Iphone", "$899.99", 5, "12 reviews"),
        )),
    )
    .await;

    // Links back to phones and out of the catalog must not add targets
    mount_page(
        server,
        &format!("{}/computers", CATALOG),
        page(&format!(
            r#"<a class="subcategory-link" href="{c}/computers/laptops">Laptops</a>
               <a class="category-link" href="{c}/phones">Phones</a>
               <a class="subcategory-link" href="/other-shop/tablets">Tablets</a>
               {card}"#,
            c = CATALOG,
            card = card("Packard 255 G2", "$416.99", 2, "2 reviews"),
        )),
    )
    .await;

    mount_page(
        server,
        &format!("{}/computers/laptops", CATALOG),
        page(&format!(
            r#"{}{}
               <ul class="pagination">
                   <li class="page-item active"><span>1</span></li>
                   <li class="page-item"><a href="{c}/computers/laptops/page/2">2</a></li>
                   <li class="page-item"><a href="{c}/computers/laptops/page/2">›</a></li>
               </ul>"#,
            card("Asus VivoBook", "$1,099.00", 4, "11 reviews"),
            card("Acer Aspire", "$494.70", 5, "12 reviews"),
            c = CATALOG,
        )),
    )
    .await;

    mount_page(
        server,
        &format!("{}/computers/laptops/page/2", CATALOG),
        page(&format!(
            r#"{}
               <ul class="pagination">
                   <li class="page-item"><a href="{c}/computers/laptops">1</a></li>
                   <li class="page-item active"><span>2</span></li>
                   <li class="page-item disabled"><span>›</span></li>
               </ul>"#,
            card("Dell Latitude", "call us", 1, "0 reviews"),
            c = CATALOG,
        )),
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_writes_table_and_summary() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let driver = HttpPageDriver::from_config(&config.user_agent).unwrap();
    let mut orchestrator = Orchestrator::new(config, driver);

    let outcome = orchestrator.execute().await.expect("crawl should succeed");

    assert_eq!(outcome.targets, 3, "phones, computers and laptops");
    assert_eq!(outcome.products, 6);
    assert_eq!(outcome.table_path, Some(dir.path().join("products.csv")));

    let csv = fs::read_to_string(dir.path().join("products.csv")).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(
        rows,
        vec![
            "nombre,precio,rating,reviews",
            "Nokia 123,24.99,3,7",
            "Iphone,899.99,5,12",
            "Packard 255 G2,416.99,2,2",
            "Asus VivoBook,1099.00,4,11",
            "Acer Aspire,494.70,5,12",
            "Dell Latitude,0.00,1,0",
        ]
    );

    let summary = fs::read_to_string(dir.path().join("analysis.txt")).unwrap();
    assert!(summary.starts_with(
        "Total products: 6\n\
         Average price: $489.28\n\
         Top 3 products:\n\
         - Iphone | 5⭐ | 12 reviews | $899.99\n\
         - Acer Aspire | 5⭐ | 12 reviews | $494.70\n\
         - Asus VivoBook | 4⭐ | 11 reviews | $1099.00\n"
    ));
    assert!(summary.contains("Generated at "));
}

#[tokio::test]
async fn test_locked_table_path_uses_fallback() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), &dir);
    config.output.table_path = dir
        .path()
        .join("missing")
        .join("products.csv")
        .to_string_lossy()
        .into_owned();

    let driver = HttpPageDriver::from_config(&config.user_agent).unwrap();
    let mut orchestrator = Orchestrator::new(config, driver);
    let outcome = orchestrator.execute().await.unwrap();

    let fallback = dir.path().join("products_output.csv");
    assert_eq!(outcome.table_path, Some(fallback.clone()));

    let csv = fs::read_to_string(fallback).unwrap();
    assert_eq!(csv.lines().count(), 7, "header plus six products");
    assert!(dir.path().join("analysis.txt").exists());
}

#[tokio::test]
async fn test_menu_never_renders() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        CATALOG,
        "<html><body><p>Maintenance</p></body></html>".to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let driver = HttpPageDriver::from_config(&config.user_agent).unwrap();
    let mut orchestrator = Orchestrator::new(config, driver);

    let err = orchestrator.execute().await.unwrap_err();
    assert!(matches!(err, CatalogError::DiscoveryTimeout { .. }));

    // run() contains the same failure and produces nothing
    orchestrator.run().await;
    assert!(!dir.path().join("products.csv").exists());
    assert!(!dir.path().join("products_output.csv").exists());
    assert!(!dir.path().join("analysis.txt").exists());
}

#[tokio::test]
async fn test_unreachable_listing_is_skipped() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, CATALOG, page("<h1>Welcome</h1>")).await;
    mount_page(
        &mock_server,
        &format!("{}/phones", CATALOG),
        page(&card("Nokia 123", "$24.99", 3, "7 reviews")),
    )
    .await;
    // computers is not mounted: wiremock answers 404

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let driver = HttpPageDriver::from_config(&config.user_agent).unwrap();
    let mut orchestrator = Orchestrator::new(config, driver);

    let outcome = orchestrator.execute().await.expect("crawl should succeed");

    assert_eq!(outcome.targets, 2, "the broken listing is still visited");
    assert_eq!(outcome.products, 1);

    let csv = fs::read_to_string(dir.path().join("products.csv")).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec!["nombre,precio,rating,reviews", "Nokia 123,24.99,3,7"]
    );
    assert!(dir.path().join("analysis.txt").exists());
}

#[tokio::test]
async fn test_failing_next_page_keeps_collected_products() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, CATALOG, page("<h1>Welcome</h1>")).await;
    mount_page(
        &mock_server,
        &format!("{}/phones", CATALOG),
        page(&card("Nokia 123", "$24.99", 3, "7 reviews")),
    )
    .await;
    mount_page(
        &mock_server,
        &format!("{}/computers", CATALOG),
        page(&format!(
            r#"{}
               <ul class="pagination">
                   <li class="page-item active"><span>1</span></li>
                   <li class="page-item"><a href="{c}/computers/page/2">›</a></li>
               </ul>"#,
            card("Packard 255 G2", "$416.99", 2, "2 reviews"),
            c = CATALOG,
        )),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/computers/page/2", CATALOG)))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let driver = HttpPageDriver::from_config(&config.user_agent).unwrap();
    let mut orchestrator = Orchestrator::new(config, driver);

    let outcome = orchestrator.execute().await.expect("crawl should succeed");

    assert_eq!(outcome.targets, 2);
    assert_eq!(outcome.products, 2);

    let csv = fs::read_to_string(dir.path().join("products.csv")).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec![
            "nombre,precio,rating,reviews",
            "Nokia 123,24.99,3,7",
            "Packard 255 G2,416.99,2,2",
        ]
    );

    let summary = fs::read_to_string(dir.path().join("analysis.txt")).unwrap();
    assert!(summary.starts_with("Total products: 2\n"));
}
