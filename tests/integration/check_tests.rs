//! End-to-end tests for the batch check pipeline
//!
//! These tests run `check_usernames` against a wiremock marketplace and
//! verify classification, failure isolation, and normalization.

use fragment_scout::checker::{build_http_client, check_usernames, LayoutVariant};
use fragment_scout::config::{
    CheckerConfig, Config, MarketplaceConfig, ServerConfig, UserAgentConfig,
};
use fragment_scout::UsernameStatus;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the given marketplace base URL
fn create_test_config(base_url: &str, layout: LayoutVariant) -> Config {
    Config {
        checker: CheckerConfig {
            concurrency: 5,
            request_timeout_secs: 1, // Very short for testing
            max_batch_size: 100,
        },
        marketplace: MarketplaceConfig {
            base_url: base_url.to_string(),
            layout,
        },
        user_agent: UserAgentConfig {
            header: "TestAgent/1.0".to_string(),
        },
        server: ServerConfig::default(),
    }
}

fn test_client(config: &Config) -> reqwest::Client {
    build_http_client(
        &config.user_agent,
        Duration::from_secs(config.checker.request_timeout_secs),
    )
    .expect("Failed to build HTTP client")
}

/// Builds a search-results page with a single row for `username`
fn table_page(username: &str, cells: &str) -> String {
    format!(
        r#"<html><body><table><tbody class="tm-high-cells">
        <tr class="tm-row-selectable">
            <td class="table-cell-value tm-value">@{username}</td>
            {cells}
        </tr>
        </tbody></table></body></html>"#
    )
}

fn raw(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_available_username_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "available_test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(table_page(
            "available_test",
            r#"<td><div class="tm-status-avail">Available</div></td>"#,
        )))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["available_test"])).await;

    assert_eq!(results.len(), 1);
    assert_eq!(
        results.get("available_test"),
        Some(&UsernameStatus::Available)
    );
}

#[tokio::test]
async fn test_case_fold_duplicates_collapse_to_one_key() {
    let mock_server = MockServer::start().await;

    // Only the lowercase form should ever be requested, exactly once
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "sadish"))
        .respond_with(ResponseTemplate::new(200).set_body_string(table_page(
            "sadish",
            r#"<td><div class="tm-status-avail">Available</div></td>"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["Sadish", "sadish"])).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results.get("sadish"), Some(&UsernameStatus::Available));
}

#[tokio::test]
async fn test_timeout_does_not_affect_siblings() {
    let mock_server = MockServer::start().await;

    // "slow" answers after the 1s client timeout has expired
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(table_page(
                    "slow",
                    r#"<td><div class="tm-status-avail">Available</div></td>"#,
                ))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_string(table_page(
            "fast",
            r#"<td><div class="tm-status-sold">Sold</div></td>"#,
        )))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["slow", "fast"])).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results.get("slow"), Some(&UsernameStatus::Timeout));
    assert_eq!(results.get("fast"), Some(&UsernameStatus::Sold));
}

#[tokio::test]
async fn test_rate_limited_upstream_maps_to_cf_blocked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "throttled"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["throttled"])).await;

    assert_eq!(results.get("throttled"), Some(&UsernameStatus::CfBlocked));
}

#[tokio::test]
async fn test_forbidden_upstream_maps_to_cf_blocked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "walled"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["walled"])).await;

    assert_eq!(results.get("walled"), Some(&UsernameStatus::CfBlocked));
}

#[tokio::test]
async fn test_404_body_is_still_classified() {
    let mock_server = MockServer::start().await;

    // A 404 page that still carries a parseable results table
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "durov"))
        .respond_with(ResponseTemplate::new(404).set_body_string(table_page(
            "durov",
            r#"<td><div class="tm-status-taken">Taken</div></td>"#,
        )))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["durov"])).await;

    assert_eq!(results.get("durov"), Some(&UsernameStatus::Taken));
}

#[tokio::test]
async fn test_unknown_username_is_not_found() {
    let mock_server = MockServer::start().await;

    // The search answers with rows for a different username only
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(table_page(
            "someoneelse",
            r#"<td><div class="tm-status-avail">Available</div></td>"#,
        )))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["ghost"])).await;

    assert_eq!(results.get("ghost"), Some(&UsernameStatus::NotFound));
}

#[tokio::test]
async fn test_unreachable_marketplace_maps_to_error() {
    // Nothing listens on this port; the connection is refused immediately
    let config = create_test_config("http://127.0.0.1:9", LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["anyone"])).await;

    assert_eq!(results.get("anyone"), Some(&UsernameStatus::Error));
}

#[tokio::test]
async fn test_single_page_layout_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/username/durov"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
            <span class="tm-section-header-status tm-status-taken">Taken</span>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::SinglePage);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["durov"])).await;

    assert_eq!(results.get("durov"), Some(&UsernameStatus::Taken));
}

#[tokio::test]
async fn test_mixed_batch_is_complete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "winner"))
        .respond_with(ResponseTemplate::new(200).set_body_string(table_page(
            "winner",
            r#"<td><div class="tm-status-for-sale">For sale</div></td>"#,
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "blocked"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("query", "missing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><table><tbody class="tm-high-cells"></tbody></table></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), LayoutVariant::Table);
    let client = test_client(&config);

    let results = check_usernames(&client, &config, &raw(&["winner", "blocked", "missing"])).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results.get("winner"), Some(&UsernameStatus::ForSale));
    assert_eq!(results.get("blocked"), Some(&UsernameStatus::CfBlocked));
    assert_eq!(results.get("missing"), Some(&UsernameStatus::NotFound));
}
