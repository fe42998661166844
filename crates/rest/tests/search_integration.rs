//! Integration tests for the product search endpoint.
//!
//! Covers:
//! - Query document shapes sent to the search engine (match-all, scored, sort)
//! - Facet filter decoding (range, terms, unknown kinds, duplicates)
//! - Facet links composing with the applied filters
//! - The POST form search
//! - Error mapping and health probes

mod common;

use aisle_rest::ServerConfig;
use aisle_search::FilterPolicy;
use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{BackendMode, create_test_server, create_test_server_with_config};

const PRICE_FILTER: &str = "filter.name=regularPrice&regularPrice.type=range\
    &regularPrice.displayName=Price&regularPrice.key=%24%24\
    &regularPrice.from=100&regularPrice.to=200";

const DEPARTMENT_FILTER: &str = "filter.name=department&department.type=terms\
    &department.displayName=Department&department.key=COMPUTERS";

fn filters_of(body: &Value) -> Vec<Value> {
    let bool_query = if body["query"]["bool"].is_object() {
        &body["query"]["bool"]
    } else {
        &body["query"]["function_score"]["query"]["bool"]
    };
    bool_query["filter"].as_array().cloned().unwrap_or_default()
}

fn text_query_of(body: &Value) -> Option<&str> {
    let bool_query = &body["query"]["function_score"]["query"]["bool"];
    bool_query["must"]["multi_match"]["query"].as_str()
}

// =============================================================================
// Query Document Tests
// =============================================================================

mod query_document {
    use super::*;

    #[tokio::test]
    async fn test_empty_search_is_match_all() {
        let (server, backend) = create_test_server();

        let response = server.get("/search/query").await;

        response.assert_status_ok();
        let request = backend.last_request();
        assert_eq!(request.index, "test_products");
        assert_eq!(request.body["size"], 10);
        assert_eq!(
            request.body["query"]["bool"]["must"],
            json!({ "match_all": {} })
        );
        assert_eq!(request.body["query"]["bool"]["filter"], json!([]));
        assert_eq!(request.body["sort"], json!([{ "_score": "desc" }]));

        let body: Value = response.json();
        assert_eq!(body["query"], "*");
        assert_eq!(body["sort"], "_score");
        assert_eq!(body["sortDir"], "desc");
        assert_eq!(body["appliedFilters"], "");
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_star_query_is_match_all() {
        let (server, backend) = create_test_server();

        server
            .get("/search/query?query=*")
            .await
            .assert_status_ok();

        assert!(backend.last_request().body["query"]["bool"].is_object());
    }

    #[tokio::test]
    async fn test_text_query_is_scored() {
        let (server, backend) = create_test_server();

        server
            .get("/search/query?query=ipad+2")
            .await
            .assert_status_ok();

        let body = backend.last_request().body;
        let function_score = &body["query"]["function_score"];
        assert_eq!(function_score["boost_mode"], "multiply");
        assert_eq!(function_score["score_mode"], "avg");
        assert_eq!(function_score["functions"].as_array().unwrap().len(), 3);
        assert_eq!(
            function_score["query"]["bool"]["must"]["multi_match"]["query"],
            "ipad 2"
        );
        assert_eq!(
            function_score["query"]["bool"]["should"]["match_phrase"]["name"]["boost"],
            200
        );
    }

    #[tokio::test]
    async fn test_sort_is_passed_through() {
        let (server, backend) = create_test_server();

        let response = server
            .get("/search/query?query=tv&sort=regularPrice&sortDir=ASC")
            .await;

        response.assert_status_ok();
        assert_eq!(
            backend.last_request().body["sort"],
            json!([{ "regularPrice": "asc" }])
        );
        let body: Value = response.json();
        assert_eq!(body["sortDir"], "asc");
    }

    #[tokio::test]
    async fn test_unknown_sort_direction_defaults_to_desc() {
        let (server, backend) = create_test_server();

        server
            .get("/search/query?sort=name&sortDir=sideways")
            .await
            .assert_status_ok();

        assert_eq!(
            backend.last_request().body["sort"],
            json!([{ "name": "desc" }])
        );
    }

    #[tokio::test]
    async fn test_aggregations_are_fixed() {
        let (server, backend) = create_test_server();

        server
            .get("/search/query?query=tv")
            .await
            .assert_status_ok();

        let aggs = &backend.last_request().body["aggs"];
        let ranges = aggs["regularPrice"]["range"]["ranges"].as_array().unwrap();
        assert_eq!(ranges.len(), 5);
        assert_eq!(aggs["missing_images"]["missing"]["field"], "image.keyword");
        assert_eq!(aggs["department"]["terms"]["field"], "department.keyword");
    }
}

// =============================================================================
// Filter Tests
// =============================================================================

mod filters {
    use super::*;

    #[tokio::test]
    async fn test_range_filter() {
        let (server, backend) = create_test_server();

        let uri = format!("/search/query?{}", PRICE_FILTER);
        let response = server.get(&uri).await;

        response.assert_status_ok();
        let expected = json!({ "range": { "regularPrice": { "gte": "100", "lte": "200" } } });
        assert_eq!(filters_of(&backend.last_request().body), vec![expected]);

        let body: Value = response.json();
        assert_eq!(body["displayFilters"], json!(["Price $$"]));
        assert_eq!(
            body["appliedFilters"],
            "&filter.name=regularPrice&regularPrice.type=range&regularPrice.displayName=Price\
             &regularPrice.key=%24%24&regularPrice.from=100&regularPrice.to=200"
        );
    }

    #[tokio::test]
    async fn test_open_range_filter() {
        let (server, backend) = create_test_server();

        server
            .get(
                "/search/query?filter.name=regularPrice&regularPrice.type=range\
                 &regularPrice.key=%24%24%24%24%24&regularPrice.from=400&regularPrice.to=",
            )
            .await
            .assert_status_ok();

        assert_eq!(
            filters_of(&backend.last_request().body),
            vec![json!({ "range": { "regularPrice": { "gte": "400" } } })]
        );
    }

    #[tokio::test]
    async fn test_terms_filter_with_text_query() {
        let (server, backend) = create_test_server();

        let uri = format!("/search/query?query=ipad&{}", DEPARTMENT_FILTER);
        let response = server.get(&uri).await;

        response.assert_status_ok();
        assert_eq!(
            filters_of(&backend.last_request().body),
            vec![json!({ "term": { "department.keyword": "COMPUTERS" } })]
        );
        let body: Value = response.json();
        assert_eq!(body["displayFilters"], json!(["Department COMPUTERS"]));
    }

    #[tokio::test]
    async fn test_filters_keep_request_order() {
        let (server, backend) = create_test_server();

        let uri = format!("/search/query?{}&{}", DEPARTMENT_FILTER, PRICE_FILTER);
        let response = server.get(&uri).await;

        response.assert_status_ok();
        let filters = filters_of(&backend.last_request().body);
        assert_eq!(filters.len(), 2);
        assert!(filters[0].get("term").is_some());
        assert!(filters[1].get("range").is_some());

        let body: Value = response.json();
        assert_eq!(
            body["displayFilters"],
            json!(["Department COMPUTERS", "Price $$"])
        );
    }

    #[tokio::test]
    async fn test_duplicate_filter_name_is_applied_once() {
        let (server, backend) = create_test_server();

        let uri = format!("/search/query?{}&filter.name=department", DEPARTMENT_FILTER);
        server.get(&uri).await.assert_status_ok();

        assert_eq!(filters_of(&backend.last_request().body).len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_kind_is_dropped_when_lenient() {
        let (server, backend) = create_test_server();

        let uri = format!(
            "/search/query?filter.name=color&color.type=swatch&color.key=red&{}",
            DEPARTMENT_FILTER
        );
        let response = server.get(&uri).await;

        response.assert_status_ok();
        assert_eq!(filters_of(&backend.last_request().body).len(), 1);

        let body: Value = response.json();
        assert_eq!(body["displayFilters"], json!(["Department COMPUTERS"]));
        assert_eq!(body["rejectedFilters"][0]["name"], "color");
        assert!(!body["appliedFilters"].as_str().unwrap().contains("color"));
    }

    #[tokio::test]
    async fn test_unknown_kind_is_rejected_when_strict() {
        let (server, backend) = create_test_server_with_config(ServerConfig {
            filter_policy: FilterPolicy::Strict,
            ..ServerConfig::for_testing()
        });

        let response = server
            .get("/search/query?filter.name=color&color.key=red")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid-filter");
        assert!(backend.requests().is_empty());
    }
}

// =============================================================================
// Facet Link Tests
// =============================================================================

mod facet_links {
    use super::*;

    fn link<'a>(body: &'a Value, group: &str, label: &str) -> &'a str {
        body["facets"]
            .as_array()
            .unwrap()
            .iter()
            .find(|g| g["name"] == group)
            .and_then(|g| g["links"].as_array())
            .and_then(|links| links.iter().find(|l| l["label"] == label))
            .and_then(|l| l["href"].as_str())
            .unwrap()
    }

    #[tokio::test]
    async fn test_facets_are_built_from_buckets() {
        let (server, _backend) = create_test_server();

        let response = server.get("/search/query?query=ipad").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["facets"][0]["displayName"], "Price");
        assert_eq!(body["facets"][0]["links"].as_array().unwrap().len(), 5);
        assert_eq!(body["facets"][1]["links"][1]["label"], "COMPUTERS");
        assert_eq!(body["facets"][1]["links"][1]["count"], 1);
    }

    #[tokio::test]
    async fn test_following_a_link_applies_the_filter() {
        let (server, backend) = create_test_server();

        let response = server.get("/search/query?query=ipad").await;
        let body: Value = response.json();
        let href = link(&body, "department", "ACCESSORIES").to_string();

        let response = server.get(&href).await;

        response.assert_status_ok();
        let request = backend.last_request();
        assert_eq!(
            filters_of(&request.body),
            vec![json!({ "term": { "department.keyword": "ACCESSORIES" } })]
        );
        assert_eq!(text_query_of(&request.body), Some("ipad"));
    }

    #[tokio::test]
    async fn test_links_compose_with_applied_filters() {
        let (server, backend) = create_test_server();

        let uri = format!("/search/query?{}", DEPARTMENT_FILTER);
        let response = server.get(&uri).await;
        let body: Value = response.json();
        let href = link(&body, "regularPrice", "$$$$$").to_string();

        let response = server.get(&href).await;

        response.assert_status_ok();
        assert_eq!(
            filters_of(&backend.last_request().body),
            vec![
                json!({ "range": { "regularPrice": { "gte": "400" } } }),
                json!({ "term": { "department.keyword": "COMPUTERS" } }),
            ]
        );
        let body: Value = response.json();
        assert_eq!(
            body["displayFilters"],
            json!(["Price $$$$$", "Department COMPUTERS"])
        );
    }
}

// =============================================================================
// Form Search Tests
// =============================================================================

mod form_search {
    use super::*;

    #[tokio::test]
    async fn test_post_form_search() {
        let (server, backend) = create_test_server();

        let response = server
            .post("/search/query")
            .form(&[("query", "iphone"), ("sort", "name"), ("sortDir", "asc")])
            .await;

        response.assert_status_ok();
        let request = backend.last_request();
        assert_eq!(text_query_of(&request.body), Some("iphone"));
        assert_eq!(request.body["sort"], json!([{ "name": "asc" }]));
    }

    #[tokio::test]
    async fn test_post_form_repeated_query_takes_first_value() {
        let (server, backend) = create_test_server();

        let response = server
            .post("/search/query")
            .form(&[("query", "first"), ("query", "second"), ("sortDir", "asc")])
            .await;

        response.assert_status_ok();
        let request = backend.last_request();
        assert_eq!(text_query_of(&request.body), Some("first"));
        assert_eq!(request.body["sort"], json!([{ "_score": "asc" }]));

        let body: Value = response.json();
        assert_eq!(body["query"], "first");
    }

    #[tokio::test]
    async fn test_post_and_get_read_repeated_query_alike() {
        let (server, backend) = create_test_server();

        server
            .get("/search/query?query=first&query=second")
            .await
            .assert_status_ok();
        let from_get = backend.last_request().body;

        server
            .post("/search/query")
            .text("query=first&query=second")
            .content_type("application/x-www-form-urlencoded")
            .await
            .assert_status_ok();
        let from_post = backend.last_request().body;

        assert_eq!(from_get, from_post);
    }

    #[tokio::test]
    async fn test_post_form_ignores_filters() {
        let (server, backend) = create_test_server();

        let response = server
            .post("/search/query")
            .form(&[
                ("filter.name", "department"),
                ("department.type", "terms"),
                ("department.key", "COMPUTERS"),
            ])
            .await;

        response.assert_status_ok();
        assert!(filters_of(&backend.last_request().body).is_empty());
        let body: Value = response.json();
        assert_eq!(body["query"], "*");
    }
}

// =============================================================================
// Error and Health Tests
// =============================================================================

mod errors_and_health {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_backend_returns_503() {
        let (server, backend) = create_test_server();
        backend.set_mode(BackendMode::Unavailable);

        let response = server.get("/search/query?query=tv").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "unavailable");
    }

    #[tokio::test]
    async fn test_rejected_query_returns_502() {
        let (server, backend) = create_test_server();
        backend.set_mode(BackendMode::QueryFailed);

        let response = server.get("/search/query?query=tv").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "search-failed");
    }

    #[tokio::test]
    async fn test_health() {
        let (server, _backend) = create_test_server();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend"], "recording");
    }

    #[tokio::test]
    async fn test_liveness() {
        let (server, _backend) = create_test_server();

        server.get("/_liveness").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_readiness_follows_backend() {
        let (server, backend) = create_test_server();

        server.get("/_readiness").await.assert_status_ok();

        backend.set_mode(BackendMode::Unavailable);
        server
            .get("/_readiness")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}
