//! Cursor and page-number pagination through the HTTP client

mod common;

use common::{client_for, config_for};
use serde_json::json;
use std::sync::Arc;
use threat_intel::query::{IocQuery, IocThreatType, ThreatActorQuery};
use threat_intel::{
    CursorPaginator, ErrorCode, PageNumber, PageNumberPaginator, ThreatIntelService, ToolRegistry,
};
use wiremock::{
    matchers::{method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

async fn mount_actor_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/merlin/threat/actor"))
        .and(query_param("name", "Lock"))
        .and(query_param_is_missing("next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"uuid": "TA-1"}, {"uuid": "TA-2"}],
            "next": "cursor-2"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/merlin/threat/actor"))
        .and(query_param("name", "Lock"))
        .and(query_param("next", "cursor-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"uuid": "TA-3"}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_cursor_pagination_replays_filters() {
    let server = MockServer::start().await;
    mount_actor_pages(&server).await;

    let client = client_for(&server);
    let filters = ThreatActorQuery {
        name: Some("Lock".to_string()),
        ..ThreatActorQuery::default()
    };
    let mut paginator = CursorPaginator::new(&client, filters);

    let first = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(first.data.len(), 2);
    assert_eq!(first.next.as_ref().map(|c| c.as_str()), Some("cursor-2"));
    assert!(!paginator.is_exhausted());

    let second = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(second.data, vec![json!({"uuid": "TA-3"})]);
    assert!(second.next.is_none());
    assert!(paginator.is_exhausted());

    assert!(paginator.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_collect_items_across_pages() {
    let server = MockServer::start().await;
    mount_actor_pages(&server).await;

    let client = client_for(&server);
    let filters = ThreatActorQuery {
        name: Some("Lock".to_string()),
        ..ThreatActorQuery::default()
    };
    let items = CursorPaginator::new(&client, filters)
        .collect_items(10)
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
}

#[tokio::test]
async fn test_page_number_pagination_stops_on_empty_page() {
    let server = MockServer::start().await;
    for (page, data) in [
        ("1", json!([{"ioc": "1.1.1.1"}])),
        ("2", json!([{"ioc": "2.2.2.2"}])),
        ("3", json!([])),
    ] {
        Mock::given(method("GET"))
            .and(path("/merlin/ioc"))
            .and(query_param("page", page))
            .and(query_param("threatType", "botnet_cc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "IOCs fetched successfully",
                "data": data
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let filters = IocQuery {
        threat_type: Some(IocThreatType::BotnetCc),
        ..IocQuery::default()
    };
    let mut paginator = PageNumberPaginator::new(&client, filters);

    let mut pages = Vec::new();
    while let Some(page) = paginator.next_page().await.unwrap() {
        pages.push(page);
    }

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].page, PageNumber::FIRST);
    assert_eq!(pages[1].data, vec![json!({"ioc": "2.2.2.2"})]);
    assert!(pages[2].data.is_empty());
    assert!(paginator.is_exhausted());
}

#[tokio::test]
async fn test_failed_page_keeps_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/merlin/ioc"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/merlin/ioc"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "data": [{"ioc": "1.1.1.1"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut paginator = PageNumberPaginator::new(&client, IocQuery::default());

    let error = paginator.next_page().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::RateLimited);
    assert_eq!(paginator.page(), PageNumber::FIRST);

    let page = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(page.page, PageNumber::FIRST);
    assert_eq!(paginator.page().get(), 2);
}

#[tokio::test]
async fn test_next_page_tool_end_to_end() {
    let server = MockServer::start().await;
    mount_actor_pages(&server).await;

    let config = config_for(&server);
    let client = threat_intel::IntelClient::new(&config).unwrap();
    let registry = ToolRegistry::new(ThreatIntelService::new(client, Arc::new(config)));

    let first = registry
        .call("search_threat_actors_by_name", json!({"name": "Lock"}))
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&first.to_display_string()).unwrap();
    assert_eq!(body["next"], "cursor-2");

    let second = registry
        .call(
            "get_next_threat_actor_page",
            json!({"nextToken": body["next"], "name": "Lock"}),
        )
        .await
        .unwrap();
    assert!(!second.is_error);
    let body: serde_json::Value = serde_json::from_str(&second.to_display_string()).unwrap();
    assert_eq!(body["data"][0]["uuid"], "TA-3");
    assert!(body.get("next").is_none());
}
