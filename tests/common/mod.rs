#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use nfr_funding::{FundingConfig, NfrApiClient, ReqwestTransport};
use serde_json::{json, Value};
use std::time::Duration;

pub fn test_config(nfr_api_base_uri: &str) -> FundingConfig {
    FundingConfig {
        nfr_api_base_uri: nfr_api_base_uri.to_string(),
        api_domain: "localhost".to_string(),
        custom_domain_name_path: "verified-funding".to_string(),
        cristin_base_path: "cristin".to_string(),
        cristin_funding_sources_path: "funding-sources".to_string(),
        allowed_origin: "*".to_string(),
        request_timeout_seconds: 5,
    }
}

pub fn client(config: &FundingConfig) -> NfrApiClient<ReqwestTransport> {
    let transport = ReqwestTransport::with_timeout(Duration::from_secs(5)).unwrap();
    NfrApiClient::new(transport, config.nfr_api_base_url().unwrap())
}

/// 產生一筆 NFR 專案資料
pub fn nfr_funding(project_id: i32, lead_name: &str) -> Value {
    json!({
        "projectId": project_id,
        "activeFrom": "2018-01-01T00:00:00Z",
        "activeTo": "2022-12-31T23:59:59Z",
        "leadName": lead_name,
        "english": {"title": format!("Project {}", project_id)},
        "norwegian": {"title": format!("Prosjekt {}", project_id)}
    })
}

pub fn search_result(total_hits: u64, from: u32, size: u32, hits: Vec<Value>) -> Value {
    json!({"totalHits": total_hits, "from": from, "size": size, "hits": hits})
}

/// Stubs `GET /search?query=..&from=..&size=..` on the mock registry.
pub async fn stub_search<'a>(
    server: &'a MockServer,
    query: &str,
    from: u32,
    size: u32,
    body: Value,
) -> Mock<'a> {
    let from = from.to_string();
    let size = size.to_string();
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("query", query)
                .query_param("from", from.as_str())
                .query_param("size", size.as_str());
            then.status(200)
                .header("Content-Type", "application/json;charset=utf-8")
                .json_body(body);
        })
        .await
}
