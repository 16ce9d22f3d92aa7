use crate::adapters::http::ReqwestTransport;
use crate::config::FundingConfig;
use crate::core::client::NfrApiClient;
use crate::core::lookup::LookupService;
use crate::core::search::{
    SearchParams, SearchService, NAME_QUERY_PARAM, OFFSET_QUERY_PARAM, SIZE_QUERY_PARAM,
    TERM_QUERY_PARAM,
};
use crate::domain::ports::HttpTransport;
use crate::utils::error::{ErrorCategory, FundingError, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const IDENTIFIER_PATH_PARAM: &str = "identifier";

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_PROBLEM: &str = "application/problem+json";

/// The subset of an API Gateway proxy event the service reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl GatewayRequest {
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    pub fn search_params(&self) -> SearchParams {
        let owned = |name: &str| self.query_parameter(name).map(str::to_string);
        SearchParams {
            name: owned(NAME_QUERY_PARAM),
            term: owned(TERM_QUERY_PARAM),
            offset: owned(OFFSET_QUERY_PARAM),
            size: owned(SIZE_QUERY_PARAM),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// `application/problem+json` error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl Problem {
    pub fn from_error(error: &FundingError) -> Self {
        let status = error.status_code();
        Self {
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: error.public_detail(),
        }
    }
}

/// Routes API Gateway requests to the lookup or search service.
pub struct FundingGateway<T: HttpTransport> {
    lookup: LookupService<T>,
    search: SearchService<T>,
    allowed_origin: String,
}

impl FundingGateway<ReqwestTransport> {
    pub fn from_config(config: &FundingConfig) -> Result<Self> {
        let transport =
            ReqwestTransport::with_timeout(Duration::from_secs(config.request_timeout_seconds))?;
        Self::new(transport, config)
    }
}

impl<T: HttpTransport + Clone> FundingGateway<T> {
    pub fn new(transport: T, config: &FundingConfig) -> Result<Self> {
        let client = NfrApiClient::new(transport, config.nfr_api_base_url()?);
        Ok(Self {
            lookup: LookupService::new(client.clone(), config),
            search: SearchService::new(client, config),
            allowed_origin: config.allowed_origin.clone(),
        })
    }
}

impl<T: HttpTransport> FundingGateway<T> {
    pub async fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        match request.path_parameter(IDENTIFIER_PATH_PARAM) {
            Some(identifier) => {
                tracing::info!("Fetching NFR funding {}", identifier);
                match self.lookup.resolve(identifier).await {
                    Ok(funding) => self.json_response(StatusCode::OK, &funding),
                    Err(e) => self.error_response(&e),
                }
            }
            None => {
                let params = request.search_params();
                tracing::info!(
                    "Searching NFR fundings (name: {:?}, term: {:?})",
                    params.name,
                    params.term
                );
                match self.search.search_params(&params).await {
                    Ok(page) => self.json_response(StatusCode::OK, &page),
                    Err(e) => self.error_response(&e),
                }
            }
        }
    }

    fn json_response<S: Serialize>(&self, status: StatusCode, value: &S) -> GatewayResponse {
        match serde_json::to_string(value) {
            Ok(body) => self.response(status, CONTENT_TYPE_JSON, body),
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                let problem = Problem {
                    title: "Internal Server Error".to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    detail: "Internal server error".to_string(),
                };
                self.problem_response(&problem)
            }
        }
    }

    fn error_response(&self, error: &FundingError) -> GatewayResponse {
        match error.category() {
            ErrorCategory::Client => tracing::info!("Rejected request: {}", error),
            ErrorCategory::Upstream => tracing::warn!("Upstream failure: {}", error),
            ErrorCategory::Internal => tracing::error!("Request failed: {}", error),
        }
        self.problem_response(&Problem::from_error(error))
    }

    fn problem_response(&self, problem: &Problem) -> GatewayResponse {
        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        // Problem only holds strings and an integer
        let body = serde_json::to_string(problem).unwrap_or_default();
        self.response(status, CONTENT_TYPE_PROBLEM, body)
    }

    fn response(&self, status: StatusCode, content_type: &str, body: String) -> GatewayResponse {
        let headers = HashMap::from([
            ("Content-Type".to_string(), content_type.to_string()),
            (
                "Access-Control-Allow-Origin".to_string(),
                self.allowed_origin.clone(),
            ),
        ]);
        GatewayResponse {
            status_code: status.as_u16(),
            headers,
            body,
            is_base64_encoded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixture_config;
    use crate::core::client::tests::{empty_result, FakeTransport};
    use crate::core::reconcile::tests::funding;

    fn gateway(transport: FakeTransport) -> FundingGateway<FakeTransport> {
        FundingGateway::new(transport, &fixture_config("https://example.org")).unwrap()
    }

    fn lookup_request(identifier: &str) -> GatewayRequest {
        GatewayRequest {
            path_parameters: Some(HashMap::from([(
                IDENTIFIER_PATH_PARAM.to_string(),
                identifier.to_string(),
            )])),
            query_string_parameters: None,
        }
    }

    fn problem(response: &GatewayResponse) -> Problem {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn deserializes_api_gateway_event() {
        let event = serde_json::json!({
            "resource": "/nfr",
            "httpMethod": "GET",
            "pathParameters": null,
            "queryStringParameters": {"term": "ocean", "size": "5"}
        });

        let request: GatewayRequest = serde_json::from_value(event).unwrap();

        assert!(request.path_parameter(IDENTIFIER_PATH_PARAM).is_none());
        let params = request.search_params();
        assert_eq!(params.term.as_deref(), Some("ocean"));
        assert_eq!(params.size.as_deref(), Some("5"));
        assert!(params.offset.is_none());
    }

    #[tokio::test]
    async fn lookup_returns_funding_json() {
        let body = serde_json::json!({
            "totalHits": 1, "from": 0, "size": 10, "hits": [funding(193391, "Jane Doe")]
        });
        let response = gateway(FakeTransport::ok(body))
            .handle(&lookup_request("193391"))
            .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], CONTENT_TYPE_JSON);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(json["type"], "Funding");
        assert_eq!(json["id"], "https://localhost/verified-funding/nfr/193391");
        assert_eq!(json["source"], "https://localhost/cristin/funding-sources/NFR");
    }

    #[tokio::test]
    async fn lookup_not_found_is_problem_404() {
        let response = gateway(FakeTransport::ok(empty_result()))
            .handle(&lookup_request("42"))
            .await;

        assert_eq!(response.status_code, 404);
        assert_eq!(response.headers["Content-Type"], CONTENT_TYPE_PROBLEM);
        let problem = problem(&response);
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.detail, "Funding with identifier 42 not found!");
    }

    #[tokio::test]
    async fn bad_identifier_is_problem_400() {
        let response = gateway(FakeTransport::ok(empty_result()))
            .handle(&lookup_request("abc"))
            .await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            problem(&response).detail,
            "'identifier' path parameter must be an integer"
        );
    }

    #[tokio::test]
    async fn search_without_parameters_is_problem_400() {
        let response = gateway(FakeTransport::ok(empty_result()))
            .handle(&GatewayRequest::default())
            .await;

        assert_eq!(response.status_code, 400);
        assert_eq!(problem(&response).detail, "Missing from query parameters: term");
    }

    #[tokio::test]
    async fn upstream_failures_are_bad_gateway() {
        let rejected = gateway(FakeTransport::status(400, "\"{}\""))
            .handle(&lookup_request("1"))
            .await;
        let unreachable = gateway(FakeTransport::unreachable())
            .handle(&lookup_request("1"))
            .await;

        assert_eq!(rejected.status_code, 502);
        assert_eq!(problem(&rejected).detail, "Unexpected response: 400 - \"{}\"");
        assert_eq!(unreachable.status_code, 502);
        assert_eq!(
            problem(&unreachable).detail,
            "Failed to communicate with NFR rest api!"
        );
    }

    #[tokio::test]
    async fn malformed_upstream_is_opaque_500() {
        let response = gateway(FakeTransport::status(200, "<html>oops</html>"))
            .handle(&lookup_request("1"))
            .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(problem(&response).detail, "Internal server error");
    }
}
