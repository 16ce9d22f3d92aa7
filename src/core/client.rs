use crate::domain::model::NfrFundingSearchResult;
use crate::domain::ports::HttpTransport;
use crate::utils::error::{FundingError, Result, UPSTREAM_UNREACHABLE_MESSAGE};
use url::Url;

const SEARCH_PATH_SEGMENT: &str = "search";

/// Client for the NFR project bank search endpoint.
///
/// One call is one upstream GET; nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct NfrApiClient<T: HttpTransport> {
    transport: T,
    base_uri: Url,
}

impl<T: HttpTransport> NfrApiClient<T> {
    pub fn new(transport: T, base_uri: Url) -> Self {
        Self {
            transport,
            base_uri,
        }
    }

    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// `GET {base}/search?query=..&from=..&size=..`
    pub fn search_uri(&self, query: &str, offset: u32, size: u32) -> Result<Url> {
        let mut uri = self.base_uri.clone();
        uri.path_segments_mut()
            .map_err(|_| FundingError::ConfigError {
                message: format!("NFR api base URI cannot be a base: {}", self.base_uri),
            })?
            .pop_if_empty()
            .push(SEARCH_PATH_SEGMENT);

        uri.query_pairs_mut()
            .clear()
            .append_pair("query", query)
            .append_pair("from", &offset.to_string())
            .append_pair("size", &size.to_string());

        Ok(uri)
    }

    pub async fn search(
        &self,
        query: &str,
        offset: u32,
        size: u32,
    ) -> Result<NfrFundingSearchResult> {
        let uri = self.search_uri(query, offset, size)?;

        let response = self.transport.get(&uri).await.map_err(|e| {
            tracing::error!("{}: {}", UPSTREAM_UNREACHABLE_MESSAGE, e);
            FundingError::UpstreamUnreachable
        })?;

        if response.status != 200 {
            tracing::warn!(
                "NFR api rejected search (status {}): {}",
                response.status,
                response.body
            );
            return Err(FundingError::UpstreamRejected {
                status: response.status,
                body: response.body,
            });
        }

        let result: NfrFundingSearchResult =
            serde_json::from_str(&response.body).map_err(|e| {
                tracing::error!("NFR api returned an unparseable search result: {}", e);
                FundingError::MalformedUpstreamResponse(e)
            })?;

        tracing::debug!(
            "NFR search returned {} hits of {} total",
            result.hits.len(),
            result.total_hits
        );
        Ok(result)
    }
}
