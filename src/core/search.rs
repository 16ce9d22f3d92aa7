use crate::config::FundingConfig;
use crate::core::client::NfrApiClient;
use crate::core::mapper::FundingMapper;
use crate::core::reconcile::{reconcile, QueryIntent};
use crate::domain::model::{Funding, PagedSearchResult, FUNDING_CONTEXT_URI};
use crate::domain::ports::HttpTransport;
use crate::utils::error::{FundingError, Result};
use url::Url;

pub const NAME_QUERY_PARAM: &str = "name";
pub const TERM_QUERY_PARAM: &str = "term";
pub const OFFSET_QUERY_PARAM: &str = "offset";
pub const SIZE_QUERY_PARAM: &str = "size";
pub const DEFAULT_OFFSET: &str = "0";
pub const DEFAULT_SIZE: &str = "10";
const MINIMUM_SIZE: i32 = 1;

const ILLEGAL_OFFSET: &str = "Offset must be a zero or positive integer!";
const ILLEGAL_SIZE: &str = "Size must be a positive integer!";

/// Search parameters exactly as the caller supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub name: Option<String>,
    pub term: Option<String>,
    pub offset: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    ExactLeadName,
    FreeTerm,
}

impl SearchMode {
    fn query_param(self) -> &'static str {
        match self {
            Self::ExactLeadName => NAME_QUERY_PARAM,
            Self::FreeTerm => TERM_QUERY_PARAM,
        }
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub mode: SearchMode,
    pub value: String,
    pub offset: u32,
    pub size: u32,
}

impl SearchQuery {
    /// Paging is checked first, then the mode. A `name` wins over `term`,
    /// which is then ignored entirely.
    pub fn parse(params: &SearchParams) -> Result<Self> {
        let offset = parse_offset(params.offset.as_deref().unwrap_or(DEFAULT_OFFSET))?;
        let size = parse_size(params.size.as_deref().unwrap_or(DEFAULT_SIZE))?;

        let (mode, value) = match (&params.name, &params.term) {
            (Some(name), _) => (SearchMode::ExactLeadName, name.clone()),
            (None, Some(term)) => (SearchMode::FreeTerm, term.clone()),
            (None, None) => {
                return Err(FundingError::invalid_argument(format!(
                    "Missing from query parameters: {}",
                    TERM_QUERY_PARAM
                )))
            }
        };

        Ok(Self {
            mode,
            value,
            offset,
            size,
        })
    }

    fn intent(&self) -> QueryIntent {
        match self.mode {
            SearchMode::ExactLeadName => QueryIntent::ExactLeadName(self.value.clone()),
            SearchMode::FreeTerm => QueryIntent::FreeTerm(self.value.clone()),
        }
    }
}

fn parse_offset(raw: &str) -> Result<u32> {
    match raw.parse::<i32>() {
        Ok(offset) if offset >= 0 => Ok(offset as u32),
        _ => Err(FundingError::invalid_argument(ILLEGAL_OFFSET)),
    }
}

fn parse_size(raw: &str) -> Result<u32> {
    match raw.parse::<i32>() {
        Ok(size) if size >= MINIMUM_SIZE => Ok(size as u32),
        _ => Err(FundingError::invalid_argument(ILLEGAL_SIZE)),
    }
}

pub struct SearchService<T: HttpTransport> {
    client: NfrApiClient<T>,
    mapper: FundingMapper,
}

impl<T: HttpTransport> SearchService<T> {
    pub fn new(client: NfrApiClient<T>, config: &FundingConfig) -> Self {
        Self {
            client,
            mapper: FundingMapper::from_config(config),
        }
    }

    pub async fn search_params(&self, params: &SearchParams) -> Result<PagedSearchResult<Funding>> {
        let query = SearchQuery::parse(params)?;
        self.search(&query).await
    }

    /// One upstream window, filtered locally. An exact-name search never
    /// backfills rejected slots from a further page, so it may come back with
    /// fewer than `size` hits while more exact matches exist upstream.
    pub async fn search(&self, query: &SearchQuery) -> Result<PagedSearchResult<Funding>> {
        let intent = query.intent();
        let result = self
            .client
            .search(&intent.upstream_query(), query.offset, query.size)
            .await?;

        let reconciled = reconcile(&intent, result);
        let hits: Vec<Funding> = reconciled
            .hits
            .into_iter()
            .map(|record| self.mapper.to_domain(record))
            .collect();

        let base_uri = self.mapper.listing_uri();
        let total_hits = reconciled.total_hits;

        Ok(PagedSearchResult {
            context: FUNDING_CONTEXT_URI.to_string(),
            next_results: next_offset(query, total_hits)
                .and_then(|offset| page_link(&base_uri, query, offset)),
            previous_results: previous_offset(query)
                .and_then(|offset| page_link(&base_uri, query, offset)),
            base_uri,
            offset: query.offset,
            size: query.size,
            total_hits,
            hits,
        })
    }
}

fn next_offset(query: &SearchQuery, total_hits: u64) -> Option<u64> {
    let next = u64::from(query.offset) + u64::from(query.size);
    (next < total_hits).then_some(next)
}

fn previous_offset(query: &SearchQuery) -> Option<u64> {
    (query.offset > 0).then(|| u64::from(query.offset.saturating_sub(query.size)))
}

fn page_link(base_uri: &str, query: &SearchQuery, offset: u64) -> Option<String> {
    let mut uri = Url::parse(base_uri).ok()?;
    uri.query_pairs_mut()
        .append_pair(query.mode.query_param(), &query.value)
        .append_pair(OFFSET_QUERY_PARAM, &offset.to_string())
        .append_pair(SIZE_QUERY_PARAM, &query.size.to_string());
    Some(uri.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixture_config;
    use crate::core::client::tests::FakeTransport;
    use crate::core::reconcile::tests::funding;
    use crate::domain::model::NfrFunding;

    fn service(transport: FakeTransport) -> SearchService<FakeTransport> {
        let config = fixture_config("https://example.org");
        let client = NfrApiClient::new(transport, Url::parse(&config.nfr_api_base_uri).unwrap());
        SearchService::new(client, &config)
    }

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        };
        SearchParams {
            name: get(NAME_QUERY_PARAM),
            term: get(TERM_QUERY_PARAM),
            offset: get(OFFSET_QUERY_PARAM),
            size: get(SIZE_QUERY_PARAM),
        }
    }

    fn body(total_hits: u64, from: u32, size: u32, hits: &[NfrFunding]) -> serde_json::Value {
        serde_json::json!({"totalHits": total_hits, "from": from, "size": size, "hits": hits})
    }

    #[test]
    fn defaults_offset_and_size() {
        let query = SearchQuery::parse(&params(&[("term", "ocean")])).unwrap();

        assert_eq!(query.offset, 0);
        assert_eq!(query.size, 10);
        assert_eq!(query.mode, SearchMode::FreeTerm);
    }

    #[test]
    fn name_takes_precedence_over_term() {
        let query = SearchQuery::parse(&params(&[("name", "Jane Doe"), ("term", "abc")])).unwrap();

        assert_eq!(query.mode, SearchMode::ExactLeadName);
        assert_eq!(query.value, "Jane Doe");
    }

    #[test]
    fn rejects_bad_sizes() {
        for size in ["0", "-10", "1a1b1c", "111111111111111111111111", ""] {
            let error = SearchQuery::parse(&params(&[("term", "x"), ("size", size)])).unwrap_err();
            assert_eq!(error.to_string(), ILLEGAL_SIZE, "size {:?}", size);
        }
    }

    #[test]
    fn rejects_bad_offsets() {
        for offset in ["-1", "-10", "1a1b1c", "111111111111111111111111"] {
            let error =
                SearchQuery::parse(&params(&[("term", "x"), ("offset", offset)])).unwrap_err();
            assert_eq!(error.to_string(), ILLEGAL_OFFSET, "offset {:?}", offset);
        }
    }

    #[test]
    fn offset_is_checked_before_size_and_mode() {
        let error = SearchQuery::parse(&params(&[("offset", "-1"), ("size", "0")])).unwrap_err();
        assert_eq!(error.to_string(), ILLEGAL_OFFSET);
    }

    #[test]
    fn missing_mode_names_the_term_parameter() {
        let error = SearchQuery::parse(&params(&[("offset", "0"), ("size", "10")])).unwrap_err();

        assert!(matches!(error, FundingError::InvalidArgument { .. }));
        assert_eq!(error.to_string(), "Missing from query parameters: term");
    }

    #[tokio::test]
    async fn exact_name_reports_filtered_count() {
        let hits = [
            funding(1, "Jane Doe"),
            funding(2, "Jane Dobbs"),
            funding(3, "jane doe"),
            funding(4, "Doe Jane"),
        ];
        let transport = FakeTransport::ok(body(4, 0, 10, &hits));
        let service = service(transport.clone());

        let page = service
            .search_params(&params(&[("name", "Jane Doe"), ("term", "abc")]))
            .await
            .unwrap();

        assert_eq!(page.total_hits, 2);
        let identifiers: Vec<&str> = page.hits.iter().map(|h| h.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["1", "3"]);
        assert_eq!(page.base_uri, "https://localhost/verified-funding/nfr");
        assert!(page.next_results.is_none());

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.query(), Some("query=Jane+Doe&from=0&size=10"));
    }

    #[tokio::test]
    async fn free_term_keeps_upstream_order_and_total() {
        let hits = [funding(9, "A"), funding(3, "B"), funding(6, "C")];
        let service = service(FakeTransport::ok(body(250, 20, 3, &hits)));

        let page = service
            .search_params(&params(&[("term", "ocean"), ("offset", "20"), ("size", "3")]))
            .await
            .unwrap();

        assert_eq!(page.total_hits, 250);
        assert_eq!(page.offset, 20);
        assert_eq!(page.size, 3);
        let identifiers: Vec<&str> = page.hits.iter().map(|h| h.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["9", "3", "6"]);
        assert_eq!(
            page.next_results.as_deref(),
            Some("https://localhost/verified-funding/nfr?term=ocean&offset=23&size=3")
        );
        assert_eq!(
            page.previous_results.as_deref(),
            Some("https://localhost/verified-funding/nfr?term=ocean&offset=17&size=3")
        );
    }

    #[tokio::test]
    async fn invalid_paging_makes_no_upstream_call() {
        let transport = FakeTransport::ok(body(0, 0, 10, &[]));
        let service = service(transport.clone());

        let result = service
            .search_params(&params(&[("term", "x"), ("size", "0")]))
            .await;

        assert!(result.is_err());
        assert_eq!(transport.request_count().await, 0);
    }

    #[tokio::test]
    async fn upstream_unreachable_propagates() {
        let error = service(FakeTransport::unreachable())
            .search_params(&params(&[("term", "x")]))
            .await
            .unwrap_err();

        assert!(matches!(error, FundingError::UpstreamUnreachable));
    }
}
