use crate::config::FundingConfig;
use crate::core::client::NfrApiClient;
use crate::core::mapper::FundingMapper;
use crate::core::reconcile::{reconcile, QueryIntent};
use crate::domain::model::Funding;
use crate::domain::ports::HttpTransport;
use crate::utils::error::{FundingError, Result};

const OFFSET_AT_BEGINNING: u32 = 0;
/// The registry ranks fuzzily, so the exact project may not be the top hit.
pub const QUERY_SIZE_FOR_PROJECT_ID_SEARCH: u32 = 10;

const INVALID_IDENTIFIER: &str = "'identifier' path parameter must be an integer";

pub struct LookupService<T: HttpTransport> {
    client: NfrApiClient<T>,
    mapper: FundingMapper,
}

impl<T: HttpTransport> LookupService<T> {
    pub fn new(client: NfrApiClient<T>, config: &FundingConfig) -> Self {
        Self {
            client,
            mapper: FundingMapper::from_config(config),
        }
    }

    /// Resolves the raw `identifier` token. Non-integers are rejected before
    /// any upstream call.
    pub async fn resolve(&self, identifier: &str) -> Result<Funding> {
        let project_id = parse_identifier(identifier)?;
        self.resolve_by_identifier(project_id).await
    }

    pub async fn resolve_by_identifier(&self, project_id: i32) -> Result<Funding> {
        let intent = QueryIntent::ProjectId(project_id);
        let result = self
            .client
            .search(
                &intent.upstream_query(),
                OFFSET_AT_BEGINNING,
                QUERY_SIZE_FOR_PROJECT_ID_SEARCH,
            )
            .await?;

        let candidates = result.hits.len();
        let record = reconcile(&intent, result)
            .hits
            .into_iter()
            .next()
            .ok_or_else(|| {
                tracing::debug!(
                    "No exact match for project {} among {} candidates",
                    project_id,
                    candidates
                );
                funding_not_found(project_id)
            })?;

        Ok(self.mapper.to_domain(record))
    }
}

pub fn parse_identifier(identifier: &str) -> Result<i32> {
    identifier
        .parse::<i32>()
        .map_err(|_| FundingError::invalid_argument(INVALID_IDENTIFIER))
}

fn funding_not_found(project_id: i32) -> FundingError {
    FundingError::not_found(format!("Funding with identifier {} not found!", project_id))
}
