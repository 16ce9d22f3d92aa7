pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::gateway::{FundingGateway, GatewayRequest, GatewayResponse, Problem};
pub use adapters::http::ReqwestTransport;
pub use config::FundingConfig;
pub use crate::core::{
    client::NfrApiClient,
    lookup::LookupService,
    search::{SearchMode, SearchParams, SearchQuery, SearchService},
};
pub use domain::model::{Funding, PagedSearchResult};
pub use utils::error::{FundingError, Result};
