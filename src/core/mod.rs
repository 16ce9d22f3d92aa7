pub mod client;
pub mod lookup;
pub mod mapper;
pub mod reconcile;
pub mod search;

pub use crate::domain::model::{Funding, NfrFunding, NfrFundingSearchResult, PagedSearchResult};
pub use crate::domain::ports::{HttpResponse, HttpTransport, TransportError};
pub use crate::utils::error::Result;
