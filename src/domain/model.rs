use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LANGUAGE_EN: &str = "en";
pub const LANGUAGE_NB: &str = "nb";

pub const FUNDING_CONTEXT_URI: &str = "https://bibsysdev.github.io/src/funding-context.json";

/// A single project as returned by the NFR project bank search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfrFunding {
    pub project_id: i32,
    pub active_from: DateTime<Utc>,
    pub active_to: DateTime<Utc>,
    #[serde(default)]
    pub lead_name: Option<String>,
    #[serde(rename = "english", default)]
    pub english_metadata: BTreeMap<String, String>,
    #[serde(rename = "norwegian", default)]
    pub norwegian_metadata: BTreeMap<String, String>,
}

/// One page of upstream search results. `total_hits` counts everything the
/// registry considered a match, fuzzy candidates included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfrFundingSearchResult {
    pub total_hits: u64,
    pub from: u32,
    pub size: u32,
    #[serde(default)]
    pub hits: Vec<NfrFunding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FundingType {
    #[default]
    Funding,
}

/// Public representation of a verified funding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funding {
    #[serde(rename = "type", default)]
    pub kind: FundingType,
    pub source: String,
    pub id: String,
    pub identifier: String,
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lead: Option<String>,
    pub active_from: DateTime<Utc>,
    pub active_to: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedSearchResult<T> {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "id")]
    pub base_uri: String,
    pub offset: u32,
    pub size: u32,
    pub total_hits: u64,
    pub hits: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next_results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub previous_results: Option<String>,
}
