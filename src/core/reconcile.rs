//! Turning the registry's ranked, fuzzy search results into the answer the
//! caller actually asked for.
//!
//! The registry has no exact-key or exact-name query mode, so every request
//! fetches one window of candidates and filters it locally. The filter's pass
//! rate is unrelated to the window size.

use crate::domain::model::{NfrFunding, NfrFundingSearchResult};

/// What the caller meant by the query string sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryIntent {
    ProjectId(i32),
    ExactLeadName(String),
    FreeTerm(String),
}

impl QueryIntent {
    /// The string sent as `query` to the registry.
    pub fn upstream_query(&self) -> String {
        match self {
            Self::ProjectId(project_id) => project_id.to_string(),
            Self::ExactLeadName(name) => name.clone(),
            Self::FreeTerm(term) => term.clone(),
        }
    }
}

/// Admissible records in upstream order, with the total to report.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub total_hits: u64,
    pub hits: Vec<NfrFunding>,
}

pub fn reconcile(intent: &QueryIntent, result: NfrFundingSearchResult) -> Reconciled {
    match intent {
        QueryIntent::ProjectId(project_id) => {
            let hits: Vec<NfrFunding> = select_project(result.hits, *project_id)
                .into_iter()
                .collect();
            Reconciled {
                total_hits: hits.len() as u64,
                hits,
            }
        }
        QueryIntent::ExactLeadName(name) => {
            let candidates = result.hits.len();
            let hits = retain_lead_name(result.hits, name);
            tracing::debug!(
                "Lead name filter kept {} of {} candidates (upstream total {})",
                hits.len(),
                candidates,
                result.total_hits
            );
            // Upstream's total counts fuzzy matches we just rejected
            Reconciled {
                total_hits: hits.len() as u64,
                hits,
            }
        }
        QueryIntent::FreeTerm(_) => Reconciled {
            total_hits: result.total_hits,
            hits: result.hits,
        },
    }
}

/// First hit whose project id equals `project_id`, regardless of rank.
pub fn select_project(hits: Vec<NfrFunding>, project_id: i32) -> Option<NfrFunding> {
    hits.into_iter().find(|hit| hit.project_id == project_id)
}

pub fn retain_lead_name(hits: Vec<NfrFunding>, name: &str) -> Vec<NfrFunding> {
    let wanted = name.to_lowercase();
    hits.into_iter()
        .filter(|hit| {
            hit.lead_name
                .as_deref()
                .is_some_and(|lead| lead.to_lowercase() == wanted)
        })
        .collect()
}
