use crate::config::FundingConfig;
use crate::domain::model::{Funding, FundingType, NfrFunding, LANGUAGE_EN, LANGUAGE_NB};
use std::collections::BTreeMap;

const TITLE_METADATA_KEY: &str = "title";
const NFR_SOURCE: &str = "NFR";
const NFR_PATH_SEGMENT: &str = "nfr";

/// Maps upstream records into the public `Funding` schema under the API's own
/// URI namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingMapper {
    api_domain: String,
    api_base_path: String,
    funding_source_path: String,
}

impl FundingMapper {
    pub fn new(api_domain: &str, api_base_path: &str, funding_source_path: &str) -> Self {
        Self {
            api_domain: api_domain.to_string(),
            api_base_path: api_base_path.to_string(),
            funding_source_path: funding_source_path.to_string(),
        }
    }

    pub fn from_config(config: &FundingConfig) -> Self {
        let funding_source_path = format!(
            "{}/{}",
            config.cristin_base_path.trim_matches('/'),
            config.cristin_funding_sources_path.trim_matches('/')
        );
        Self::new(
            &config.api_domain,
            &config.custom_domain_name_path,
            &funding_source_path,
        )
    }

    /// `https://{domain}/{basePath}/nfr`
    pub fn listing_uri(&self) -> String {
        https_uri(&self.api_domain, &[&self.api_base_path, NFR_PATH_SEGMENT])
    }

    /// `https://{domain}/{fundingSourcePath}/NFR`
    pub fn source_uri(&self) -> String {
        https_uri(&self.api_domain, &[&self.funding_source_path, NFR_SOURCE])
    }

    pub fn funding_uri(&self, identifier: &str) -> String {
        https_uri(
            &self.api_domain,
            &[&self.api_base_path, NFR_PATH_SEGMENT, identifier],
        )
    }

    pub fn to_domain(&self, record: NfrFunding) -> Funding {
        let identifier = record.project_id.to_string();

        let mut labels = BTreeMap::new();
        if let Some(title) = record.english_metadata.get(TITLE_METADATA_KEY) {
            labels.insert(LANGUAGE_EN.to_string(), title.clone());
        }
        if let Some(title) = record.norwegian_metadata.get(TITLE_METADATA_KEY) {
            labels.insert(LANGUAGE_NB.to_string(), title.clone());
        }

        Funding {
            kind: FundingType::Funding,
            source: self.source_uri(),
            id: self.funding_uri(&identifier),
            identifier,
            labels,
            lead: record.lead_name,
            active_from: record.active_from,
            active_to: record.active_to,
        }
    }
}

fn https_uri(domain: &str, segments: &[&str]) -> String {
    let mut uri = format!("https://{}", domain.trim_end_matches('/'));
    for segment in segments {
        let segment = segment.trim_matches('/');
        if !segment.is_empty() {
            uri.push('/');
            uri.push_str(segment);
        }
    }
    uri
}
