mod error;
mod normalize;
mod query;
mod router;
mod scoring;
mod service;
pub mod taxonomy;

pub use error::LookupError;
pub use normalize::{normalize_record, NormalizedProvider, TaxonomyEntry};
pub use query::{LookupParams, LookupQuery, QueryEcho};
pub use router::{lookup_router, THERAPISTS_PATH};
pub use scoring::{rank, relevance_score, ScoredProvider};
pub use service::{LookupResponse, TherapistLookupService};

#[cfg(test)]
pub(crate) mod tests {
    use crate::registry::{
        ProviderNumber, ProviderRegistry, RawAddress, RawBasic, RawProviderRecord, RawTaxonomy,
        RegistryError, RegistryResponse, RegistrySearch,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory registry that records every search it receives.
    pub(crate) struct StubRegistry {
        outcome: Mutex<Option<Result<Vec<RawProviderRecord>, RegistryError>>>,
        searches: Mutex<Vec<RegistrySearch>>,
    }

    impl StubRegistry {
        pub(crate) fn with_records(records: Vec<RawProviderRecord>) -> Self {
            Self {
                outcome: Mutex::new(Some(Ok(records))),
                searches: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(error: RegistryError) -> Self {
            Self {
                outcome: Mutex::new(Some(Err(error))),
                searches: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.searches.lock().expect("stub mutex poisoned").len()
        }

        pub(crate) fn searches(&self) -> Vec<RegistrySearch> {
            self.searches.lock().expect("stub mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl ProviderRegistry for StubRegistry {
        async fn search(
            &self,
            search: &RegistrySearch,
        ) -> Result<RegistryResponse, RegistryError> {
            self.searches
                .lock()
                .expect("stub mutex poisoned")
                .push(search.clone());

            let outcome = self
                .outcome
                .lock()
                .expect("stub mutex poisoned")
                .take()
                .expect("stub registry queried once");

            outcome.map(|results| RegistryResponse {
                results,
                errors: Vec::new(),
            })
        }
    }

    pub(crate) fn record(
        number: u64,
        name: &str,
        taxonomies: &[(&str, &str)],
    ) -> RawProviderRecord {
        RawProviderRecord {
            number: Some(ProviderNumber::Numeric(number)),
            basic: RawBasic {
                name: Some(name.to_string()),
                ..RawBasic::default()
            },
            addresses: vec![RawAddress {
                address_purpose: Some("LOCATION".to_string()),
                city: Some("SPRINGFIELD".to_string()),
                state: Some("IL".to_string()),
                postal_code: Some("627011234".to_string()),
                telephone_number: Some("217-555-0142".to_string()),
            }],
            taxonomies: taxonomies
                .iter()
                .map(|(code, desc)| RawTaxonomy {
                    code: Some(code.to_string()),
                    desc: Some(desc.to_string()),
                })
                .collect(),
        }
    }
}
