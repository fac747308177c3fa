use super::error::LookupError;
use super::normalize::normalize_record;
use super::query::{LookupParams, LookupQuery, QueryEcho};
use super::scoring::{rank, ScoredProvider};
use crate::registry::{ProviderRegistry, RegistrySearch};
use axum::http::Method;
use serde::Serialize;
use tracing::info;

/// Body of a successful lookup.
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub query: QueryEcho,
    pub count: usize,
    pub results: Vec<ScoredProvider>,
}

/// Stateless lookup pipeline over a [`ProviderRegistry`].
pub struct TherapistLookupService<R> {
    registry: R,
}

impl<R> TherapistLookupService<R>
where
    R: ProviderRegistry,
{
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Full request handling: method gate, parameter validation, then [`Self::lookup`].
    pub async fn handle(
        &self,
        method: &Method,
        params: LookupParams,
    ) -> Result<LookupResponse, LookupError> {
        if *method != Method::GET {
            return Err(LookupError::MethodNotAllowed);
        }

        let query = LookupQuery::from_params(params)?;
        self.lookup(&query).await
    }

    pub async fn lookup(&self, query: &LookupQuery) -> Result<LookupResponse, LookupError> {
        let payload = self
            .registry
            .search(&RegistrySearch::new(query.zip()))
            .await?;

        let fetched = payload.results.len();
        let providers = payload
            .results
            .into_iter()
            .filter_map(normalize_record)
            .collect::<Vec<_>>();
        let results = rank(providers, query.focus());

        info!(
            zip = query.zip(),
            focus = query.focus().unwrap_or(""),
            fetched,
            matched = results.len(),
            "therapist lookup complete"
        );

        Ok(LookupResponse {
            query: query.echo(),
            count: results.len(),
            results,
        })
    }
}
