//! NPI Registry client.
//!
//! Wire types mirror the registry's v2.1 JSON. Every field is optional on the
//! wire and `null` collections are read as empty.

use crate::config::RegistryConfig;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::{debug, warn};
use url::Url;

pub const API_VERSION: &str = "2.1";
pub const COUNTRY_CODE: &str = "US";
/// Individual practitioners only; organizations are `NPI-2`.
pub const INDIVIDUAL_ENUMERATION: &str = "NPI-1";
pub const RESULT_LIMIT: u32 = 100;

/// Address purpose the registry uses for a practice location.
const PRACTICE_LOCATION: &str = "LOCATION";

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to build registry client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("NPI API error: {0}")]
    Status(u16),
    #[error("registry request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid registry payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The registry sends `number` as a JSON number; older payloads used strings.
/// Either form is echoed back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderNumber {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for ProviderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderNumber::Numeric(number) => write!(f, "{number}"),
            ProviderNumber::Text(number) => f.write_str(number),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<RawProviderRecord>,
    /// Query problems come back with a 200 status and this array instead of results.
    #[serde(default, rename = "Errors", deserialize_with = "null_as_default")]
    pub errors: Vec<RegistryMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryMessage {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProviderRecord {
    #[serde(default)]
    pub number: Option<ProviderNumber>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basic: RawBasic,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<RawAddress>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub taxonomies: Vec<RawTaxonomy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBasic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub credential: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub address_purpose: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub telephone_number: Option<String>,
}

impl RawAddress {
    pub fn is_practice_location(&self) -> bool {
        self.address_purpose.as_deref() == Some(PRACTICE_LOCATION)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTaxonomy {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One registry search: individual providers in a single US postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySearch {
    pub postal_code: String,
}

impl RegistrySearch {
    pub fn new(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
        }
    }

    pub fn query_pairs(&self) -> [(&'static str, String); 5] {
        [
            ("version", API_VERSION.to_string()),
            ("postal_code", self.postal_code.clone()),
            ("country_code", COUNTRY_CODE.to_string()),
            ("enumeration_type", INDIVIDUAL_ENUMERATION.to_string()),
            ("limit", RESULT_LIMIT.to_string()),
        ]
    }
}

/// Source of raw provider records.
#[async_trait]
pub trait ProviderRegistry: Send + Sync {
    async fn search(&self, search: &RegistrySearch) -> Result<RegistryResponse, RegistryError>;
}

/// [`ProviderRegistry`] backed by the public NPI Registry HTTP API.
#[derive(Debug, Clone)]
pub struct NpiRegistryClient {
    http: Client,
    base_url: Url,
}

impl NpiRegistryClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RegistryError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn request_url(&self, search: &RegistrySearch) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in search.query_pairs() {
                pairs.append_pair(key, &value);
            }
        }
        url
    }
}

#[async_trait]
impl ProviderRegistry for NpiRegistryClient {
    async fn search(&self, search: &RegistrySearch) -> Result<RegistryResponse, RegistryError> {
        let url = self.request_url(search);
        debug!(postal_code = %search.postal_code, "querying NPI registry");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(RegistryError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(RegistryError::Transport)?;
        let payload: RegistryResponse =
            serde_json::from_slice(&body).map_err(RegistryError::Decode)?;

        for message in &payload.errors {
            warn!(
                postal_code = %search.postal_code,
                field = message.field.as_deref().unwrap_or("-"),
                description = message.description.as_deref().unwrap_or("-"),
                "NPI registry rejected query"
            );
        }

        Ok(payload)
    }
}
