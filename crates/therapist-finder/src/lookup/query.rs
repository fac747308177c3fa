use super::error::LookupError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Raw `?zip=&focus=` parameters as they arrive on the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
}

/// A validated lookup. `focus` is `None` when omitted or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    zip: String,
    focus: Option<String>,
}

fn zip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{5}$").expect("zip pattern compiles"))
}

impl LookupQuery {
    pub fn new(zip: impl Into<String>, focus: Option<String>) -> Result<Self, LookupError> {
        let zip = zip.into();
        if !zip_pattern().is_match(&zip) {
            return Err(LookupError::InvalidInput);
        }

        Ok(Self {
            zip,
            focus: focus.filter(|focus| !focus.is_empty()),
        })
    }

    pub fn from_params(params: LookupParams) -> Result<Self, LookupError> {
        let zip = params.zip.ok_or(LookupError::InvalidInput)?;
        Self::new(zip, params.focus)
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn echo(&self) -> QueryEcho {
        QueryEcho {
            zip: self.zip.clone(),
            focus: self.focus.clone(),
        }
    }
}

/// The `query` block of the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryEcho {
    pub zip: String,
    pub focus: Option<String>,
}
