use std::borrow::Cow;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::MediGuardError;

pub(crate) const OPENFDA_BASE: &str = "https://api.fda.gov";
pub(crate) const OPENFDA_BASE_ENV: &str = "MEDIGUARD_OPENFDA_BASE";
const OPENFDA_API: &str = "openfda";

pub struct OpenFdaClient {
    client: reqwest::Client,
    base: Cow<'static, str>,
    api_key: Option<String>,
}

impl OpenFdaClient {
    pub fn new() -> Result<Self, MediGuardError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: crate::sources::env_base(OPENFDA_BASE, OPENFDA_BASE_ENV),
            api_key: crate::sources::openfda_api_key(),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(base: String, api_key: Option<String>) -> Result<Self, MediGuardError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: Cow::Owned(base),
            api_key: api_key
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Escapes Lucene special characters so user text stays inside its quoted phrase.
    pub(crate) fn escape_query_value(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '\\' | '+' | '-' | '!' | '(' | ')' | '{' | '}' | '[' | ']' | '^' | '"' | '~'
                | '*' | '?' | ':' | '/' | '&' | '|' => {
                    out.push('\\');
                    out.push(ch);
                }
                _ => out.push(ch),
            }
        }
        out
    }

    async fn get_json_optional<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<Option<T>, MediGuardError> {
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = crate::sources::read_limited_body(resp, OPENFDA_API).await?;

        // openFDA answers "no matches" with 404.
        if status.as_u16() == 404 {
            return Ok(None);
        }

        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            return Err(MediGuardError::Api {
                api: OPENFDA_API.to_string(),
                message: format!("HTTP {status}: {excerpt}"),
            });
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| MediGuardError::ApiJson {
                api: OPENFDA_API.to_string(),
                source,
            })
    }

    /// Searches drug labels by brand or generic name.
    ///
    /// `api_key` overrides the key configured through `OPENFDA_API_KEY`.
    pub async fn label_search(
        &self,
        drug_name: &str,
        api_key: Option<&str>,
    ) -> Result<Option<OpenFdaResponse<OpenFdaLabel>>, MediGuardError> {
        let drug_name = drug_name.trim();
        if drug_name.is_empty() {
            return Err(MediGuardError::InvalidArgument(
                "Drug name is required".into(),
            ));
        }
        if drug_name.len() > 256 {
            return Err(MediGuardError::InvalidArgument(
                "Drug name is too long.".into(),
            ));
        }

        let escaped = Self::escape_query_value(drug_name);
        let q = format!("openfda.brand_name:\"{escaped}\" OR openfda.generic_name:\"{escaped}\"");

        let url = self.endpoint("drug/label.json");
        let mut req = self
            .client
            .get(&url)
            .query(&[("search", q.as_str()), ("limit", "1")]);
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.api_key.as_deref());
        if let Some(key) = key {
            req = req.query(&[("api_key", key)]);
        }

        self.get_json_optional(req).await
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenFdaResponse<T> {
    #[serde(default)]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenFdaLabel {
    #[serde(default)]
    pub indications_and_usage: Vec<String>,
    #[serde(default)]
    pub purpose: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub boxed_warning: Vec<String>,
    #[serde(default)]
    pub adverse_reactions: Vec<String>,
    #[serde(default)]
    pub openfda: OpenFdaLabelMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenFdaLabelMeta {
    #[serde(default)]
    pub brand_name: Vec<String>,
    #[serde(default)]
    pub generic_name: Vec<String>,
    #[serde(default)]
    pub pharm_class_epc: Vec<String>,
    #[serde(default)]
    pub pharm_class_pe: Vec<String>,
}
