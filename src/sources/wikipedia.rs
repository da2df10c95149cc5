use std::borrow::Cow;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::MediGuardError;

pub(crate) const WIKIPEDIA_BASE: &str = "https://en.wikipedia.org";
pub(crate) const WIKIPEDIA_BASE_ENV: &str = "MEDIGUARD_WIKIPEDIA_BASE";
const WIKIPEDIA_API: &str = "wikipedia";

pub struct WikipediaClient {
    client: reqwest::Client,
    base: Cow<'static, str>,
}

impl WikipediaClient {
    pub fn new() -> Result<Self, MediGuardError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: crate::sources::env_base(WIKIPEDIA_BASE, WIKIPEDIA_BASE_ENV),
        })
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(base: String) -> Result<Self, MediGuardError> {
        Ok(Self {
            client: crate::sources::shared_client()?,
            base: Cow::Owned(base),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_ref().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json_optional<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<Option<T>, MediGuardError> {
        let resp = req.send().await?;
        let status = resp.status();
        let content_type = resp.headers().get(reqwest::header::CONTENT_TYPE).cloned();
        let bytes = crate::sources::read_limited_body(resp, WIKIPEDIA_API).await?;

        if status.as_u16() == 404 {
            return Ok(None);
        }

        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            return Err(MediGuardError::Api {
                api: WIKIPEDIA_API.to_string(),
                message: format!("HTTP {status}: {excerpt}"),
            });
        }

        crate::sources::ensure_json_content_type(WIKIPEDIA_API, content_type.as_ref(), &bytes)?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| MediGuardError::ApiJson {
                api: WIKIPEDIA_API.to_string(),
                source,
            })
    }

    /// Top opensearch hit for `query`, if any.
    pub async fn search_title(&self, query: &str) -> Result<Option<WikiSearchHit>, MediGuardError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MediGuardError::InvalidArgument(
                "Search query is required".into(),
            ));
        }

        let url = self.endpoint("w/api.php");
        let req = self.client.get(&url).query(&[
            ("action", "opensearch"),
            ("search", query),
            ("limit", "1"),
            ("format", "json"),
        ]);
        let Some(value) = self.get_json_optional::<serde_json::Value>(req).await? else {
            return Ok(None);
        };
        Ok(WikiSearchHit::from_opensearch(&value))
    }

    pub async fn page_summary(&self, title: &str) -> Result<Option<WikiPageSummary>, MediGuardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(MediGuardError::InvalidArgument(
                "Page title is required".into(),
            ));
        }

        let mut url = reqwest::Url::parse(&self.endpoint("api/rest_v1/page/summary"))
            .map_err(|err| MediGuardError::InvalidArgument(format!("Invalid Wikipedia base: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| MediGuardError::InvalidArgument("Wikipedia base cannot hold a path".into()))?
            .push(title);

        self.get_json_optional(self.client.get(url)).await
    }
}

/// First row of an opensearch response: `[query, [titles], [descriptions], [urls]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiSearchHit {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl WikiSearchHit {
    fn from_opensearch(value: &serde_json::Value) -> Option<Self> {
        let column = |idx: usize| {
            value
                .get(idx)
                .and_then(|v| v.get(0))
                .and_then(serde_json::Value::as_str)
        };

        let title = column(1).map(str::trim).filter(|t| !t.is_empty())?;
        Some(Self {
            title: title.to_string(),
            description: column(2).unwrap_or_default().to_string(),
            url: column(3).unwrap_or_default().to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiPageSummary {
    #[serde(rename = "type", default)]
    pub page_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub extract: Option<String>,
}
