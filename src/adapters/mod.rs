//! External knowledge adapters tried, in priority order, when the reference table has no match.
//!
//! An adapter never fails outward: network, status and parse errors are
//! logged and reported as "no result" so one bad upstream cannot abort a reply.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::entities::summary::ExternalDrugSummary;
use crate::error::MediGuardError;
use crate::sources::openfda::OpenFdaClient;
use crate::sources::wikipedia::WikipediaClient;
use crate::transform::query::clean_query;
use crate::transform::summary;

/// Per-call inputs an adapter may need besides the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupContext<'a> {
    /// Caller-supplied openFDA key from the user profile.
    pub openfda_key: Option<&'a str>,
}

#[async_trait]
pub trait KnowledgeAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// One attempt to resolve `query`; `None` on any failure or irrelevant hit.
    async fn attempt(&self, query: &str, ctx: LookupContext<'_>) -> Option<ExternalDrugSummary>;
}

/// Wikipedia title search plus page summary.
pub struct EncyclopediaAdapter {
    client: WikipediaClient,
}

impl EncyclopediaAdapter {
    pub fn new() -> Result<Self, MediGuardError> {
        Ok(Self {
            client: WikipediaClient::new()?,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_client(client: WikipediaClient) -> Self {
        Self { client }
    }

    async fn lookup(&self, query: &str) -> Result<Option<ExternalDrugSummary>, MediGuardError> {
        let Some(hit) = self.client.search_title(query).await? else {
            return Ok(None);
        };
        if summary::is_non_medical_description(&hit.description) {
            debug!(title = %hit.title, description = %hit.description, "Skipping non-medical article");
            return Ok(None);
        }
        let Some(page) = self.client.page_summary(&hit.title).await? else {
            return Ok(None);
        };
        Ok(summary::from_wikipedia(&hit, page))
    }
}

#[async_trait]
impl KnowledgeAdapter for EncyclopediaAdapter {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn attempt(&self, query: &str, _ctx: LookupContext<'_>) -> Option<ExternalDrugSummary> {
        let cleaned = clean_query(query);
        if cleaned.is_empty() {
            return None;
        }
        match self.lookup(&cleaned).await {
            Ok(found) => found,
            Err(err) => {
                warn!(source = self.name(), query = %cleaned, "Lookup failed: {err}");
                None
            }
        }
    }
}

/// openFDA drug-label search by brand or generic name.
pub struct DrugLabelAdapter {
    client: OpenFdaClient,
}

impl DrugLabelAdapter {
    pub fn new() -> Result<Self, MediGuardError> {
        Ok(Self {
            client: OpenFdaClient::new()?,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_client(client: OpenFdaClient) -> Self {
        Self { client }
    }

    async fn lookup(
        &self,
        query: &str,
        ctx: LookupContext<'_>,
    ) -> Result<Option<ExternalDrugSummary>, MediGuardError> {
        let Some(resp) = self.client.label_search(query, ctx.openfda_key).await? else {
            return Ok(None);
        };
        let Some(label) = resp.results.into_iter().next() else {
            return Ok(None);
        };
        let url = label_page_url(query);
        Ok(Some(summary::from_openfda_label(label, query, url)))
    }
}

const DAILYMED_SEARCH: &str = "https://dailymed.nlm.nih.gov/dailymed/search.cfm";

/// Human-readable label page for a citation; the API URL itself is not browsable.
fn label_page_url(query: &str) -> String {
    match reqwest::Url::parse_with_params(DAILYMED_SEARCH, &[("query", query)]) {
        Ok(url) => url.into(),
        Err(_) => DAILYMED_SEARCH.to_string(),
    }
}

#[async_trait]
impl KnowledgeAdapter for DrugLabelAdapter {
    fn name(&self) -> &'static str {
        "openfda"
    }

    async fn attempt(&self, query: &str, ctx: LookupContext<'_>) -> Option<ExternalDrugSummary> {
        let cleaned = clean_query(query);
        if cleaned.is_empty() {
            return None;
        }
        match self.lookup(&cleaned, ctx).await {
            Ok(found) => found,
            Err(err) => {
                warn!(source = self.name(), query = %cleaned, "Lookup failed: {err}");
                None
            }
        }
    }
}

/// Production priority list: encyclopedia first, then drug labels.
pub fn default_adapters() -> Result<Vec<Box<dyn KnowledgeAdapter>>, MediGuardError> {
    Ok(vec![
        Box::new(EncyclopediaAdapter::new()?),
        Box::new(DrugLabelAdapter::new()?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::summary::SummarySource;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_search(server: &MockServer, search: &str, title: &str, description: &str) {
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("search", search))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                search,
                [title],
                [description],
                [format!("https://en.wikipedia.org/wiki/{title}")]
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn encyclopedia_adapter_cleans_query_and_returns_summary() {
        let server = MockServer::start().await;
        mount_search(&server, "Dexamethasone", "Dexamethasone", "Corticosteroid medication").await;
        Mock::given(method("GET"))
            .and(path("/api/rest_v1/page/summary/Dexamethasone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "standard",
                "title": "Dexamethasone",
                "extract": "Dexamethasone is a corticosteroid medication. Avoid abrupt withdrawal."
            })))
            .mount(&server)
            .await;

        let adapter =
            EncyclopediaAdapter::with_client(WikipediaClient::new_for_test(server.uri()).unwrap());
        let found = adapter
            .attempt("tell me about Dexamethasone", LookupContext::default())
            .await
            .expect("summary");
        assert_eq!(found.source, SummarySource::Encyclopedia);
        assert_eq!(found.title, "Dexamethasone");
        assert!(found.purpose.starts_with("Dexamethasone is a corticosteroid"));
    }

    #[tokio::test]
    async fn encyclopedia_adapter_rejects_non_medical_description() {
        let server = MockServer::start().await;
        mount_search(&server, "Thriller", "Thriller", "1982 album by Michael Jackson").await;

        let adapter =
            EncyclopediaAdapter::with_client(WikipediaClient::new_for_test(server.uri()).unwrap());
        assert!(adapter.attempt("Thriller", LookupContext::default()).await.is_none());
    }

    #[tokio::test]
    async fn encyclopedia_adapter_swallows_upstream_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let adapter =
            EncyclopediaAdapter::with_client(WikipediaClient::new_for_test(server.uri()).unwrap());
        assert!(adapter.attempt("Benadryl", LookupContext::default()).await.is_none());
    }

    #[tokio::test]
    async fn encyclopedia_adapter_skips_empty_cleaned_query() {
        let adapter = EncyclopediaAdapter::with_client(
            WikipediaClient::new_for_test("http://127.0.0.1:9".into()).unwrap(),
        );
        assert!(adapter.attempt("tell me about", LookupContext::default()).await.is_none());
    }

    #[tokio::test]
    async fn label_adapter_passes_profile_key_and_normalizes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .and(query_param("api_key", "profile-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "indications_and_usage": ["For the relief of allergy symptoms."],
                    "warnings": ["Do not use with other antihistamines. Ask a doctor before use."],
                    "openfda": {
                        "brand_name": ["Benadryl"],
                        "generic_name": ["DIPHENHYDRAMINE HYDROCHLORIDE"],
                        "pharm_class_epc": ["Histamine-1 Receptor Antagonist [EPC]"]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let adapter = DrugLabelAdapter::with_client(
            OpenFdaClient::new_for_test(server.uri(), None).unwrap(),
        );
        let found = adapter
            .attempt(
                "Benadryl side effects",
                LookupContext {
                    openfda_key: Some("profile-key"),
                },
            )
            .await
            .expect("label summary");
        assert_eq!(found.source, SummarySource::DrugLabel);
        assert_eq!(found.title, "Benadryl");
        assert_eq!(
            found.class_label.as_deref(),
            Some("Histamine-1 Receptor Antagonist [EPC]")
        );
        assert!(found.url.contains("query=Benadryl"));
    }

    #[tokio::test]
    async fn label_adapter_treats_empty_results_and_errors_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .and(query_param(
                "search",
                "openfda.brand_name:\"nothing\" OR openfda.generic_name:\"nothing\"",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": []
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .and(query_param(
                "search",
                "openfda.brand_name:\"broken\" OR openfda.generic_name:\"broken\"",
            ))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let adapter = DrugLabelAdapter::with_client(
            OpenFdaClient::new_for_test(server.uri(), None).unwrap(),
        );
        assert!(adapter.attempt("nothing", LookupContext::default()).await.is_none());
        assert!(adapter.attempt("broken", LookupContext::default()).await.is_none());
    }
}
