//! Turns one chat message into a safety-annotated reply.

use std::time::Duration;

use tracing::{Instrument, debug, info_span, warn};

use crate::adapters::{self, KnowledgeAdapter, LookupContext};
use crate::analysis::interactions;
use crate::entities::chat::{ChatMessage, ChatReply, GroundingSource};
use crate::entities::drug;
use crate::entities::profile::{Language, UserProfile};
use crate::error::MediGuardError;
use crate::render::markdown;
use crate::transform::query::split_sub_queries;

pub const THINKING_DELAY_ENV: &str = "MEDIGUARD_THINKING_DELAY_MS";
const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(800);
const DEFAULT_HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause before any work, so the caller can show a typing indicator.
    pub thinking_delay: Duration,
    /// How many trailing history messages feed context drugs.
    pub history_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thinking_delay: DEFAULT_THINKING_DELAY,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

impl EngineConfig {
    /// Defaults, with `MEDIGUARD_THINKING_DELAY_MS` applied when it parses.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(THINKING_DELAY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.thinking_delay = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "Ignoring invalid {THINKING_DELAY_ENV}"),
            }
        }
        config
    }
}

pub struct Engine {
    adapters: Vec<Box<dyn KnowledgeAdapter>>,
    config: EngineConfig,
}

impl Engine {
    /// Engine backed by the live encyclopedia and drug-label services.
    pub fn new(config: EngineConfig) -> Result<Self, MediGuardError> {
        Ok(Self::with_adapters(adapters::default_adapters()?, config))
    }

    /// Adapters are tried in the given order for every sub-query.
    pub fn with_adapters(adapters: Vec<Box<dyn KnowledgeAdapter>>, config: EngineConfig) -> Self {
        Self { adapters, config }
    }

    /// Answers `message`. Never fails: lookups that come up empty end in the
    /// not-found text with a web-search directive.
    pub async fn respond(
        &self,
        message: &str,
        history: &[ChatMessage],
        profile: &UserProfile,
        language: &str,
    ) -> ChatReply {
        let language = Language::from_code_or_default(language);
        let span = info_span!("respond", language = language.code());
        self.respond_inner(message, history, profile)
            .instrument(span)
            .await
    }

    async fn respond_inner(
        &self,
        message: &str,
        history: &[ChatMessage],
        profile: &UserProfile,
    ) -> ChatReply {
        if !self.config.thinking_delay.is_zero() {
            tokio::time::sleep(self.config.thinking_delay).await;
        }

        let mut text = String::new();
        if history.last().is_some_and(ChatMessage::has_image) {
            text.push_str(markdown::IMAGE_NOTICE);
        }

        let query_drugs = drug::keys_mentioned_in(message);
        let composed = if query_drugs.is_empty() {
            self.compose_online(message, profile).await
        } else {
            self.compose_local(&query_drugs, history, profile)
                .map(|body| (body, Vec::new()))
        };

        match composed {
            Ok((body, grounding_sources)) => {
                text.push_str(&body);
                ChatReply {
                    text,
                    grounding_sources,
                }
            }
            Err(err) => {
                warn!("Falling back to plain reply: {err}");
                text.push_str(&markdown::not_found_plain(message));
                ChatReply {
                    text,
                    grounding_sources: Vec::new(),
                }
            }
        }
    }

    fn compose_local(
        &self,
        query_drugs: &[&'static str],
        history: &[ChatMessage],
        profile: &UserProfile,
    ) -> Result<String, MediGuardError> {
        let context = interactions::context_drugs(profile, history, self.config.history_window);
        let findings =
            interactions::detect_interactions(query_drugs, &context, &profile.current_meds);
        debug!(
            drugs = ?query_drugs,
            context = ?context,
            findings = findings.len(),
            "Matched reference table"
        );
        markdown::local_markdown(query_drugs, &findings, profile.is_childbearing_age())
    }

    async fn compose_online(
        &self,
        message: &str,
        profile: &UserProfile,
    ) -> Result<(String, Vec<GroundingSource>), MediGuardError> {
        let ctx = LookupContext {
            openfda_key: profile.openfda_key(),
        };
        let childbearing_age = profile.is_childbearing_age();

        let mut body = String::new();
        let mut sources: Vec<GroundingSource> = Vec::new();
        for query in split_sub_queries(message) {
            for adapter in &self.adapters {
                let Some(summary) = adapter.attempt(&query, ctx).await else {
                    continue;
                };
                debug!(source = adapter.name(), query = %query, title = %summary.title, "Resolved online");
                body.push_str(&markdown::online_markdown(&summary, childbearing_age)?);
                if !summary.url.is_empty() && !sources.iter().any(|s| s.url == summary.url) {
                    sources.push(GroundingSource {
                        title: summary.title.clone(),
                        url: summary.url.clone(),
                    });
                }
                break;
            }
        }

        if body.is_empty() {
            return Ok((markdown::not_found_markdown(message)?, Vec::new()));
        }
        Ok((body, sources))
    }
}
