//! Normalizes upstream payloads into `ExternalDrugSummary`.

use crate::entities::summary::{ExternalDrugSummary, SummarySource};
use crate::sources::openfda::OpenFdaLabel;
use crate::sources::wikipedia::{WikiPageSummary, WikiSearchHit};
use crate::transform::text::{is_medical_context, truncate_at_sentence};

pub(crate) const LABEL_TEXT_MAX_CHARS: usize = 1500;
const UNSPECIFIED_CLASS: &str = "Unspecified Pharmacologic Class";
const LABEL_SIDE_EFFECTS_FALLBACK: &str = "Refer to official labeling for side effect details.";

const NON_MEDICAL_DESCRIPTIONS: &[&str] = &[
    "song",
    "album",
    "film",
    "movie",
    "book",
    "video game",
    "place",
    "city",
    "village",
    "river",
];

/// True when the opensearch description marks an obviously off-topic article.
pub(crate) fn is_non_medical_description(description: &str) -> bool {
    let lower = description.to_lowercase();
    NON_MEDICAL_DESCRIPTIONS.iter().any(|kw| lower.contains(kw))
}

/// Builds a summary from a Wikipedia page, or `None` for disambiguation,
/// non-standard, empty or off-topic pages.
pub(crate) fn from_wikipedia(
    hit: &WikiSearchHit,
    page: WikiPageSummary,
) -> Option<ExternalDrugSummary> {
    if page.page_type != "standard" {
        return None;
    }
    let extract = page
        .extract
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())?;
    if extract.contains("may refer to") {
        return None;
    }
    if !is_medical_context(&extract) && !is_medical_context(&hit.description) {
        return None;
    }

    let title = if page.title.trim().is_empty() {
        hit.title.clone()
    } else {
        page.title
    };

    Some(ExternalDrugSummary {
        source: SummarySource::Encyclopedia,
        title,
        generic_name: None,
        class_label: None,
        purpose: extract.clone(),
        warnings: extract,
        side_effects: None,
        url: hit.url.clone(),
    })
}

fn first_text(values: &[String]) -> Option<String> {
    values
        .first()
        .filter(|t| !t.is_empty())
        .map(|t| truncate_at_sentence(t, LABEL_TEXT_MAX_CHARS))
}

fn first_name(values: &[String]) -> Option<String> {
    values
        .first()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Builds a summary from the first openFDA label hit for `query`.
pub(crate) fn from_openfda_label(
    label: OpenFdaLabel,
    query: &str,
    url: String,
) -> ExternalDrugSummary {
    let meta = &label.openfda;
    let generic_name = first_name(&meta.generic_name);
    let title = first_name(&meta.brand_name)
        .or_else(|| generic_name.clone())
        .unwrap_or_else(|| query.to_string());
    let class_label = first_name(&meta.pharm_class_epc)
        .or_else(|| first_name(&meta.pharm_class_pe))
        .unwrap_or_else(|| UNSPECIFIED_CLASS.to_string());

    ExternalDrugSummary {
        source: SummarySource::DrugLabel,
        title,
        generic_name,
        class_label: Some(class_label),
        purpose: first_text(&label.indications_and_usage)
            .or_else(|| first_text(&label.purpose))
            .unwrap_or_default(),
        warnings: first_text(&label.warnings)
            .or_else(|| first_text(&label.boxed_warning))
            .unwrap_or_default(),
        side_effects: Some(
            first_text(&label.adverse_reactions)
                .unwrap_or_else(|| LABEL_SIDE_EFFECTS_FALLBACK.to_string()),
        ),
        url,
    }
}
