#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    Encyclopedia,
    DrugLabel,
}

/// Normalized result of one external lookup. Built per query and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDrugSummary {
    pub source: SummarySource,
    /// Article title or label brand name.
    pub title: String,
    pub generic_name: Option<String>,
    pub class_label: Option<String>,
    pub purpose: String,
    pub warnings: String,
    pub side_effects: Option<String>,
    pub url: String,
}
