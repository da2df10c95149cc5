//! Keyword and substring heuristics behind every safety annotation.

use crate::entities::drug::DrugRecord;

/// One `CRITICAL:` line in a drug block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFlag {
    BloodBrainBarrier,
    HabitForming,
    PregnancyUnsafe,
    /// Encyclopedia text mentions the blood-brain barrier.
    TextBloodBrainBarrier,
    /// Encyclopedia text names a category D/X or fetal-harm risk.
    TextPregnancyWarning,
    /// Label text pairs pregnancy with an avoidance term.
    LabelPregnancyRisk,
}

impl RiskFlag {
    pub fn message(self) -> &'static str {
        match self {
            Self::BloodBrainBarrier => "🧠 Crosses Blood-Brain Barrier (BBB).",
            Self::HabitForming => "⛔ HABIT-FORMING / ADDICTION RISK.",
            Self::PregnancyUnsafe => "🤰 UNSAFE FOR PREGNANCY (Check Category).",
            Self::TextBloodBrainBarrier => "🧠 Crosses BBB.",
            Self::TextPregnancyWarning => "🤰 PREGNANCY WARNING DETECTED IN TEXT.",
            Self::LabelPregnancyRisk => "🤰 FDA LABELING MENTIONS PREGNANCY RISKS.",
        }
    }
}

/// Bidirectional, case-insensitive substring match between an interaction
/// entry and another drug name.
pub fn interaction_matches(entry: &str, other: &str) -> bool {
    let entry = entry.to_lowercase();
    let other = other.to_lowercase();
    if entry.is_empty() || other.is_empty() {
        return false;
    }
    other.contains(&entry) || entry.contains(&other)
}

/// First interaction entry of `record` that matches `other`.
pub fn listed_interaction(record: &DrugRecord, other: &str) -> Option<&'static str> {
    record
        .interactions
        .iter()
        .copied()
        .find(|entry| interaction_matches(entry, other))
}

/// Paracetamol with one of its brands, or the same key twice.
pub fn is_duplicate_therapy(a: &str, b: &str) -> bool {
    let mentions = |key: &str, name: &str| key.contains(name);
    a == b
        || (mentions(a, "paracetamol") && mentions(b, "crocin"))
        || (mentions(a, "crocin") && mentions(b, "paracetamol"))
}

pub fn mentions_contraindicated(note: &str) -> bool {
    note.to_lowercase().contains("contraindicated")
}

/// Fixed flags of a reference-table entry.
pub fn record_risk_flags(record: &DrugRecord, childbearing_age: bool) -> Vec<RiskFlag> {
    let mut flags = Vec::new();
    if record.crosses_blood_brain_barrier {
        flags.push(RiskFlag::BloodBrainBarrier);
    }
    if record.habit_forming {
        flags.push(RiskFlag::HabitForming);
    }
    if record.pregnancy_unsafe && childbearing_age {
        flags.push(RiskFlag::PregnancyUnsafe);
    }
    flags
}

fn mentions_addiction(lower: &str) -> bool {
    lower.contains("addict") || lower.contains("habit-forming") || lower.contains("dependence")
}

/// Flags scanned from an encyclopedia extract.
pub fn encyclopedia_risk_flags(extract: &str, childbearing_age: bool) -> Vec<RiskFlag> {
    let lower = extract.to_lowercase();
    let mut flags = Vec::new();
    if lower.contains("blood-brain barrier") {
        flags.push(RiskFlag::TextBloodBrainBarrier);
    }
    if mentions_addiction(&lower) {
        flags.push(RiskFlag::HabitForming);
    }
    if childbearing_age
        && (lower.contains("pregnancy category d")
            || lower.contains("pregnancy category x")
            || lower.contains("fetal harm"))
    {
        flags.push(RiskFlag::TextPregnancyWarning);
    }
    flags
}

/// Flags scanned from drug-label warnings and purpose text.
pub fn label_risk_flags(warnings: &str, purpose: &str, childbearing_age: bool) -> Vec<RiskFlag> {
    let combined = format!("{warnings} {purpose}").to_lowercase();
    let mut flags = Vec::new();
    if childbearing_age
        && combined.contains("pregnancy")
        && ["unsafe", "avoid", "fetal"]
            .iter()
            .any(|term| combined.contains(term))
    {
        flags.push(RiskFlag::LabelPregnancyRisk);
    }
    if combined.contains("addict") || combined.contains("dependence") {
        flags.push(RiskFlag::HabitForming);
    }
    flags
}
