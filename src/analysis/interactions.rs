//! Interaction detection across the queried drugs, conversation history and profile.

use serde::Serialize;

use crate::analysis::rules;
use crate::entities::chat::ChatMessage;
use crate::entities::drug::{self, DrugRecord};
use crate::entities::profile::UserProfile;

pub const NO_CONTRAINDICATIONS: &str =
    "No specific contraindications listed in database. Consult a doctor.";
const PREGNANCY_CONTRAINDICATION: &str = "Pregnancy: Potential risk (Category D/X)";

/// A warning produced before the per-drug blocks, in detection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionFinding {
    /// Two drugs named in the same message.
    Pairwise {
        first: &'static str,
        second: &'static str,
        duplicate: bool,
    },
    /// A queried drug against a drug from the profile or recent history.
    Historical {
        drug: &'static str,
        context: String,
    },
    /// A queried drug whose interaction term appears in the raw medication list.
    Profile {
        drug: &'static str,
        interaction: &'static str,
    },
}

/// Profile medications followed by table drugs mentioned in the last
/// `window` history messages, deduplicated in first-seen order.
pub fn context_drugs(profile: &UserProfile, history: &[ChatMessage], window: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |name: String| {
        if !out.contains(&name) {
            out.push(name);
        }
    };

    for med in profile.medication_list() {
        push(med);
    }
    let start = history.len().saturating_sub(window);
    for msg in &history[start..] {
        for key in drug::keys_mentioned_in(&msg.text) {
            push(key.to_string());
        }
    }
    out
}

fn is_queried(query_drugs: &[&str], name: &str) -> bool {
    query_drugs.iter().any(|q| *q == name)
}

fn record(key: &str) -> Option<&'static DrugRecord> {
    drug::lookup(key)
}

/// Runs the pairwise, historical and profile rules for `query_drugs`.
///
/// Pairwise findings come first; historical and profile findings follow per
/// queried drug.
pub fn detect_interactions(
    query_drugs: &[&'static str],
    context: &[String],
    current_meds: &str,
) -> Vec<InteractionFinding> {
    let mut findings = Vec::new();

    for (i, &first) in query_drugs.iter().enumerate() {
        for &second in &query_drugs[i + 1..] {
            let interacts = record(first)
                .and_then(|r| rules::listed_interaction(r, second))
                .or_else(|| record(second).and_then(|r| rules::listed_interaction(r, first)))
                .is_some();
            let duplicate = rules::is_duplicate_therapy(first, second);
            if interacts || duplicate {
                findings.push(InteractionFinding::Pairwise {
                    first,
                    second,
                    duplicate,
                });
            }
        }
    }

    let meds_lower = current_meds.to_lowercase();
    for &key in query_drugs {
        let Some(rec) = record(key) else {
            continue;
        };

        for ctx in context {
            if is_queried(query_drugs, ctx) {
                continue;
            }
            if rules::listed_interaction(rec, ctx).is_some() {
                findings.push(InteractionFinding::Historical {
                    drug: key,
                    context: ctx.clone(),
                });
            }
        }

        if meds_lower.trim().is_empty() {
            continue;
        }
        for &term in rec.interactions {
            let term_lower = term.to_lowercase();
            if meds_lower.contains(&term_lower) && !is_queried(query_drugs, &term_lower) {
                findings.push(InteractionFinding::Profile {
                    drug: key,
                    interaction: term,
                });
            }
        }
    }

    findings
}

/// Flags for one table drug.
pub fn risk_flags(record: &DrugRecord, childbearing_age: bool) -> Vec<rules::RiskFlag> {
    rules::record_risk_flags(record, childbearing_age)
}

/// Organ notes that say "contraindicated", the pregnancy line, then every
/// warning; a generic consult line when nothing applies.
pub fn contraindications(record: &DrugRecord) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |line: String| {
        if !out.contains(&line) {
            out.push(line);
        }
    };

    if rules::mentions_contraindicated(record.kidney_note) {
        push(format!("Kidney: {}", record.kidney_note));
    }
    if rules::mentions_contraindicated(record.liver_note) {
        push(format!("Liver: {}", record.liver_note));
    }
    if record.pregnancy_unsafe {
        push(PREGNANCY_CONTRAINDICATION.to_string());
    }
    for warning in record.warnings {
        push((*warning).to_string());
    }

    if out.is_empty() {
        out.push(NO_CONTRAINDICATIONS.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::profile::Gender;

    fn profile_with_meds(meds: &str) -> UserProfile {
        UserProfile {
            current_meds: meds.into(),
            gender: Gender::Male,
            age: "40".into(),
            ..UserProfile::default()
        }
    }

    #[test]
    fn context_merges_profile_and_recent_history() {
        let profile = profile_with_meds("Warfarin, metformin");
        let mut history = vec![ChatMessage::user("tell me about amlodipine")];
        history.extend((0..10).map(|i| ChatMessage::model(format!("reply {i}"))));
        history.push(ChatMessage::user("and METFORMIN again, plus cetirizine"));

        let ctx = context_drugs(&profile, &history, 10);
        assert_eq!(ctx, vec!["warfarin", "metformin", "cetirizine"]);
    }

    #[test]
    fn pairwise_interaction_found_from_either_list() {
        let findings = detect_interactions(&["ibuprofen", "aspirin"], &[], "");
        assert_eq!(
            findings,
            vec![InteractionFinding::Pairwise {
                first: "ibuprofen",
                second: "aspirin",
                duplicate: false,
            }]
        );
    }

    #[test]
    fn pairwise_interaction_found_from_second_list_only() {
        let diclofenac = drug::lookup("diclofenac").unwrap();
        let warfarin = drug::lookup("warfarin").unwrap();
        assert!(rules::listed_interaction(diclofenac, "warfarin").is_none());
        assert!(rules::listed_interaction(warfarin, "diclofenac").is_some());

        let findings = detect_interactions(&["diclofenac", "warfarin"], &[], "");
        assert_eq!(
            findings,
            vec![InteractionFinding::Pairwise {
                first: "diclofenac",
                second: "warfarin",
                duplicate: false,
            }]
        );
    }

    #[test]
    fn duplicate_therapy_is_reported_without_listed_interaction() {
        let findings = detect_interactions(&["paracetamol", "crocin"], &[], "");
        assert_eq!(
            findings,
            vec![InteractionFinding::Pairwise {
                first: "paracetamol",
                second: "crocin",
                duplicate: true,
            }]
        );
    }

    #[test]
    fn profile_medication_yields_historical_and_profile_findings() {
        let profile = profile_with_meds("Warfarin");
        let ctx = context_drugs(&profile, &[], 10);
        let findings = detect_interactions(&["paracetamol"], &ctx, &profile.current_meds);
        assert_eq!(
            findings,
            vec![
                InteractionFinding::Historical {
                    drug: "paracetamol",
                    context: "warfarin".into(),
                },
                InteractionFinding::Profile {
                    drug: "paracetamol",
                    interaction: "Warfarin",
                },
            ]
        );
    }

    #[test]
    fn context_skips_drugs_already_queried() {
        let ctx = vec!["aspirin".to_string()];
        let findings = detect_interactions(&["ibuprofen", "aspirin"], &ctx, "aspirin");
        assert!(findings.iter().all(|f| matches!(f, InteractionFinding::Pairwise { .. })));
    }

    #[test]
    fn contraindications_collect_notes_pregnancy_and_warnings() {
        let ibuprofen = drug::lookup("ibuprofen").unwrap();
        assert_eq!(
            contraindications(ibuprofen),
            vec![
                "Pregnancy: Potential risk (Category D/X)",
                "Take with food to avoid gastric irritation.",
                "Contraindicated in active peptic ulcer.",
                "Contraindicated in third trimester of pregnancy.",
            ]
        );

        let warfarin = drug::lookup("warfarin").unwrap();
        assert_eq!(
            contraindications(warfarin)[0],
            "Liver: Contraindicated in severe hepatic impairment."
        );
    }

    #[test]
    fn contraindications_fall_back_to_consult_line() {
        let bare = DrugRecord {
            pharmacological_class: "Test",
            indication: "Testing",
            schedule: "OTC",
            kidney_note: "Safe.",
            liver_note: "Safe.",
            interactions: &[],
            side_effects: &[],
            warnings: &[],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: false,
        };
        assert_eq!(contraindications(&bare), vec![NO_CONTRAINDICATIONS]);
    }
}
