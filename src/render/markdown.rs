use std::sync::OnceLock;

use minijinja::{Environment, context};
use serde::Serialize;

use crate::analysis::interactions::{self, InteractionFinding};
use crate::analysis::rules::{self, RiskFlag};
use crate::entities::drug::{self, DrugRecord};
use crate::entities::summary::{ExternalDrugSummary, SummarySource};
use crate::error::MediGuardError;
use crate::transform::text::{extract_sentences, extract_warning_sentences};

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

pub const IMAGE_NOTICE: &str =
    "**Image Detected**: Analyzing... Check Expiry & Red Line (Schedule H).\n\n";

const MAX_LOCAL_SIDE_EFFECTS: usize = 3;
const MAX_ONLINE_WARNINGS: usize = 3;
const UNSPECIFIED_CLASS: &str = "Unspecified Pharmacologic Class";

fn env() -> Result<&'static Environment<'static>, MediGuardError> {
    if let Some(env) = ENV.get() {
        return Ok(env);
    }

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template("local.md.j2", include_str!("../../templates/local.md.j2"))?;
    env.add_template(
        "encyclopedia.md.j2",
        include_str!("../../templates/encyclopedia.md.j2"),
    )?;
    env.add_template(
        "drug_label.md.j2",
        include_str!("../../templates/drug_label.md.j2"),
    )?;
    env.add_template(
        "not_found.md.j2",
        include_str!("../../templates/not_found.md.j2"),
    )?;

    let _ = ENV.set(env);
    Ok(ENV
        .get()
        .expect("ENV should be initialized by the time this is reached"))
}

#[derive(Serialize)]
struct LocalDrugView {
    name: String,
    class_label: &'static str,
    indication: &'static str,
    schedule: &'static str,
    regulated: bool,
    flags: Vec<&'static str>,
    contraindications: Vec<String>,
    side_effects: String,
}

impl LocalDrugView {
    fn new(key: &str, record: &DrugRecord, childbearing_age: bool) -> Self {
        Self {
            name: drug::display_name(key),
            class_label: record.pharmacological_class,
            indication: record.indication,
            schedule: record.schedule,
            regulated: record.schedule.contains("Schedule"),
            flags: flag_messages(&interactions::risk_flags(record, childbearing_age)),
            contraindications: interactions::contraindications(record),
            side_effects: record
                .side_effects
                .iter()
                .take(MAX_LOCAL_SIDE_EFFECTS)
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn flag_messages(flags: &[RiskFlag]) -> Vec<&'static str> {
    flags.iter().map(|f| f.message()).collect()
}

/// Interaction warnings, one detail block per table drug, then the summary lines.
///
/// Only pairwise and historical warnings are followed by a blank line.
pub fn local_markdown(
    query_drugs: &[&'static str],
    findings: &[InteractionFinding],
    childbearing_age: bool,
) -> Result<String, MediGuardError> {
    let drugs = query_drugs
        .iter()
        .filter_map(|key| {
            drug::lookup(key).map(|record| LocalDrugView::new(key, record, childbearing_age))
        })
        .collect::<Vec<_>>();

    let separate = findings
        .iter()
        .any(|f| !matches!(f, InteractionFinding::Profile { .. }));

    let tmpl = env()?.get_template("local.md.j2")?;
    Ok(tmpl.render(context! {
        findings => findings,
        separate => separate,
        drugs => drugs,
    })?)
}

fn encyclopedia_warning_lines(extract: &str) -> Vec<String> {
    let mut lines = extract_warning_sentences(extract, MAX_ONLINE_WARNINGS);
    if lines.is_empty() {
        let lower = extract.to_lowercase();
        let (first, second) = if lower.contains("contraindicat") || lower.contains("warning") {
            (
                "Potential warnings detected. Check official sources.",
                "Consult doctor for details.",
            )
        } else {
            (
                "No specific contraindications extracted. Consult a doctor.",
                "Check interactions manually.",
            )
        };
        lines.push(first.to_string());
        lines.push(second.to_string());
    } else if lines.len() < 2 {
        lines.push("Consult doctor for additional safety information.".to_string());
    }
    lines
}

fn label_warning_lines(warnings: &str) -> Vec<String> {
    let mut lines = extract_warning_sentences(warnings, MAX_ONLINE_WARNINGS);
    if lines.is_empty() {
        lines.push("See official labeling for detailed contraindications.".to_string());
    } else if lines.len() < 2 {
        lines.push("Refer to official labeling for full list.".to_string());
    }
    lines
}

/// Detail block for one resolved online summary.
pub fn online_markdown(
    summary: &ExternalDrugSummary,
    childbearing_age: bool,
) -> Result<String, MediGuardError> {
    match summary.source {
        SummarySource::Encyclopedia => {
            let flags = rules::encyclopedia_risk_flags(&summary.purpose, childbearing_age);
            let tmpl = env()?.get_template("encyclopedia.md.j2")?;
            Ok(tmpl.render(context! {
                title => &summary.title,
                uses => extract_sentences(&summary.purpose, 2),
                flags => flag_messages(&flags),
                warnings => encyclopedia_warning_lines(&summary.warnings),
                summary => extract_sentences(&summary.purpose, 1),
            })?)
        }
        SummarySource::DrugLabel => {
            let flags =
                rules::label_risk_flags(&summary.warnings, &summary.purpose, childbearing_age);
            let tmpl = env()?.get_template("drug_label.md.j2")?;
            Ok(tmpl.render(context! {
                title => &summary.title,
                class_label => summary.class_label.as_deref().unwrap_or(UNSPECIFIED_CLASS),
                uses => extract_sentences(&summary.purpose, 2),
                warnings => label_warning_lines(&summary.warnings),
                flags => flag_messages(&flags),
                side_effects => extract_sentences(summary.side_effects.as_deref().unwrap_or_default(), 2),
                summary => extract_sentences(&summary.purpose, 1),
            })?)
        }
    }
}

pub fn not_found_markdown(message: &str) -> Result<String, MediGuardError> {
    let tmpl = env()?.get_template("not_found.md.j2")?;
    Ok(tmpl.render(context! { message => message })?)
}

/// Template-free not-found text, used when rendering itself fails.
pub fn not_found_plain(message: &str) -> String {
    format!(
        "I couldn't find details for \"**{message}**\" in my database or online records.\n\n[WEB:{message}]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::interactions::detect_interactions;

    fn encyclopedia(extract: &str) -> ExternalDrugSummary {
        ExternalDrugSummary {
            source: SummarySource::Encyclopedia,
            title: "Dexamethasone".into(),
            generic_name: None,
            class_label: None,
            purpose: extract.into(),
            warnings: extract.into(),
            side_effects: None,
            url: "https://en.wikipedia.org/wiki/Dexamethasone".into(),
        }
    }

    #[test]
    fn local_block_matches_response_grammar() {
        let out = local_markdown(&["cetirizine"], &[], false).unwrap();
        let record = drug::lookup("cetirizine").unwrap();
        assert!(out.starts_with("**Cetirizine**\n**Class**: "));
        assert!(out.contains(&format!(
            "**Uses**: This medication is indicated for {}.\n\n",
            record.indication
        )));
        assert!(out.contains("**Contraindications**:\n[RED]• "));
        assert!(out.contains("\n[BUY:Cetirizine]\n\n"));
        assert!(out.ends_with(&format!(
            "SUMMARY: **Cetirizine** is classified as a {} and is primarily used for {}. \n",
            record.pharmacological_class, record.indication
        )));
    }

    #[test]
    fn local_block_lists_warnings_then_blank_line() {
        let findings = detect_interactions(&["paracetamol", "crocin"], &[], "");
        let out = local_markdown(&["paracetamol", "crocin"], &findings, false).unwrap();
        assert!(out.starts_with(
            "[RED]⚠️ WARNING: CONTRAINDICATION DETECTED[/RED]\n\
             [RED]• Interaction between **PARACETAMOL** and **CROCIN**.[/RED]\n\
             [RED]• Risk of Duplicate Therapy/Overdose.[/RED]\n\
             \n**Paracetamol**\n"
        ));
        assert!(out.contains("CRITICAL: 🧠 Crosses Blood-Brain Barrier (BBB).\n"));
    }

    #[test]
    fn profile_only_warning_runs_into_first_drug_block() {
        let findings = [InteractionFinding::Profile {
            drug: "paracetamol",
            interaction: "Warfarin",
        }];
        let out = local_markdown(&["paracetamol"], &findings, false).unwrap();
        assert!(out.starts_with(
            "[RED]⚠️ WARNING: PROFILE INTERACTION[/RED]\n\
             [RED]• **PARACETAMOL** interacts with **Warfarin**.[/RED]\n\
             **Paracetamol**\n"
        ));
    }

    #[test]
    fn local_block_marks_scheduled_drugs_and_caps_side_effects() {
        let out = local_markdown(&["ibuprofen"], &[], true).unwrap();
        assert!(out.contains("**Regulatory**: [RED]Schedule H[/RED]\n"));
        assert!(out.contains("CRITICAL: 🤰 UNSAFE FOR PREGNANCY (Check Category).\n"));
        assert!(out.contains("**Side Effects**: Gastritis, Ulcers, Kidney damage\n"));
    }

    #[test]
    fn encyclopedia_block_pads_single_warning() {
        let out = online_markdown(
            &encyclopedia("Dexamethasone is a corticosteroid. Avoid abrupt withdrawal."),
            false,
        )
        .unwrap();
        assert_eq!(
            out,
            "**Dexamethasone** (Online)\n\
             **Class**: See description below.\n\n\
             **Uses**: Dexamethasone is a corticosteroid. Avoid abrupt withdrawal.\n\n\
             **Contraindications**:\n\
             [RED]• Avoid abrupt withdrawal.[/RED]\n\
             [RED]• Consult doctor for additional safety information.[/RED]\n\
             \n**Side Effects**: Consult a physician for detailed side effects.\n\
             [BUY:Dexamethasone]\n\
             SUMMARY: **Dexamethasone**: Dexamethasone is a corticosteroid. \n\n"
        );
    }

    #[test]
    fn encyclopedia_block_without_warning_sentences_uses_generic_lines() {
        let out = online_markdown(&encyclopedia("A corticosteroid medication."), false).unwrap();
        assert!(out.contains(
            "[RED]• No specific contraindications extracted. Consult a doctor.[/RED]\n\
             [RED]• Check interactions manually.[/RED]\n"
        ));
    }

    #[test]
    fn label_block_places_flags_after_warnings() {
        let summary = ExternalDrugSummary {
            source: SummarySource::DrugLabel,
            title: "Benadryl".into(),
            generic_name: Some("DIPHENHYDRAMINE".into()),
            class_label: Some("Histamine-1 Receptor Antagonist [EPC]".into()),
            purpose: "Temporarily relieves allergy symptoms.".into(),
            warnings: "Avoid use during pregnancy. Ask a doctor first.".into(),
            side_effects: Some("Drowsiness may occur.".into()),
            url: String::new(),
        };
        let out = online_markdown(&summary, true).unwrap();
        assert_eq!(
            out,
            "**Benadryl** (FDA)\n\
             **Class**: Histamine-1 Receptor Antagonist [EPC]\n\n\
             **Uses**: Temporarily relieves allergy symptoms.\n\n\
             **Contraindications / Warnings**:\n\
             [RED]• Avoid use during pregnancy.[/RED]\n\
             [RED]• Consult your doctor for full safety profile.[/RED]\n\
             CRITICAL: 🤰 FDA LABELING MENTIONS PREGNANCY RISKS.\n\
             \n**Side Effects**: Drowsiness may occur.\n\
             [BUY:Benadryl]\n\
             SUMMARY: **Benadryl** is identified for: Temporarily relieves allergy symptoms.\n\n"
        );
    }

    #[test]
    fn not_found_template_matches_plain_fallback() {
        let rendered = not_found_markdown("zzqx").unwrap();
        assert_eq!(rendered, not_found_plain("zzqx"));
        assert!(rendered.ends_with("[WEB:zzqx]"));
    }
}
