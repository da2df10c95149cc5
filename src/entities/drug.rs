/// A curated reference entry for one drug or substance.
///
/// Notes and warnings are prose; a few heuristics look for marker substrings
/// such as "contraindicated" inside them (see `analysis::rules`).
#[derive(Debug, Clone, Copy)]
pub struct DrugRecord {
    pub pharmacological_class: &'static str,
    pub indication: &'static str,
    pub schedule: &'static str,
    pub kidney_note: &'static str,
    pub liver_note: &'static str,
    pub interactions: &'static [&'static str],
    pub side_effects: &'static [&'static str],
    pub warnings: &'static [&'static str],
    pub crosses_blood_brain_barrier: bool,
    pub habit_forming: bool,
    pub pregnancy_unsafe: bool,
}

/// Common drugs dispensed in India, after the Indian Pharmacopoeia and NLEM 2022.
///
/// Keys are lowercase and unique. Declaration order is detection order.
pub static REFERENCE_TABLE: &[(&str, DrugRecord)] = &[
    // Pain & fever
    (
        "paracetamol",
        DrugRecord {
            pharmacological_class: "Analgesic & Antipyretic (NLEM 2022)",
            indication: "Fever, Mild Pain",
            schedule: "OTC",
            kidney_note: "Safe in normal doses. Adjustment needed in severe renal failure.",
            liver_note: "WARNING: High risk of hepatotoxicity in overdose (>4g/day).",
            interactions: &["Warfarin", "Alcohol", "Isoniazid"],
            side_effects: &["Nausea", "Allergic reactions"],
            warnings: &[
                "Do not exceed 4g per 24 hours.",
                "Contraindicated in severe liver failure.",
            ],
            crosses_blood_brain_barrier: true,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "crocin",
        DrugRecord {
            pharmacological_class: "Analgesic (Brand for Paracetamol)",
            indication: "Fever, Headache",
            schedule: "OTC",
            kidney_note: "Safe in normal doses.",
            liver_note: "Avoid overdose.",
            interactions: &["Alcohol"],
            side_effects: &["Nausea"],
            warnings: &["Contains Paracetamol. Do not double dose."],
            crosses_blood_brain_barrier: true,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "dolo",
        DrugRecord {
            pharmacological_class: "Analgesic (Brand for Paracetamol 650)",
            indication: "High Fever",
            schedule: "OTC",
            kidney_note: "Safe in normal doses.",
            liver_note: "Avoid overdose.",
            interactions: &["Alcohol"],
            side_effects: &["Nausea"],
            warnings: &["Contains Paracetamol 650mg."],
            crosses_blood_brain_barrier: true,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "ibuprofen",
        DrugRecord {
            pharmacological_class: "NSAID (NLEM 2022)",
            indication: "Pain, Inflammation",
            schedule: "Schedule H",
            kidney_note: "WARNING: Can cause acute kidney injury. Avoid in CKD.",
            liver_note: "Use with caution.",
            interactions: &["Aspirin", "ACE Inhibitors", "Lithium", "Methotrexate"],
            side_effects: &["Gastritis", "Ulcers", "Kidney damage"],
            warnings: &[
                "Take with food to avoid gastric irritation.",
                "Contraindicated in active peptic ulcer.",
                "Contraindicated in third trimester of pregnancy.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "aspirin",
        DrugRecord {
            pharmacological_class: "Antiplatelet & NSAID (NLEM 2022)",
            indication: "Pain, Fever, Prevention of Heart Attack and Stroke",
            schedule: "OTC",
            kidney_note: "Avoid in severe renal impairment.",
            liver_note: "Avoid in severe hepatic impairment.",
            interactions: &["Ibuprofen", "Warfarin", "Methotrexate", "Alcohol"],
            side_effects: &["Gastric irritation", "Bleeding", "Tinnitus"],
            warnings: &[
                "Do not give to children under 16 (risk of Reye's syndrome).",
                "Contraindicated in active peptic ulcer and bleeding disorders.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "diclofenac",
        DrugRecord {
            pharmacological_class: "NSAID (NLEM 2022)",
            indication: "Pain, Arthritis",
            schedule: "Schedule H",
            kidney_note: "High risk of renal impairment with long-term use.",
            liver_note: "Risk of elevated liver enzymes.",
            interactions: &["Other NSAIDs", "Blood thinners"],
            side_effects: &["Epigastric pain", "Nausea", "Headache"],
            warnings: &[
                "Avoid if you have heart disease or stomach ulcers.",
                "Contraindicated in patients with active GI bleeding.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "tramadol",
        DrugRecord {
            pharmacological_class: "Opioid Analgesic (NLEM 2022)",
            indication: "Moderate to Severe Pain",
            schedule: "Schedule H1 (Strict Warning)",
            kidney_note: "Reduce dose in renal impairment.",
            liver_note: "Reduce dose in hepatic impairment.",
            interactions: &["SSRI Antidepressants", "Alcohol", "Benzodiazepines"],
            side_effects: &["Dizziness", "Constipation", "Nausea", "Sleepiness"],
            warnings: &[
                "Habit-forming. Causes drowsiness. Do not drive.",
                "Contraindicated in acute intoxication with alcohol.",
                "Contraindicated in respiratory depression.",
            ],
            crosses_blood_brain_barrier: true,
            habit_forming: true,
            pregnancy_unsafe: true,
        },
    ),
    // NLEM 2022 additions
    (
        "ivermectin",
        DrugRecord {
            pharmacological_class: "Anthelminthic & Antifilarial (NLEM 2022)",
            indication: "Filariasis, Strongyloidiasis, Scabies",
            schedule: "Schedule H",
            kidney_note: "Safe.",
            liver_note: "Use with caution.",
            interactions: &["Warfarin"],
            side_effects: &["Fever", "Pruritus", "Skin rash", "Dizziness"],
            warnings: &[
                "Take on an empty stomach with water.",
                "Mazzotti reaction possible in onchocerciasis treatment.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "amikacin",
        DrugRecord {
            pharmacological_class: "Aminoglycoside Antibiotic (NLEM 2022)",
            indication: "Serious bacterial infections (MDR-TB, Hospital-acquired)",
            schedule: "Schedule H",
            kidney_note: "WARNING: Nephrotoxic. Strict monitoring required.",
            liver_note: "Safe.",
            interactions: &["Furosemide", "Amphotericin B", "Muscle relaxants"],
            side_effects: &[
                "Hearing loss (Ototoxicity)",
                "Kidney damage",
                "Balance problems",
            ],
            warnings: &[
                "Monitor auditory and renal function.",
                "Ensure adequate hydration.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "bedaquiline",
        DrugRecord {
            pharmacological_class: "Diarylquinoline Antitubercular (NLEM 2022)",
            indication: "Multidrug-resistant Tuberculosis (MDR-TB)",
            schedule: "Schedule H1",
            kidney_note: "Use with caution.",
            liver_note: "Avoid in severe hepatic impairment.",
            interactions: &["Rifampicin (CYP3A4 inducers)", "QT prolonging drugs"],
            side_effects: &["Headache", "Nausea", "QT prolongation", "Joint pain"],
            warnings: &[
                "Boxed Warning: QT prolongation (Monitor ECG).",
                "Increased risk of death observed in trials.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "delamanid",
        DrugRecord {
            pharmacological_class: "Antitubercular (NLEM 2022)",
            indication: "MDR-TB",
            schedule: "Schedule H1",
            kidney_note: "Safe.",
            liver_note: "Caution.",
            interactions: &["QT prolonging drugs"],
            side_effects: &["Dizziness", "Tremor", "QT prolongation"],
            warnings: &["Monitor ECG for QT prolongation.", "Take with food."],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "itraconazole",
        DrugRecord {
            pharmacological_class: "Azole Antifungal (NLEM 2022)",
            indication: "Fungal infections (Aspergillosis, Blastomycosis)",
            schedule: "Schedule H",
            kidney_note: "Caution.",
            liver_note: "Monitor liver function.",
            interactions: &["Simvastatin", "Midazolam", "Antacids"],
            side_effects: &["Nausea", "Abdominal pain", "Liver toxicity"],
            warnings: &[
                "Take with food for better absorption.",
                "Contraindicated in heart failure.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    // Antibiotics
    (
        "amoxicillin",
        DrugRecord {
            pharmacological_class: "Penicillin Antibiotic (NLEM 2022)",
            indication: "Bacterial Infections",
            schedule: "Schedule H",
            kidney_note: "Dose adjustment required in renal failure.",
            liver_note: "Generally safe.",
            interactions: &["Methotrexate", "Warfarin", "Probenecid"],
            side_effects: &["Diarrhea", "Rash", "Nausea"],
            warnings: &[
                "Complete the full course to prevent resistance.",
                "Contraindicated if allergic to Penicillin.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "azithromycin",
        DrugRecord {
            pharmacological_class: "Macrolide Antibiotic (NLEM 2022)",
            indication: "Respiratory & Throat Infections",
            schedule: "Schedule H",
            kidney_note: "Safe.",
            liver_note: "Use with caution.",
            interactions: &["Antacids (Al/Mg)", "Digoxin", "Ergot derivatives"],
            side_effects: &["Diarrhea", "Abdominal pain"],
            warnings: &[
                "Take 1 hour before or 2 hours after food.",
                "Contraindicated in patients with history of cholestatic jaundice/hepatic dysfunction.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "ciprofloxacin",
        DrugRecord {
            pharmacological_class: "Fluoroquinolone Antibiotic (NLEM 2022)",
            indication: "UTI, Bacterial Infections",
            schedule: "Schedule H",
            kidney_note: "Dose adjustment needed.",
            liver_note: "Caution.",
            interactions: &["Theophylline", "Tizanidine", "Dairy products"],
            side_effects: &["Tendonitis", "Photosensitivity", "Dizziness"],
            warnings: &[
                "Avoid in children and pregnancy. Risk of tendon rupture.",
                "Contraindicated in patients with history of tendon disorders.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    // Diabetes
    (
        "metformin",
        DrugRecord {
            pharmacological_class: "Biguanide (NLEM 2022)",
            indication: "Type 2 Diabetes",
            schedule: "Schedule H",
            kidney_note: "Contraindicated in severe renal impairment (eGFR < 30).",
            liver_note: "Avoid in severe liver disease.",
            interactions: &["Alcohol", "Iodinated contrast media"],
            side_effects: &["GI upset", "Metallic taste", "B12 deficiency"],
            warnings: &[
                "Take with meals to reduce stomach upset.",
                "Contraindicated in metabolic acidosis, including diabetic ketoacidosis.",
            ],
            crosses_blood_brain_barrier: true,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "glimepiride",
        DrugRecord {
            pharmacological_class: "Sulfonylurea (NLEM 2022)",
            indication: "Type 2 Diabetes",
            schedule: "Schedule H",
            kidney_note: "Use with caution.",
            liver_note: "Use with caution.",
            interactions: &["Alcohol", "Beta-blockers", "Fluconazole"],
            side_effects: &["Hypoglycemia (Low sugar)", "Weight gain"],
            warnings: &[
                "Risk of sudden low blood sugar. Carry sugar.",
                "Contraindicated in diabetic ketoacidosis.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    // Hypertension & heart
    (
        "amlodipine",
        DrugRecord {
            pharmacological_class: "Calcium Channel Blocker (NLEM 2022)",
            indication: "Hypertension",
            schedule: "Schedule H",
            kidney_note: "Safe.",
            liver_note: "Start with lower dose in hepatic impairment.",
            interactions: &["Simvastatin"],
            side_effects: &["Ankle swelling (Edema)", "Flushing"],
            warnings: &[
                "Do not stop abruptly.",
                "Contraindicated in severe hypotension.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "telmisartan",
        DrugRecord {
            pharmacological_class: "ARB (NLEM 2022)",
            indication: "Hypertension",
            schedule: "Schedule H",
            kidney_note: "Monitor Potassium levels.",
            liver_note: "Caution in biliary obstruction.",
            interactions: &["Potassium supplements", "NSAIDs"],
            side_effects: &["Dizziness", "Back pain"],
            warnings: &[
                "May cause high potassium levels.",
                "Contraindicated in pregnancy (2nd and 3rd trimesters).",
                "Contraindicated in biliary obstruction.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "atorvastatin",
        DrugRecord {
            pharmacological_class: "Statin (NLEM 2022)",
            indication: "High Cholesterol",
            schedule: "Schedule H",
            kidney_note: "Safe.",
            liver_note: "Contraindicated in active liver disease.",
            interactions: &["Clarithromycin", "Grapefruit juice"],
            side_effects: &["Muscle pain", "Digestive issues"],
            warnings: &[
                "Report unexplained muscle pain immediately.",
                "Contraindicated in active liver disease.",
                "Contraindicated in pregnancy.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    (
        "warfarin",
        DrugRecord {
            pharmacological_class: "Oral Anticoagulant (NLEM 2022)",
            indication: "Prevention of Blood Clots (DVT, Atrial Fibrillation)",
            schedule: "Schedule H",
            kidney_note: "Use with caution. Monitor INR closely.",
            liver_note: "Contraindicated in severe hepatic impairment.",
            interactions: &[
                "Aspirin",
                "Paracetamol",
                "Ibuprofen",
                "Diclofenac",
                "Amoxicillin",
                "Ivermectin",
                "Alcohol",
            ],
            side_effects: &["Bleeding", "Bruising", "Hair loss"],
            warnings: &[
                "Regular INR monitoring required.",
                "Contraindicated in active bleeding.",
                "Contraindicated in pregnancy.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: true,
        },
    ),
    // Gastric
    (
        "pantoprazole",
        DrugRecord {
            pharmacological_class: "Proton Pump Inhibitor (NLEM 2022)",
            indication: "Acidity, GERD",
            schedule: "Schedule H",
            kidney_note: "Safe.",
            liver_note: "Maximum 20mg in severe liver failure.",
            interactions: &["Clopidogrel (Mild)", "Iron supplements"],
            side_effects: &["Headache", "Diarrhea"],
            warnings: &["Best taken empty stomach in the morning."],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "domperidone",
        DrugRecord {
            pharmacological_class: "Prokinetic (NLEM 2022)",
            indication: "Nausea, Vomiting",
            schedule: "Schedule H",
            kidney_note: "Adjust dose.",
            liver_note: "Contraindicated in moderate/severe impairment.",
            interactions: &["Ketoconazole", "Erythromycin"],
            side_effects: &["Dry mouth", "Heart rhythm changes (Rare)"],
            warnings: &[
                "Use lowest effective dose.",
                "Contraindicated in GI hemorrhage.",
                "Contraindicated in patients with prolactin-releasing pituitary tumour.",
            ],
            crosses_blood_brain_barrier: true,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    // Allergy
    (
        "cetirizine",
        DrugRecord {
            pharmacological_class: "Antihistamine (NLEM 2022)",
            indication: "Allergy, Cold",
            schedule: "Schedule H",
            kidney_note: "Reduce dose.",
            liver_note: "Safe.",
            interactions: &["Alcohol", "Sedatives"],
            side_effects: &["Drowsiness", "Dry mouth"],
            warnings: &[
                "May cause mild drowsiness.",
                "Contraindicated in end stage renal disease.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    (
        "montelukast",
        DrugRecord {
            pharmacological_class: "Leukotriene Receptor Antagonist (NLEM 2022)",
            indication: "Asthma, Allergy",
            schedule: "Schedule H",
            kidney_note: "Safe.",
            liver_note: "Caution.",
            interactions: &["Phenytoin", "Phenobarbital"],
            side_effects: &["Mood changes", "Headache"],
            warnings: &[
                "Take in the evening.",
                "Contraindicated in patients with hypersensitivity to the drug.",
            ],
            crosses_blood_brain_barrier: false,
            habit_forming: false,
            pregnancy_unsafe: false,
        },
    ),
    // Other substances
    (
        "alcohol",
        DrugRecord {
            pharmacological_class: "CNS Depressant",
            indication: "Recreational (Not a drug)",
            schedule: "N/A",
            kidney_note: "Diuretic effect. Dehydration.",
            liver_note: "WARNING: Toxic. Causes cirrhosis.",
            interactions: &["Metronidazole", "Painkillers", "Sedatives", "Antibiotics"],
            side_effects: &["Intoxication", "Liver damage"],
            warnings: &[
                "Dangerous interactions with almost all prescription drugs.",
                "Contraindicated in liver disease.",
                "Contraindicated in pregnancy.",
            ],
            crosses_blood_brain_barrier: true,
            habit_forming: true,
            pregnancy_unsafe: true,
        },
    ),
];

pub fn lookup(key: &str) -> Option<&'static DrugRecord> {
    REFERENCE_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, record)| record)
}

pub fn keys() -> impl Iterator<Item = &'static str> {
    REFERENCE_TABLE.iter().map(|(k, _)| *k)
}

/// Returns every table key contained in `text`, case-insensitively, in table order.
pub fn keys_mentioned_in(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    keys().filter(|key| lower.contains(key)).collect()
}

/// "paracetamol" -> "Paracetamol"
pub fn display_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
