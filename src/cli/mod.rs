//! Command-line surface: `mediguard ask`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

use crate::engine::{Engine, EngineConfig};
use crate::entities::chat::ChatMessage;
use crate::entities::profile::{Gender, UserProfile};
use crate::error::MediGuardError;

#[derive(Parser, Debug)]
#[command(name = "mediguard")]
#[command(about = "MediGuard - safety-annotated medication lookup", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask about one or more medicines (e.g. "ibuprofen and aspirin")
    Ask(AskArgs),
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Free-text message; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
    /// User profile as inline JSON or a path to a JSON file
    #[arg(long)]
    pub profile: Option<String>,
    /// Conversation history as inline JSON or a path to a JSON array file
    #[arg(long)]
    pub history: Option<String>,
    /// Language code recorded on the request (en, hi, ta, ...)
    #[arg(long, default_value = "en")]
    pub language: String,
    /// Overrides the profile age
    #[arg(long)]
    pub age: Option<String>,
    /// Overrides the profile gender
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,
    /// Overrides the profile's comma-separated current medications
    #[arg(long)]
    pub meds: Option<String>,
    /// openFDA API key (falls back to OPENFDA_API_KEY)
    #[arg(long)]
    pub openfda_key: Option<String>,
    /// Print the reply as JSON including grounding sources
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        }
    }
}

/// Inline JSON when the value looks like an object or array, a file path otherwise.
fn load_json<T: DeserializeOwned>(raw: &str) -> Result<T, MediGuardError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    let text = std::fs::read_to_string(trimmed)?;
    Ok(serde_json::from_str(&text)?)
}

fn build_profile(args: &AskArgs) -> Result<UserProfile, MediGuardError> {
    let mut profile: UserProfile = match args.profile.as_deref() {
        Some(raw) => load_json(raw)?,
        None => UserProfile::default(),
    };
    if let Some(age) = &args.age {
        profile.age = age.trim().to_string();
    }
    if let Some(gender) = args.gender {
        profile.gender = gender.into();
    }
    if let Some(meds) = &args.meds {
        profile.current_meds = meds.clone();
    }
    if let Some(key) = &args.openfda_key {
        profile.open_fda_key = Some(key.clone());
    }
    Ok(profile)
}

fn load_history(raw: Option<&str>) -> Result<Vec<ChatMessage>, MediGuardError> {
    match raw {
        Some(raw) => load_json(raw),
        None => Ok(Vec::new()),
    }
}

async fn ask(args: AskArgs) -> anyhow::Result<String> {
    let message = args.message.join(" ");
    if message.trim().is_empty() {
        return Err(MediGuardError::InvalidArgument("Message is required".into()).into());
    }
    let profile = build_profile(&args)?;
    let history = load_history(args.history.as_deref())?;

    let engine = Engine::new(EngineConfig::from_env())?;
    let reply = engine
        .respond(&message, &history, &profile, &args.language)
        .await;

    if args.json {
        return Ok(crate::render::json::to_pretty(&reply)?);
    }
    Ok(reply.text)
}

/// Executes a parsed command and returns the text to print.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    match cli.command {
        Commands::Ask(args) => ask(args).await,
    }
}
