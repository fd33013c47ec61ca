//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use qgen_domain::{AppMode, DifficultySetting, OutputFormat, SortKey, StatusFilter};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Colored tables and summaries
    Table,
    /// JSON output
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Application mode the list is viewed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Generation view: history included, difficulty filtered
    Create,
    /// Review queue: history included, every difficulty
    Review,
    /// Database browser
    Database,
    /// Analytics
    Analytics,
}

impl From<ModeArg> for AppMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Create => AppMode::Create,
            ModeArg::Review => AppMode::Review,
            ModeArg::Database => AppMode::Database,
            ModeArg::Analytics => AppMode::Analytics,
        }
    }
}

/// Status tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    Accepted,
    Rejected,
    All,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => StatusFilter::Pending,
            StatusArg::Accepted => StatusFilter::Accepted,
            StatusArg::Rejected => StatusFilter::Rejected,
            StatusArg::All => StatusFilter::All,
        }
    }
}

/// Sort order for the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Default,
    Newest,
    Oldest,
    Language,
    Discipline,
    Difficulty,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Default => SortKey::Default,
            SortArg::Newest => SortKey::Newest,
            SortArg::Oldest => SortKey::Oldest,
            SortArg::Language => SortKey::Language,
            SortArg::Discipline => SortKey::Discipline,
            SortArg::Difficulty => SortKey::Difficulty,
        }
    }
}

/// Generation settings that can be overridden per command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Discipline, e.g. "Technical Art"
    #[arg(long)]
    pub discipline: Option<String>,

    /// Category such as "Easy MC", "Hard T/F" or "Balanced All"
    #[arg(long, value_parser = parse_difficulty)]
    pub difficulty: Option<DifficultySetting>,

    /// Target language
    #[arg(long)]
    pub language: Option<String>,

    /// Questions per generation batch
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub batch_size: Option<u16>,

    /// Name recorded on generated questions
    #[arg(long)]
    pub creator: Option<String>,

    /// Gemini model name
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,
}

impl SettingsArgs {
    pub fn is_empty(&self) -> bool {
        self.discipline.is_none()
            && self.difficulty.is_none()
            && self.language.is_none()
            && self.batch_size.is_none()
            && self.creator.is_none()
            && self.model.is_none()
            && self.temperature.is_none()
    }
}

fn parse_difficulty(s: &str) -> Result<DifficultySetting, String> {
    s.parse().map_err(|e: qgen_domain::DomainError| e.to_string())
}

/// CLI arguments for ue5-qgen
#[derive(Parser, Debug)]
#[command(name = "ue5-qgen")]
#[command(author, version, about = "Generate, review and translate UE5 training questions")]
#[command(long_about = r#"
ue5-qgen generates scenario-based Unreal Engine 5 questions with Gemini,
keeps them within per-category quotas, and lets you review, translate and
browse the collection.

Configuration files are loaded from (in priority order):
1. QGEN_* environment variables (e.g. QGEN_GEMINI__API_KEY)
2. --config <path>     Explicit config file
3. ./qgen.toml         Project-level config
4. ~/.config/ue5-qgen/config.toml   Global config

Example:
  ue5-qgen settings --creator "Sam" --discipline "Technical Art"
  ue5-qgen generate --difficulty "Medium MC" --batch-size 6
  ue5-qgen list --status pending --search nanite
  ue5-qgen translate 3f2a... --language French
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormatArg>,

    /// Application mode for list views
    #[arg(long, value_enum, default_value = "database", global = true)]
    pub mode: ModeArg,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List questions, one per logical question in the active language
    List {
        /// Status tab (remembered between runs)
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Search term (remembered between runs); pass "" to clear
        #[arg(long)]
        search: Option<String>,

        /// Include historical questions (remembered between runs)
        #[arg(long)]
        history: Option<bool>,

        /// Only questions created by the configured creator
        #[arg(long)]
        mine: bool,

        /// Only questions carrying one of these tags
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Show every language variant instead of one per question
        #[arg(long)]
        variants: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Show one question with all of its language variants
    Show {
        /// Question id, or position in the list (1-based)
        target: String,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Show progress toward the quota targets
    Quota {
        /// Also count historical questions
        #[arg(long)]
        history: bool,
    },

    /// Generate a batch of questions
    Generate {
        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Translate a question into another language
    Translate {
        /// Question id
        id: String,

        /// Target language
        #[arg(short, long)]
        language: String,
    },

    /// Accept a question
    Accept { id: String },

    /// Reject a question
    Reject {
        id: String,

        /// Why the question was rejected
        #[arg(short, long)]
        reason: Option<String>,
    },

    /// Put a question back to pending
    Requeue { id: String },

    /// Delete a single language variant
    Delete { id: String },

    /// Send every variant of a logical question back to review
    KickBack {
        /// The shared uniqueId
        unique_id: String,
    },

    /// Delete every pending question
    ClearPending {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },

    /// Accept human-verified questions with a high critique score
    AcceptVerified {
        /// Minimum critique score
        #[arg(long, default_value_t = 70)]
        threshold: u8,
    },

    /// Show or change the stored generation settings
    Settings {
        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Import questions from a JSON export
    Import {
        /// JSON file holding an array of questions
        file: PathBuf,

        /// Store as historical questions instead of working questions
        #[arg(long)]
        historical: bool,

        /// Replace the stored list instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Write non-rejected questions to CSV review sheets
    Export {
        /// Directory the sheets are written to
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// One sheet per language, discipline, level and type
        #[arg(long)]
        segmented: bool,

        /// Also export historical questions
        #[arg(long)]
        history: bool,

        /// Reviewer named in the sheet (defaults to the creator)
        #[arg(long)]
        reviewer: Option<String>,
    },

    /// Check cited sources and answers against their excerpts
    Validate {
        /// Only check this question
        id: Option<String>,

        /// Reject pending questions that fail a critical check
        #[arg(long, conflicts_with = "id")]
        reject: bool,
    },

    /// Delete all stored questions, settings and preferences
    Reset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}
