//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use linklift_core::session::{ImportSession, SubmitOutcome, UploadPayload, UploadSink};
use linklift_core::{DisplayNode, build_display_tree};
use linklift_shared::{AppConfig, LinkTagStrategy, LinkliftError, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// linklift — lift browser bookmarks into a tag-organized library.
#[derive(Parser)]
#[command(
    name = "linklift",
    version,
    about = "Import browser bookmark exports as tag-organized upload payloads.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Parse an export, apply selection edits, and emit the upload payload.
    Import {
        /// Path to the exported bookmark file (.html).
        file: PathBuf,

        /// Link-tag strategy: folder-path, closed-folder, or other.
        /// Defaults to the configured strategy.
        #[arg(short, long)]
        strategy: Option<String>,

        /// Node key to uncheck (repeatable). Keys are shown by `inspect`;
        /// `<id>` is a folder, `<id>@` its direct bookmarks only.
        #[arg(long = "uncheck", value_name = "KEY")]
        unchecks: Vec<String>,

        /// Check exactly these tags instead of the defaults (repeatable).
        /// The fallback tag is always kept.
        #[arg(long = "tag", value_name = "NAME")]
        tags: Option<Vec<String>>,

        /// Write the payload JSON to this file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Parse an export and print the selectable folder tree with node keys.
    Inspect {
        /// Path to the exported bookmark file (.html).
        file: PathBuf,
    },

    /// Show how to export bookmarks from common browsers.
    Guide,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "linklift=info",
        1 => "linklift=debug",
        _ => "linklift=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Import {
            file,
            strategy,
            unchecks,
            tags,
            out,
        } => cmd_import(&file, strategy.as_deref(), &unchecks, tags, out).await,
        Command::Inspect { file } => cmd_inspect(&file).await,
        Command::Guide => cmd_guide(),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// import
// ---------------------------------------------------------------------------

async fn cmd_import(
    file: &PathBuf,
    strategy: Option<&str>,
    unchecks: &[String],
    tags: Option<Vec<String>>,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;
    let mut session = ImportSession::from_config(&config)?;

    if let Some(name) = strategy {
        let strategy: LinkTagStrategy = name.parse()?;
        session.set_strategy(strategy);
    }

    info!(file = %file.display(), strategy = %session.strategy(), "importing bookmark export");

    let spinner = spinner("Reading export");
    let loaded = session.load_file(file).await;
    spinner.finish_and_clear();
    loaded?;

    for key in unchecks {
        session.uncheck_key(key);
    }
    if let Some(tag_names) = tags {
        session.set_checked_tags(tag_names);
    }

    let total = session.bookmarks().len();
    let selected = session.wait_upload().len();
    let candidates = session.candidate_tags();
    let checked = session.checked_tags();

    println!();
    println!("  File:       {}", session.file_name().unwrap_or("?"));
    println!("  Folders:    {}", session.categories().len());
    println!("  Bookmarks:  {selected} of {total} selected");
    println!("  Strategy:   {}", session.strategy());
    println!(
        "  Tags:       {} checked of {} offered",
        checked.len(),
        candidates.len()
    );
    println!("  Checked:    {}", checked.join(", "));
    println!();

    match session.submit() {
        SubmitOutcome::Ready(payload) => {
            let sink = JsonSink { out };
            sink.deliver(&payload)?;
            Ok(())
        }
        SubmitOutcome::EmptySelection => {
            println!("  No bookmarks to upload; check the import configuration.");
            Ok(())
        }
    }
}

/// Delivers the payload as pretty JSON to a file or stdout. Stands in
/// for the upload service collaborator, which owns the actual submission.
struct JsonSink {
    out: Option<PathBuf>,
}

impl UploadSink for JsonSink {
    fn deliver(&self, payload: &UploadPayload) -> linklift_shared::Result<()> {
        let json = serde_json::to_string_pretty(payload)
            .map_err(|e| LinkliftError::validation(format!("payload serialization: {e}")))?;

        match &self.out {
            Some(path) => {
                std::fs::write(path, json).map_err(|e| LinkliftError::io(path, e))?;
                println!("  Payload written to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

async fn cmd_inspect(file: &PathBuf) -> Result<()> {
    let config = load_config()?;
    let mut session = ImportSession::from_config(&config)?;

    let spinner = spinner("Reading export");
    let loaded = session.load_file(file).await;
    spinner.finish_and_clear();
    loaded?;

    println!();
    println!("  File:      {}", session.file_name().unwrap_or("?"));
    println!("  Folders:   {}", session.categories().len());
    println!("  Bookmarks: {}", session.bookmarks().len());
    println!();

    if let Some(tree) = session.tree() {
        render_display_tree(&build_display_tree(tree));
    }

    println!();
    println!("  Offered tags: {}", session.candidate_tags().join(", "));
    Ok(())
}

/// Print the selectable tree with node keys, one line per node.
fn render_display_tree(root: &DisplayNode) {
    let mut stack: Vec<(&DisplayNode, usize)> = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        println!("  {}{}  [{}]", "  ".repeat(depth), node.label, node.key);
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}

// ---------------------------------------------------------------------------
// guide
// ---------------------------------------------------------------------------

fn cmd_guide() -> Result<()> {
    println!(
        "\
How to export your bookmarks

  Chrome / Edge / Brave
    1. Open the bookmark manager (Ctrl/Cmd+Shift+O).
    2. Open the ⋮ menu in the top-right corner.
    3. Choose \"Export bookmarks\" and save the .html file.

  Firefox
    1. Open the Library (Ctrl/Cmd+Shift+O) > Bookmarks.
    2. Choose \"Import and Backup\" > \"Export Bookmarks to HTML…\".

  Safari
    1. File > Export > Bookmarks….

Then run:

  linklift inspect <exported-file>.html
  linklift import <exported-file>.html
"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------------------

/// Spinner shown while the export is read and parsed.
fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("spinner template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}
