use std::path::{Path, PathBuf};

use blocktree::render::NodeRow;
use blocktree::{Block, DocumentStore, Indentation, RowItem, TreeConfig, TreeEngine};
use clap::{Args, Parser, Subcommand};
use pagebuilder::config::{BackendConfig, ConfigError};
use pagebuilder::services::http::ServiceError;
use pagebuilder::services::metadata::MetadataClient;
use pagebuilder::services::metadata::import::fetch_artist_data;
use pagebuilder::services::theme::ThemeClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("artist import failed: {0}")]
    ImportFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "pagebuilder", about = "Page builder backend clients and block tree tools")]
struct Cli {
    #[arg(long, env = "METADATA_API_URL")]
    metadata_url: Option<String>,

    #[arg(long, env = "THEME_API_URL")]
    theme_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the project-import document for an artist.
    ImportArtist {
        name: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Theme(ThemeCommand),
    /// Print a document's block tree as an outline.
    Tree {
        document: PathBuf,
        #[arg(long)]
        expand_all: bool,
        #[arg(long)]
        fixed_indent: bool,
    },
}

#[derive(Args, Debug)]
struct ThemeCommand {
    #[command(subcommand)]
    command: ThemeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ThemeSubcommand {
    Generate {
        #[arg(long)]
        instruction: String,
        /// Project-import document (as written by `import-artist --out`).
        #[arg(long)]
        project: Option<PathBuf>,
    },
    Models,
    Pull {
        model: String,
    },
}

/// A tree document: either a full store snapshot or a bare root block.
#[derive(Deserialize)]
#[serde(untagged)]
enum TreeDocument {
    Store(DocumentStore),
    Root(Block),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = BackendConfig::from_env()?;
    if let Some(url) = &cli.metadata_url {
        config = config.with_metadata_api_url(url)?;
    }
    if let Some(url) = &cli.theme_url {
        config = config.with_theme_api_url(url)?;
    }

    match cli.command {
        Command::ImportArtist { name, out } => run_import(&config, &name, out.as_deref()).await,
        Command::Theme(theme) => run_theme(&config, theme).await,
        Command::Tree { document, expand_all, fixed_indent } => run_tree(&document, expand_all, fixed_indent),
    }
}

async fn run_import(config: &BackendConfig, name: &str, out: Option<&Path>) -> Result<(), CliError> {
    let client = MetadataClient::new(config)?;
    let result = fetch_artist_data(&client, name).await;
    let json = serde_json::to_value(&result)?;
    match out {
        Some(path) => {
            let rendered = serde_json::to_string_pretty(&json)?;
            std::fs::write(path, rendered).map_err(|source| CliError::Write { path: path.to_owned(), source })?;
            info!(path = %path.display(), "wrote import result");
        }
        None => print_json(&json)?,
    }
    if result.success {
        Ok(())
    } else {
        Err(CliError::ImportFailed(result.error.unwrap_or_default()))
    }
}

async fn run_theme(config: &BackendConfig, theme: ThemeCommand) -> Result<(), CliError> {
    let client = ThemeClient::new(config)?;
    let json = match theme.command {
        ThemeSubcommand::Generate { instruction, project } => {
            let project_data = match project {
                Some(path) => project_data_from(&read_json(&path)?),
                None => Value::Null,
            };
            client.generate_theme(&instruction, &project_data).await?
        }
        ThemeSubcommand::Models => client.list_models().await?,
        ThemeSubcommand::Pull { model } => client.pull_model(&model).await?,
    };
    print_json(&json)
}

/// Accept either a raw project document or a saved import result.
fn project_data_from(value: &Value) -> Value {
    match value.get("data") {
        Some(data) if value.get("success").is_some() => data.clone(),
        _ => value.clone(),
    }
}

fn run_tree(document: &Path, expand_all: bool, fixed_indent: bool) -> Result<(), CliError> {
    let store = match serde_json::from_value::<TreeDocument>(read_json(document)?)? {
        TreeDocument::Store(store) => store,
        TreeDocument::Root(root) => DocumentStore::new(root),
    };

    let mut config = TreeConfig::outline();
    if fixed_indent {
        config.indentation = Indentation::Fixed { step: blocktree::consts::FIXED_INDENT_STEP_PX };
    }
    let mut engine = TreeEngine::new(config);
    if expand_all {
        engine.state.expand_all(blocktree::EditorStore::root(&store));
    }

    for line in outline(&engine.rows(&store)) {
        println!("{line}");
    }
    Ok(())
}

fn outline(rows: &[RowItem]) -> Vec<String> {
    rows.iter()
        .map(|row| match row {
            RowItem::Node(node) => node_line(node),
            RowItem::EmptyDropZone { depth, .. } => format!("{}(empty)", pad(*depth)),
            RowItem::Picker { picker, depth, .. } => format!("{}+ {}", pad(*depth), picker.label()),
        })
        .collect()
}

fn node_line(node: &NodeRow) -> String {
    let marker = match (node.expandable, node.expanded) {
        (false, _) => ' ',
        (true, false) => '▸',
        (true, true) => '▾',
    };
    let mut line = format!("{}{marker} {}", pad(node.context.depth), node.name);
    for (on, tag) in [
        (node.selected, "selected"),
        (node.hidden, "hidden"),
        (node.has_interactions, "interactions"),
        (node.has_shared_style, "shared style"),
    ] {
        if on {
            line.push_str(&format!(" [{tag}]"));
        }
    }
    line
}

fn pad(depth: usize) -> String {
    "  ".repeat(depth)
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
