use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edupress::content::{normalize, parse_object, ContentKind};
use edupress::generation::{build_prompt, decode_response, GenerationRequest};
use edupress::layout::DocumentArtifact;
use edupress::{build_document, build_text_sheet, DocumentSettings};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "edupress",
    about = "Print-ready lesson plans, flashcards, tests and exam papers",
    version,
    author
)]
struct Cli {
    /// Log layout decisions (page breaks, fallbacks) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a content JSON file to PDF
    Render {
        /// Document kind: lesson, flashcards, assessment or exam
        kind: ContentKind,

        /// Content JSON file
        input: PathBuf,

        /// Output file (defaults to the document's own file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write content streams uncompressed
        #[arg(long)]
        no_compress: bool,

        /// Print the placement trace as JSON
        #[arg(long)]
        placements: bool,
    },

    /// Print the normalized form of a content JSON file
    Normalize {
        /// Document kind: lesson, flashcards, assessment or exam
        kind: ContentKind,

        /// Content JSON file
        input: PathBuf,
    },

    /// Render a plain-text file as a titled sheet
    Sheet {
        /// Sheet title
        #[arg(short, long)]
        title: String,

        /// Text file
        input: PathBuf,

        /// Output file (defaults to "<title>.pdf")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the prompt for a generation request as JSON
    Prompt {
        /// Generation request JSON file
        request: PathBuf,

        /// Syllabus reference text for the grade and subject
        #[arg(short, long)]
        syllabus: Option<PathBuf>,
    },

    /// Decode a saved content-service reply against its request and render it
    Decode {
        /// Generation request JSON file
        request: PathBuf,

        /// Reply text file
        reply: PathBuf,

        /// Output file (defaults to the document's own file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("edupress=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("edupress=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = read_text(path)?;
    parse_object(&text).with_context(|| format!("{} does not hold a JSON object", path.display()))
}

fn read_request(path: &Path) -> Result<GenerationRequest> {
    let text = read_text(path)?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid generation request", path.display()))
}

fn write_artifact(artifact: &DocumentArtifact, output: Option<PathBuf>) -> Result<PathBuf> {
    let path = output.unwrap_or_else(|| PathBuf::from(&artifact.file_name));
    artifact
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), pages = artifact.page_count, "wrote document");
    Ok(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            kind,
            input,
            output,
            no_compress,
            placements,
        } => {
            let raw = read_json(&input)?;
            let settings = if no_compress {
                DocumentSettings::uncompressed()
            } else {
                DocumentSettings::default()
            };

            let artifact = build_document(&normalize(kind, &raw), &settings)
                .with_context(|| format!("failed to build {kind} document"))?;
            let path = write_artifact(&artifact, output)?;

            if placements {
                println!("{}", serde_json::to_string_pretty(&artifact.placements)?);
            } else {
                println!("{} ({} pages)", path.display(), artifact.page_count);
            }
        }

        Commands::Normalize { kind, input } => {
            let raw = read_json(&input)?;
            println!("{}", serde_json::to_string_pretty(&normalize(kind, &raw))?);
        }

        Commands::Sheet {
            title,
            input,
            output,
        } => {
            let content = read_text(&input)?;
            let artifact = build_text_sheet(&title, &content, &DocumentSettings::default())?;
            let path = write_artifact(&artifact, output)?;
            println!("{} ({} pages)", path.display(), artifact.page_count);
        }

        Commands::Prompt { request, syllabus } => {
            let request = read_request(&request)?;
            let syllabus = syllabus.as_deref().map(read_text).transpose()?;
            let prompt = build_prompt(&request, syllabus.as_deref());
            println!("{}", serde_json::to_string_pretty(&prompt)?);
        }

        Commands::Decode {
            request,
            reply,
            output,
        } => {
            let request = read_request(&request)?;
            let reply = read_text(&reply)?;
            let content = decode_response(&request, Some(&reply))
                .context("the reply could not be used")?;
            let artifact = build_document(&content, &DocumentSettings::default())?;
            let path = write_artifact(&artifact, output)?;
            println!("{} ({} pages)", path.display(), artifact.page_count);
        }
    }

    Ok(())
}
