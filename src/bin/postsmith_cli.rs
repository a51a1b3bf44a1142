// Copyright 2026 The Postsmith Project
// SPDX-License-Identifier: Apache-2.0

// postsmith-cli: generate content from the terminal.
//
// Usage:
//   postsmith-cli                                   (asks for both inputs)
//   postsmith-cli --profession Baker --prompt "sourdough launch"
//   postsmith-cli --profession Baker --prompt "..." --out-dir ./images --json
//   postsmith-cli --batch posts.xlsx --out-dir ./reports

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use futures_util::StreamExt;
use tracing_subscriber::EnvFilter;

use postsmith::batch::{self, BatchRunner};
use postsmith::chunk::Chunk;
use postsmith::classify::ClassifierState;
use postsmith::config::{self, ConfigSource};
use postsmith::gemini::{GeminiClient, GenerationClient};
use postsmith::media::ImageSaver;
use postsmith::prompt::ContentRequest;

#[derive(Parser)]
#[command(
    name = "postsmith-cli",
    about = "Stream generated titles, description, hashtags and an image to the terminal."
)]
struct Cli {
    /// Path to the config file. Falls back to $POSTSMITH_CONFIG, then ./postsmith.yaml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Profession to write for. Asked interactively when omitted.
    #[arg(long)]
    profession: Option<String>,

    /// Topic prompt. Asked interactively when omitted.
    #[arg(long)]
    prompt: Option<String>,

    /// Generate one post per row of a .csv/.xlsx/.xls/.ods sheet instead.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["profession", "prompt"])]
    batch: Option<PathBuf>,

    /// Directory generated images and batch reports are written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Print the result (or every batch row) as JSON when done.
    #[arg(long)]
    json: bool,
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("failed to serialize result: {e}");
            std::process::exit(1);
        }
    }
}

fn ask(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{label}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn input_or_ask(value: Option<String>, label: &str) -> String {
    match value {
        Some(v) => v,
        None => match ask(label) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("failed to read from stdin: {e}");
                std::process::exit(1);
            }
        },
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .init();

    let source = config::FileSource::locate(cli.config.clone());
    let config = match config::load_config(&source) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(path = %source.describe(), "failed to load config: {e}");
            std::process::exit(1);
        }
    };

    let client: Arc<dyn GenerationClient> = Arc::new(GeminiClient::new(config.gemini));

    match cli.batch.clone() {
        Some(sheet) => run_batch(&cli, &sheet, client).await,
        None => run_single(cli, client).await,
    }
}

async fn run_batch(cli: &Cli, sheet: &std::path::Path, client: Arc<dyn GenerationClient>) {
    let rows = match batch::read_rows(sheet) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(sheet = %sheet.display(), "{e}");
            std::process::exit(1);
        }
    };
    tracing::info!(sheet = %sheet.display(), rows = rows.len(), model = %client.model(), "generating batch");

    let runner = match BatchRunner::new(client) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    let reports = match runner
        .run(&rows, |p| eprintln!("Generating... {}% ({}/{})", p.percent(), p.done, p.total))
        .await
    {
        Ok(reports) => reports,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    match batch::write_report(&cli.out_dir, sheet, &reports) {
        Ok(path) => println!("Report saved to: {}", path.display()),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }

    if cli.json {
        print_json(&reports);
    }
}

async fn run_single(cli: Cli, client: Arc<dyn GenerationClient>) {
    let profession = input_or_ask(cli.profession, "Enter the profession: ");
    let prompt = input_or_ask(cli.prompt, "Enter the prompt: ");

    let Some(request) = ContentRequest::new(profession, prompt) else {
        tracing::error!("both a profession and a prompt are required");
        std::process::exit(2);
    };

    tracing::info!(model = %client.model(), "generating");

    let mut stream = match client.stream(&request.instruction()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("generation failed: {e}");
            std::process::exit(1);
        }
    };

    let mut saver = ImageSaver::new(&cli.out_dir);
    let mut state = ClassifierState::new();

    while let Some(item) = stream.next().await {
        let chunk = match item {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("generation failed: {e}");
                std::process::exit(1);
            }
        };

        match &chunk {
            Chunk::InlineData(inline) if !inline.data.is_empty() => {
                match saver.save(inline) {
                    Ok(path) => println!("File saved to: {}", path.display()),
                    Err(e) => {
                        tracing::error!("{e}");
                        std::process::exit(1);
                    }
                }
            }
            Chunk::Text(text) => println!("{text}"),
            _ => {}
        }

        state.apply(&chunk);
    }

    if cli.json {
        print_json(&state.finish());
    }
}
