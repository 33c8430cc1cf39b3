//! Study AI CLI: upload a PDF through the frontend server's proxy route.
//!
//! Set STUDYAI_API_URL (or API_URL), or pass --api-url.

use anyhow::Context;
use clap::{Parser, Subcommand};
use studyai_api_client::{load_file, ApiClient};
use studyai_cli::{follow_upload, init_tracing, select_file, upload_bar};
use studyai_core::{TransferProgress, ValidationError};
use studyai_ui::{HomePage, UrlInput};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "studyai", about = "Study AI CLI: instant quizzes from PDFs")]
struct Cli {
    /// Base URL of the Study AI server
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF and print the backend's reply
    Upload {
        /// Path to the PDF
        file: std::path::PathBuf,
    },
    /// Generate a quiz from a web page
    Generate {
        /// Page URL
        #[arg(long)]
        url: String,
    },
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn upload(page: &HomePage<ApiClient>, path: &std::path::Path) -> anyhow::Result<()> {
    let file = load_file(path).await?;
    let mut dropzone = select_file(file.clone())?;
    dropzone.generate()?;

    let bar = upload_bar(file.size(), file.name());
    let (tx, rx) = mpsc::unbounded_channel::<TransferProgress>();

    let (outcome, ()) = tokio::join!(
        page.handle_file_select_with_progress(file, tx),
        follow_upload(&mut dropzone, &bar, rx)
    );

    match outcome {
        Ok(reply) => {
            dropzone.complete();
            bar.finish_with_message(dropzone.button_label());
            print_json(&reply.into_value())
        }
        Err(e) => {
            dropzone.fail(e.to_string());
            bar.abandon_with_message(e.to_string());
            Err(e.into())
        }
    }
}

async fn generate(page: &HomePage<ApiClient>, url: String) -> anyhow::Result<()> {
    let mut submitted = None;
    let mut input = UrlInput::new(|url| submitted = Some(url));
    input.set_value(url);
    input.submit();
    drop(input);

    let url = submitted.ok_or(ValidationError::NothingToGenerate)?;
    let reply = page.handle_url_generate(&url).await?;
    print_json(&reply.into_value())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = match cli.api_url {
        Some(url) => ApiClient::new(url),
        None => ApiClient::from_env(),
    }
    .context("Failed to create API client. Set STUDYAI_API_URL (or API_URL) or pass --api-url")?;
    let page = HomePage::new(client);

    match cli.command {
        Commands::Upload { file } => upload(&page, &file).await?,
        Commands::Generate { url } => generate(&page, url).await?,
    }

    Ok(())
}
