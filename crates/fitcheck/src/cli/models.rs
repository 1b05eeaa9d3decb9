//! The `fitcheck models` command for managing the CLIP model files.

use clap::{Args, Subcommand};
use fitcheck_core::{Config, OutfitAnalyzer};
use std::path::Path;

/// Arguments for the `models` command.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Subcommands for model management.
#[derive(Subcommand, Debug)]
pub enum ModelsCommand {
    /// Download required model files (CLIP vision + text towers + tokenizer)
    Download,

    /// List installed model files
    List,

    /// Show model directory path
    Path,
}

/// Hugging Face repo holding the ONNX export of the checkpoint we load.
const MODEL_REPO: &str = "Xenova/clip-vit-base-patch32";

/// One downloadable model file.
struct ModelFile {
    label: &'static str,
    remote_path: &'static str,
    local_name: &'static str,
}

const MODEL_FILES: &[ModelFile] = &[
    ModelFile {
        label: "CLIP vision tower",
        remote_path: "onnx/vision_model.onnx",
        local_name: "vision_model.onnx",
    },
    ModelFile {
        label: "CLIP text tower",
        remote_path: "onnx/text_model.onnx",
        local_name: "text_model.onnx",
    },
    ModelFile {
        label: "Tokenizer",
        remote_path: "tokenizer.json",
        local_name: "tokenizer.json",
    },
];

fn download_url(remote_path: &str) -> String {
    format!("https://huggingface.co/{MODEL_REPO}/resolve/main/{remote_path}")
}

/// Execute the models command.
pub async fn execute(args: ModelsArgs) -> anyhow::Result<()> {
    let config = Config::load()?;

    match args.command {
        ModelsCommand::Download => {
            let model_dir = OutfitAnalyzer::model_path(&config.model, &config.model_dir());
            std::fs::create_dir_all(&model_dir)?;

            tracing::info!(
                "Downloading {} (~600MB total) to {:?}",
                MODEL_REPO,
                model_dir
            );

            let client = reqwest::Client::new();
            for file in MODEL_FILES {
                let dest = model_dir.join(file.local_name);
                if dest.exists() {
                    tracing::info!("{} already exists at {:?}", file.label, dest);
                    continue;
                }

                let url = download_url(file.remote_path);
                tracing::info!("Downloading {}...", file.label);
                tracing::info!("  Source: {}", url);
                tracing::info!("  Destination: {:?}", dest);

                download_file(&client, &url, &dest).await?;

                let file_size = std::fs::metadata(&dest)?.len();
                tracing::info!(
                    "  {} complete ({:.1} MB)",
                    file.label,
                    file_size as f64 / (1024.0 * 1024.0)
                );
            }

            tracing::info!("All downloads complete.");
        }

        ModelsCommand::List => {
            let model_dir = OutfitAnalyzer::model_path(&config.model, &config.model_dir());

            if !model_dir.exists() {
                println!("No models installed.");
                println!("Run `fitcheck models download` to download required models.");
                return Ok(());
            }

            println!("Installed model files:");
            println!("  Directory: {}\n", model_dir.display());

            for file in MODEL_FILES {
                let path = model_dir.join(file.local_name);
                let status = if path.exists() {
                    "ready"
                } else {
                    "not installed"
                };
                println!("    - {:20} {}", file.local_name, status);
            }

            if OutfitAnalyzer::model_exists(&config.model, &config.model_dir()) {
                println!("\n  Ready to serve.");
            } else {
                println!("\n  Missing files. Run `fitcheck models download`.");
            }
        }

        ModelsCommand::Path => {
            let model_dir = config.model_dir();
            println!("{}", model_dir.display());
        }
    }

    Ok(())
}

/// Download a file from a URL to a local path, streaming to disk.
async fn download_file(client: &reqwest::Client, url: &str, dest: &Path) -> anyhow::Result<()> {
    use futures_util::StreamExt;
    use tokio::io::AsyncWriteExt;

    let response = client
        .get(url)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| anyhow::anyhow!("Download failed: {e}"))?;

    let total_size = response.content_length();
    if let Some(size) = total_size {
        tracing::info!("  Size: {:.1} MB", size as f64 / (1024.0 * 1024.0));
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(total) = total_size {
            if downloaded % (50 * 1024 * 1024) < chunk.len() as u64 {
                tracing::info!(
                    "  Progress: {:.0}%",
                    downloaded as f64 / total as f64 * 100.0
                );
            }
        }
    }

    file.flush().await?;
    Ok(())
}
