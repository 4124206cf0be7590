use anyhow::{Context, Result};
use lipsync_compiler::core::config::Config;
use lipsync_compiler::core::io::{NativeStorage, Storage};
use lipsync_compiler::services::tts::create_tts_client;
use lipsync_compiler::{CompileError, ScriptCompiler};
use log::{error, info};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // 1. Load Config
    if !Path::new("config.yml").exists() {
        info!("config.yml not found, writing defaults");
        Config::default().save()?;
    }
    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("Please ensure 'config.yml' exists with a script_file entry.");
            return Err(e);
        }
    };

    config.ensure_directories()?;

    // 2. Read Script
    let storage = Arc::new(NativeStorage::new());
    if !storage.exists(&config.script_file).await? {
        anyhow::bail!("Script file {} not found.", config.script_file);
    }
    let bytes = storage
        .read(&config.script_file)
        .await
        .with_context(|| format!("Failed to read script {}", config.script_file))?;
    let script = String::from_utf8(bytes).context("Script is not valid UTF-8")?;

    // 3. Initialize TTS
    let tts = create_tts_client(&config)?;

    // 4. Compile
    let compiler = ScriptCompiler::new(tts, storage);
    let report = match compiler
        .compile(&script, Path::new(&config.output_folder))
        .await
    {
        Ok(report) => report,
        Err(CompileError::Parse(e)) => {
            if let Some(line) = e.line() {
                error!("Stopped at {} line {}", config.script_file, line);
            }
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "Wrote {} lines to {}",
        report.utterances.len(),
        config.output_folder
    );
    Ok(())
}
