use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;

use gridedit::cli::CliArgs;
use gridedit::config::Preferences;
use gridedit::messages::{AppMsg, Msg};
use gridedit::model::AppModel;
use gridedit::runtime::Runtime;

fn main() -> Result<()> {
    gridedit::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)
        .context("Invalid arguments")?;

    let preferences = Preferences::load();
    let header_row = config.header_row.unwrap_or(preferences.header_row);
    let model = AppModel::new(preferences).with_format(config.delimiter, header_row);

    let stdout = io::stdout().lock();
    let mut runtime = Runtime::new(model, stdout);

    if let Some(path) = config.file {
        tracing::info!("Opening {}", path.display());
        runtime.dispatch(Msg::App(AppMsg::OpenFile(path)))?;
    }

    match config.script {
        Some(script) => {
            let file = std::fs::File::open(&script)
                .with_context(|| format!("Failed to open script {}", script.display()))?;
            runtime.run(BufReader::new(file))?;
        }
        None => runtime.run(io::stdin().lock())?,
    }

    let (model, _) = runtime.into_parts();
    if model.document.is_modified {
        tracing::warn!("Exiting with unsaved changes in {}", model.document.display_name());
    }
    Ok(())
}
