use std::path::{Path, PathBuf};

use crate::prelude::{println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "extract")]
#[command(about = "Extract the outline of a single parsed document")]
pub struct App {
    /// Path to the layout dump (JSON serialization of the parsed pages)
    pub path: PathBuf,

    /// Output file path (if omitted, prints JSON to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    let layout = read_layout(&app.path)?;
    let result = outline::extract_outline(&layout).map_err(|e| eyre!(e))?;

    let json = serde_json::to_string_pretty(&result)?;
    match app.output {
        Some(path) => std::fs::write(path, json + "\n")?,
        None => println!("{}", json),
    }
    Ok(())
}

/// Read and deserialize a layout dump.
pub fn read_layout(path: &Path) -> Result<outline::DocumentLayout> {
    let data = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| Error::MalformedLayout(e.to_string()))
        .wrap_err_with(|| f!("Failed to parse layout dump {}", path.display()))
}
