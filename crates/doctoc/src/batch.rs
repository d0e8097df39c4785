use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "batch")]
#[command(about = "Process every layout dump in a directory")]
pub struct App {
    /// Directory containing *.json layout dumps
    pub input_dir: PathBuf,

    /// Directory to write outline JSON files into (created if absent)
    pub output_dir: PathBuf,
}

/// One row of the end-of-run summary.
#[derive(Debug)]
struct BatchRow {
    file: String,
    title: String,
    entries: usize,
    status: &'static str,
    elapsed_ms: u128,
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    let inputs = collect_inputs(&app.input_dir)?;
    if inputs.is_empty() {
        println!("No layout dumps found in {}", app.input_dir.display());
        return Ok(());
    }

    std::fs::create_dir_all(&app.output_dir)
        .wrap_err_with(|| f!("Failed to create {}", app.output_dir.display()))?;

    let bar = ProgressBar::new(inputs.len() as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);

    // One document per iteration; a failure is reported and skipped so the
    // rest of the batch still runs.
    let mut rows: Vec<BatchRow> = Vec::new();
    for input in &inputs {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        bar.set_message(name.clone());

        let started = Instant::now();
        match process_file(input, &app.output_dir) {
            Ok(result) => rows.push(BatchRow {
                file: name,
                title: result.title,
                entries: result.outline.len(),
                status: "ok",
                elapsed_ms: started.elapsed().as_millis(),
            }),
            Err(err) => {
                bar.suspend(|| eprintln!("{}: {:#}", input.display(), err));
                rows.push(BatchRow {
                    file: name,
                    title: String::new(),
                    entries: 0,
                    status: "failed",
                    elapsed_ms: started.elapsed().as_millis(),
                });
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let mut table = new_table();
    table.add_row(prettytable::row!["FILE", "TITLE", "ENTRIES", "STATUS", "TIME"]);
    for row in &rows {
        table.add_row(prettytable::row![
            row.file,
            row.title,
            row.entries,
            row.status,
            f!("{}ms", row.elapsed_ms)
        ]);
    }
    table.printstd();

    let failed = rows.iter().filter(|r| r.status == "failed").count();
    if failed > 0 {
        log::info!("{} of {} documents failed", failed, rows.len());
    }

    Ok(())
}

/// Every `.json` file directly inside `dir`, sorted by name so runs are
/// reproducible.
fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = Vec::new();
    for entry in
        std::fs::read_dir(dir).wrap_err_with(|| f!("Failed to read {}", dir.display()))?
    {
        let path = entry?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Process one layout dump: read, analyze, write `<stem>.json` into
/// `output_dir`. Any failure is isolated to this document.
fn process_file(input: &Path, output_dir: &Path) -> Result<outline::DocumentOutline> {
    let layout = crate::extract::read_layout(input)?;
    let result = outline::extract_outline(&layout).map_err(|e| eyre!(e))?;

    let stem = input.file_stem().ok_or_eyre("input file has no stem")?;
    let output_path = output_dir.join(stem).with_extension("json");
    std::fs::write(&output_path, serde_json::to_string_pretty(&result)? + "\n")
        .wrap_err_with(|| f!("Failed to write {}", output_path.display()))?;

    Ok(result)
}
