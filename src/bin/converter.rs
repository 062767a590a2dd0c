use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use li8n::dictionary::source_files;
use li8n::Dictionary;

/// Builds the conversion table from OpenCC-style sources
/// (`STCharacters.txt`, `STPhrases.txt`, ...). Later files win on conflicts.
#[derive(Parser, Debug)]
#[command(name = "converter", version)]
struct Args {
    /// Directory containing the `*.txt` sources.
    input_dir: PathBuf,

    /// Directory receiving `zh2hant.tsv` and `zh2hant.tsv.zst`.
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    fs::create_dir_all(&args.output_dir).context("failed to create output directory")?;

    println!("Processing sources from {}...", args.input_dir.display());
    let sources = source_files(&args.input_dir)
        .with_context(|| format!("failed to list sources in {}", args.input_dir.display()))?;
    if sources.is_empty() {
        anyhow::bail!("no *.txt sources found in {}", args.input_dir.display());
    }

    let mut dict = Dictionary::new();
    for path in &sources {
        println!("Processing {:?}...", path);
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let source = Dictionary::from_source(&path.display().to_string(), &bytes)?;
        println!("  {} entries", source.len());
        dict.merge(source);
    }
    println!("Merged {} entries from {} files", dict.len(), sources.len());

    let tsv_path = args.output_dir.join("zh2hant.tsv");
    let file = File::create(&tsv_path).with_context(|| format!("failed to create {}", tsv_path.display()))?;
    dict.write_tsv(BufWriter::new(file))?;
    println!("Wrote {}", tsv_path.display());

    let zst_path = args.output_dir.join("zh2hant.tsv.zst");
    dict.write_compressed(&zst_path)
        .with_context(|| format!("failed to write {}", zst_path.display()))?;
    println!("Wrote {}", zst_path.display());

    println!("Conversion complete!");
    Ok(())
}
