use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use li8n::{load_dictionary, load_segmenter, Config, Outcome, Pipeline, TerminalPrompt};

#[derive(Parser, Debug)]
#[command(
    name = "li8n",
    about = "Convert Simplified Chinese text files to Traditional Chinese",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Input file; defaults to `entry` in .li8nrc
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Working directory holding .li8nrc
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default .li8nrc to the working directory
    Init,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let workdir = match cli.dir {
        Some(dir) => dir,
        None => env::current_dir().context("cannot determine the working directory")?,
    };

    if let Some(Command::Init) = cli.command {
        let path = Config::write_default(&workdir).context("failed to write .li8nrc")?;
        tracing::debug!(path = %path.display(), "configuration written");
        println!("File Saved !");
        return Ok(());
    }

    let Some(config) = Config::load(&workdir).context("failed to load .li8nrc")? else {
        println!("{}", Outcome::MissingConfig.message());
        return Ok(());
    };
    let dictionary = load_dictionary(&workdir, &config).context("failed to load dictionary")?;
    let segmenter =
        load_segmenter(&workdir, &config, &dictionary).context("failed to load word list")?;
    let pipeline = Pipeline::new(workdir, dictionary, segmenter);

    let mut prompt = TerminalPrompt::stdio();
    let outcome = pipeline
        .run(&config, cli.file.as_deref(), &mut prompt)
        .context("conversion failed")?;
    if let Outcome::MissingInput(path) = &outcome {
        tracing::debug!(path = %path.display(), "input not found");
    }
    println!("{}", outcome.message());

    Ok(())
}
