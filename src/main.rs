use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use vinaya_align::{AlignConfig, Aligner, LinkRewriter, MatchLocation, SegmentPathStore, SuffixStemmer};

#[derive(Parser, Debug)]
#[command(name = "vinaya-align")]
#[command(about = "Aligns quoted commentary terms with Pali root text")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Align every job in a JSON file of { id, terms, root_text } objects
    Align {
        /// Jobs file
        #[arg(long)]
        input: PathBuf,

        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// TOML file with engine options and extra override tables
        #[arg(long)]
        config: Option<PathBuf>,

        /// Abort on first alignment failure
        #[arg(long)]
        fail_fast: bool,
    },

    /// Print the stem of each word
    Stem {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Replace SuttaCentral links in markdown files with relative links
    RewriteLinks {
        /// Folder scanned for **/*.md
        folder: PathBuf,

        /// Segment store JSON, paths relative to the folder
        #[arg(long)]
        index: PathBuf,

        /// Suppress console progress bars
        #[arg(long)]
        no_progress: bool,
    },
}

/// One alignment request
#[derive(Debug, Deserialize)]
struct AlignJob {
    id: String,
    terms: Vec<Vec<String>>,
    root_text: Vec<Vec<String>>,
}

/// Outcome of one alignment request
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AlignOutcome {
    Matched { id: String, matches: Vec<MatchLocation> },
    Failed { id: String, error: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging keeps batch runs greppable; stdout carries results
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Align {
            input,
            output,
            config,
            fail_fast,
        } => run_align(&input, output.as_deref(), config.as_deref(), fail_fast).await,
        Command::Stem { words } => {
            let stemmer = SuffixStemmer::shared();
            for word in &words {
                println!("{}\t{}", word, stemmer.stem(word));
            }
            Ok(())
        }
        Command::RewriteLinks {
            folder,
            index,
            no_progress,
        } => run_rewrite_links(&folder, &index, no_progress).await,
    }
}

async fn run_align(input: &Path, output: Option<&Path>, config: Option<&Path>, fail_fast: bool) -> Result<()> {
    let config = match config {
        Some(path) => AlignConfig::load(path)?,
        None => AlignConfig::default(),
    };
    let tables = config.override_tables();
    let aligner = Aligner::new(&tables, config.alignment);
    info!(
        cursor = ?config.alignment.cursor,
        compounds = tables.compound_count(),
        manual_overrides = tables.manual_count(),
        "Alignment engine ready"
    );

    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read jobs file {}", input.display()))?;
    let jobs: Vec<AlignJob> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid jobs file {}", input.display()))?;
    info!("Loaded {} alignment jobs", jobs.len());

    let mut outcomes = Vec::with_capacity(jobs.len());
    let mut failures = 0;
    for job in jobs {
        match aligner.align(&job.terms, &job.root_text) {
            Ok(matches) => outcomes.push(AlignOutcome::Matched { id: job.id, matches }),
            Err(e) => {
                warn!(id = %job.id, error = %e, "Alignment failed");
                if fail_fast {
                    anyhow::bail!("Alignment failed for {}: {}", job.id, e);
                }
                failures += 1;
                outcomes.push(AlignOutcome::Failed {
                    id: job.id,
                    error: e.to_string(),
                });
            }
        }
    }

    let rendered = serde_json::to_string_pretty(&outcomes)?;
    match output {
        Some(path) => tokio::fs::write(path, rendered)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }

    info!("Alignment completed: {} jobs, {} failed", outcomes.len(), failures);
    Ok(())
}

async fn run_rewrite_links(folder: &Path, index: &Path, no_progress: bool) -> Result<()> {
    if !folder.is_dir() {
        anyhow::bail!("Not a directory: {}", folder.display());
    }

    let json = tokio::fs::read_to_string(index)
        .await
        .with_context(|| format!("Failed to read segment index {}", index.display()))?;
    let store = SegmentPathStore::from_json(&json, folder)?;
    info!("Loaded {} segment index entries", store.len());

    let progress = if no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} files | ETA: {eta}")?,
        );
        bar
    };

    let rewriter = LinkRewriter::new(&store)?;
    let summary = rewriter.rewrite_folder(folder, &progress).await?;

    println!(
        "Rewrote {} links in {} of {} markdown files",
        summary.links_rewritten, summary.files_changed, summary.files_scanned
    );
    Ok(())
}
