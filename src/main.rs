use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sieve::{run, PriorKind, RunConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Train a Naive Bayes spam filter on `label<TAB>text` data and evaluate it.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML file with run settings; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Training data
    #[arg(long)]
    train: Option<PathBuf>,

    /// Test data; when omitted the training data is split
    #[arg(long)]
    test: Option<PathBuf>,

    /// Where to write `text<TAB>label` predictions
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum corpus occurrences for a vocabulary word
    #[arg(long)]
    cutoff: Option<usize>,

    #[arg(long, value_enum)]
    prior: Option<PriorKind>,

    /// Class id reported as positive in the metrics
    #[arg(long)]
    positive_class: Option<usize>,

    /// Fraction held out for testing when no test file is given
    #[arg(long)]
    test_ratio: Option<f64>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_path(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if self.train.is_some() {
            config.train = self.train;
        }
        if self.test.is_some() {
            config.test = self.test;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if let Some(cutoff) = self.cutoff {
            config.cutoff = cutoff;
        }
        if let Some(prior) = self.prior {
            config.prior = prior;
        }
        if let Some(positive_class) = self.positive_class {
            config.positive_class = positive_class;
        }
        if let Some(test_ratio) = self.test_ratio {
            config.test_ratio = test_ratio;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sieve=info,sieve_models=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting sieve v{}", env!("CARGO_PKG_VERSION"));

    let config = Cli::parse().into_config()?;
    let summary = run(&config).context("spam filter run failed")?;

    println!(
        "trained on {} messages, tested on {}, vocabulary size {}",
        summary.train_size, summary.test_size, summary.vocabulary_size
    );
    println!("{}", summary.report);

    Ok(())
}
