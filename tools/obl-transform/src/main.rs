mod batch;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use obl_relabel::{CaselessPolicy, DescentPolicy, ObliqueRelabeler, RelabelConfig, RelationMatch};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::batch::{survey_partition, transform_partition, CorpusLayout};

#[derive(Parser)]
#[command(author, version, about = "Relabels UD obliques from SNACS supersense tags")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite obliques and write the processed treebanks
    Transform {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        policy: PolicyArgs,

        #[arg(short, long, value_name = "DIR", default_value = "conllu-processed")]
        output_dir: PathBuf,

        /// Write misaligned sentences unchanged instead of aborting
        #[arg(long)]
        skip_misaligned: bool,
    },
    /// Count obliques by reduced tag and decision
    Survey {
        #[command(flatten)]
        corpus: CorpusArgs,

        #[command(flatten)]
        policy: PolicyArgs,
    },
}

#[derive(Args)]
struct CorpusArgs {
    #[arg(long, value_name = "DIR", default_value = "conllu")]
    conllu_dir: PathBuf,

    #[arg(long, value_name = "DIR", default_value = "snacs-output")]
    annotations_dir: PathBuf,

    #[arg(long, default_value = "en_ewt-ud")]
    prefix: String,

    #[arg(long, value_delimiter = ',', default_value = "train,dev,test")]
    partitions: Vec<String>,
}

#[derive(Args)]
struct PolicyArgs {
    /// JSON file holding a relabel configuration; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    caseless: Option<CaselessPolicy>,

    #[arg(long, value_enum)]
    descent: Option<DescentPolicy>,

    #[arg(long, value_enum)]
    matching: Option<RelationMatch>,
}

impl PolicyArgs {
    fn resolve(&self) -> anyhow::Result<RelabelConfig> {
        let mut config: RelabelConfig = match &self.config {
            Some(path) => {
                let data = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {:?}", path))?;
                serde_json::from_str(&data)
                    .with_context(|| format!("Invalid config {:?}", path))?
            }
            None => RelabelConfig::default(),
        };
        if let Some(caseless) = self.caseless {
            config.caseless = caseless;
        }
        if let Some(descent) = self.descent {
            config.descent = descent;
        }
        if let Some(matching) = self.matching {
            config.matching = matching;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Command::Transform {
            corpus,
            policy,
            output_dir,
            skip_misaligned,
        } => {
            let relabeler = ObliqueRelabeler::new(policy.resolve()?);
            info!(config = ?relabeler.config(), "Relabeling obliques");
            let layout = corpus.layout(output_dir);

            for partition in &corpus.partitions {
                let report = transform_partition(&layout, partition, &relabeler, skip_misaligned)?;
                for (relabel, count) in &report.relabeled {
                    info!(
                        partition = partition.as_str(),
                        relabel = relabel.as_str(),
                        count,
                        "Relabeled obliques"
                    );
                }
            }
        }
        Command::Survey { corpus, policy } => {
            let relabeler = ObliqueRelabeler::new(policy.resolve()?);
            let layout = corpus.layout(PathBuf::new());

            println!("partition\treduced\tdecision\tcount");
            for partition in &corpus.partitions {
                let report = survey_partition(&layout, partition, &relabeler)?;
                info!(partition = partition.as_str(), sentences = report.sentences, "Surveyed partition");
                for ((reduced, decision), count) in &report.counts {
                    println!("{}\t{}\t{}\t{}", partition, reduced, decision, count);
                }
            }
        }
    }

    Ok(())
}

impl CorpusArgs {
    fn layout(&self, output_dir: PathBuf) -> CorpusLayout {
        CorpusLayout {
            conllu_dir: self.conllu_dir.clone(),
            annotations_dir: self.annotations_dir.clone(),
            output_dir,
            prefix: self.prefix.clone(),
        }
    }
}
