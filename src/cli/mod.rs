//! CLI interface for prosaic.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::{RewriteConfig, StyleProfile};
use crate::models::AppliedRule;
use crate::services::Rewriter;

/// prosaic - hedges machine-sounding prose without breaking its meaning
#[derive(Parser)]
#[command(name = "prosaic", version, about, long_about = None)]
pub struct Cli {
    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite a document (hedging, transitions, sentence combining)
    Rewrite {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Named probability preset
        #[arg(long, value_enum)]
        style: Option<StyleProfile>,

        /// TOML config file; overridden by --style and the flags below
        #[arg(long, env = "PROSAIC_CONFIG")]
        config: Option<PathBuf>,

        /// Override the per-sentence hedging probability
        #[arg(long)]
        hedging: Option<f64>,

        /// Override the adjacent-sentence combine probability
        #[arg(long)]
        combine: Option<f64>,

        /// Override the transition-insertion probability
        #[arg(long)]
        transitions: Option<f64>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print counts and the per-sentence rule log to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Per-sentence protection analysis without rewriting
    Inspect {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

pub fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Rewrite {
            file,
            style,
            config,
            hedging,
            combine,
            transitions,
            seed,
            stats,
        } => {
            let text = read_input(file.as_deref())?;
            let mut cfg = match (style, config) {
                (Some(style), _) => RewriteConfig::from_style(*style),
                (None, Some(path)) => RewriteConfig::from_toml_file(path)?,
                (None, None) => RewriteConfig::default(),
            };
            if let Some(p) = hedging {
                cfg.hedging_probability = *p;
            }
            if let Some(p) = combine {
                cfg.sentence_combine_probability = *p;
            }
            if let Some(p) = transitions {
                cfg.transition_probability = *p;
            }

            let rewriter = Rewriter::new(cfg)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(*seed),
                None => StdRng::from_entropy(),
            };
            let outcome = rewriter.rewrite(&text, &mut rng)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.rewritten_text);
            }
            if *stats {
                print_stats(&outcome);
            }
        }
        Commands::Inspect { file } => {
            let text = read_input(file.as_deref())?;
            let rewriter = Rewriter::new(RewriteConfig::default())?;
            let report = rewriter.inspect(&text)?;

            if cli.json {
                let entries: Vec<InspectEntry> = report
                    .iter()
                    .map(|(sentence, flags)| InspectEntry {
                        text: sentence.text(),
                        flags: flags.raised(),
                        main_verb: sentence.main_verb().map(|t| t.text.clone()),
                        subject: sentence.subject().map(|t| t.text.clone()),
                        word_count: sentence.word_count(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for (sentence, flags) in &report {
                    let raised = flags.raised();
                    let marker = if flags.blocks_sentence() || flags.literal_verb {
                        "protected".red()
                    } else {
                        "eligible".green()
                    };
                    println!("{} {}", marker, sentence.text());
                    if let Some(verb) = sentence.main_verb() {
                        let subject = sentence
                            .subject()
                            .map(|t| t.text.as_str())
                            .unwrap_or("-");
                        println!("  verb: {}  subject: {}", verb.text.cyan(), subject.cyan());
                    }
                    if !raised.is_empty() {
                        println!("  flags: {}", raised.join(", ").yellow());
                    }
                }
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct InspectEntry {
    text: String,
    flags: Vec<&'static str>,
    main_verb: Option<String>,
    subject: Option<String>,
    word_count: usize,
}

fn read_input(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("cannot read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_stats(outcome: &crate::models::RewriteOutcome) {
    eprintln!(
        "{} {} -> {} words, {} -> {} sentences",
        "stats:".bold(),
        outcome.original_word_count,
        outcome.rewritten_word_count,
        outcome.original_sentence_count,
        outcome.rewritten_sentence_count,
    );
    for entry in &outcome.log {
        let rules: Vec<String> = entry
            .rules
            .iter()
            .map(|rule| match rule {
                AppliedRule::Unchanged => "unchanged".to_string(),
                AppliedRule::Hedged(strategy) => format!("hedged:{}", strategy.name()),
                AppliedRule::Transitioned => "transitioned".to_string(),
                AppliedRule::Combined(rel) => format!("combined:{:?}", rel).to_lowercase(),
            })
            .collect();
        eprintln!("  [{}] {}", entry.index, rules.join(", ").dimmed());
    }
}
