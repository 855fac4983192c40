//! prosaic — a context-aware hedging engine for machine-sounding prose.
//!
//! The engine rewrites overconfident declarative text into hedged academic
//! register without changing what it claims: a safety classifier decides
//! which sentences may be touched at all, a weighted selector applies one
//! of five hedging strategies, and a relationship analyzer merges adjacent
//! short sentences with a semantically correct connector. Citations are
//! sheltered behind opaque placeholders for the duration of the rewrite.
//!
//! ```no_run
//! use prosaic::config::RewriteConfig;
//! use prosaic::services::Rewriter;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), prosaic::ProsaicError> {
//! let rewriter = Rewriter::new(RewriteConfig::default())?;
//! let mut rng = StdRng::seed_from_u64(42);
//! let outcome = rewriter.rewrite("The study shows improvement.", &mut rng)?;
//! println!("{}", outcome.rewritten_text);
//! # Ok(())
//! # }
//! ```

pub mod annotate;
pub mod cli;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod models;
pub mod services;
pub mod utils;

pub use error::ProsaicError;
