//! Declarative prune runs
//!
//! A prune spec is a small YAML file naming a gate snapshot and the budget,
//! gate shaping and device of one run.
//!
//! # Usage
//!
//! ```bash
//! podar validate prune.yaml
//! podar threshold prune.yaml --budget 0.4
//! podar finetune prune.yaml --output pruned.yaml
//! ```

mod cli;
mod loader;
mod schema;
mod validate;


pub use cli::{
    parse_args, Cli, Command, FinetuneArgs, PruneArgs, StatsArgs, ThresholdArgs, ValidateArgs,
};
pub use loader::{load_spec, parse_spec};
pub use schema::PruneSpec;
pub use validate::{parse_device, validate_spec, SpecError};
