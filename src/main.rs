use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
pub mod parser;
pub mod resolver;
pub mod source;
pub mod storage;

fn main() -> anyhow::Result<()> {
    run()
}
