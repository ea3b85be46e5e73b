mod cli_config;
mod common;
mod logger;
mod markdown_rewriter;
mod program_actions;
mod run_config;

use clap::Parser;

use cli_config::{clap_cli_config::Opts, CLIRewriteInfo};
use logger::exit_error_log;
use program_actions::handle_rewrite_docs;
use run_config::{resolve_run_config, RewriteRunConfig};

fn main() {
  let given_options: Opts = Opts::parse();

  let run_config: RewriteRunConfig = match resolve_run_config(CLIRewriteInfo::from(given_options)) {
    Ok(config) => config,
    Err(failure) => exit_error_log(failure.extract_message())
  };

  if let Err(failure) = handle_rewrite_docs(&run_config) {
    exit_error_log(failure.extract_message());
  }
}
