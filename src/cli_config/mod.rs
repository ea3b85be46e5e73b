use crate::markdown_rewriter::ProcessingOrder;

use self::clap_cli_config::{CLIProcessingOrderIn, Opts};
pub mod clap_cli_config;

pub struct CLIRewriteInfo {
  pub pattern: Option<String>,
  pub root_dir: Option<String>,
  pub config_file: Option<String>,
  pub order: Option<ProcessingOrder>,
  pub dry_run: bool,
  pub quiet: bool
}

impl From<Opts> for CLIRewriteInfo {
  fn from(opts: Opts) -> Self {
    return CLIRewriteInfo {
      pattern: opts.pattern,
      root_dir: opts.root_dir,
      config_file: opts.config_file,
      order: convert_given_order(&opts.order),
      dry_run: opts.dry_run,
      quiet: opts.quiet
    }
  }
}

fn convert_given_order(given_order: &Option<CLIProcessingOrderIn>) -> Option<ProcessingOrder> {
  return given_order.as_ref().map(|given_processing_order| {
    match given_processing_order {
      CLIProcessingOrderIn::Sorted => ProcessingOrder::Sorted,
      CLIProcessingOrderIn::Discovery => ProcessingOrder::Discovery
    }
  });
}
