use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy)]
pub enum CLIProcessingOrderIn {
  /// Process files in lexicographic path order
  Sorted,
  /// Process files in the order the directory walk finds them
  Discovery
}

/// Wrap backslash-containing lines of generated API markdown in inline code spans.
///
/// For every matched file, each line holding a backslash has the text before its last
/// backslash wrapped in backticks. That backslash is dropped and the rest of the line is kept.
#[derive(Parser)]
#[command(version)]
pub struct Opts {
  /// Glob selecting the markdown files to rewrite. Falls back to the config file,
  /// then to doc/api/*.md
  pub pattern: Option<String>,

  /// Resolve the pattern (and look for md_rewrite.yaml) relative to this directory
  #[arg(short = 'C', long = "root")]
  pub root_dir: Option<String>,

  /// Read settings from this YAML file instead of <root>/md_rewrite.yaml
  #[arg(long = "config")]
  pub config_file: Option<String>,

  /// Report the files and lines that would change without writing anything
  #[arg(short = 'n', long)]
  pub dry_run: bool,

  /// Order in which matched files are processed
  #[arg(value_enum, long)]
  pub order: Option<CLIProcessingOrderIn>,

  /// Only print warnings and errors
  #[arg(short, long)]
  pub quiet: bool
}
