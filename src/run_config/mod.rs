mod raw_config_in;

use std::{fs, path::{Path, PathBuf}};

use colored::Colorize;

use crate::{cli_config::CLIRewriteInfo, markdown_rewriter::{RewriteFailure, RewriteOptions, DEFAULT_MARKDOWN_PATTERN}};

pub use raw_config_in::RawRewriteConfig;

#[derive(Debug)]
pub struct RewriteRunConfig {
  pub root_dir: PathBuf,
  pub pattern: String,
  pub options: RewriteOptions,
  pub warn_on_rewrapped_lines: bool,
  pub quiet: bool
}

fn file_variants(
  root_dir: &Path,
  file_name_no_extension: &str,
  possible_extensions: Vec<&str>
) -> Vec<PathBuf> {
  let base_file_path: PathBuf = root_dir.join(file_name_no_extension);

  return possible_extensions
    .iter()
    .map(|extension| base_file_path.with_extension(extension))
    .collect();
}

pub fn config_names_from_dir(root_dir: &Path) -> Vec<PathBuf> {
  return file_variants(root_dir, "md_rewrite", vec!["yaml", "yml"]);
}

fn parse_config_file(config_path: &Path) -> Result<RawRewriteConfig, RewriteFailure> {
  let config_file_contents: String = fs::read_to_string(config_path)
    .map_err(|err| RewriteFailure::Config(format!(
      "Failed to read config file '{}': {}",
      config_path.to_string_lossy(),
      err
    )))?;

  // serde_yaml rejects an empty document for a struct, but an empty file just means "no overrides".
  if config_file_contents.trim().is_empty() {
    return Ok(RawRewriteConfig::default());
  }

  return serde_yaml::from_str::<RawRewriteConfig>(&config_file_contents)
    .map_err(|err| RewriteFailure::Config(format!(
      "{} loading {}:\n\t{}",
      "Error".red(),
      config_path.to_string_lossy().yellow(),
      err
    )));
}

/// Loads the explicitly given config file, or else the first md_rewrite.yaml/.yml found in
/// `root_dir`. An explicitly given file must exist; a missing default one is not an error.
pub fn load_raw_config(
  root_dir: &Path,
  explicit_config: Option<&Path>
) -> Result<Option<RawRewriteConfig>, RewriteFailure> {
  if let Some(config_path) = explicit_config {
    if !config_path.is_file() {
      return Err(RewriteFailure::Config(format!(
        "The config file '{}' does not exist.",
        config_path.to_string_lossy()
      )));
    }

    return parse_config_file(config_path).map(Some);
  }

  for possible_config_file in config_names_from_dir(root_dir) {
    if possible_config_file.is_file() {
      return parse_config_file(&possible_config_file).map(Some);
    }
  }

  return Ok(None);
}

fn merge_run_config(
  cli_info: CLIRewriteInfo,
  root_dir: PathBuf,
  raw_config: RawRewriteConfig
) -> RewriteRunConfig {
  let pattern: String = cli_info.pattern
    .or(raw_config.pattern)
    .unwrap_or_else(|| DEFAULT_MARKDOWN_PATTERN.to_string());

  return RewriteRunConfig {
    root_dir,
    pattern,
    options: RewriteOptions {
      order: cli_info.order
        .or(raw_config.order)
        .unwrap_or_default(),
      dry_run: cli_info.dry_run
    },
    warn_on_rewrapped_lines: raw_config.warn_on_rewrapped_lines.unwrap_or(true),
    quiet: cli_info.quiet
  }
}

/// Command line flags win over the config file, which wins over built-in defaults.
pub fn resolve_run_config(cli_info: CLIRewriteInfo) -> Result<RewriteRunConfig, RewriteFailure> {
  let root_dir: PathBuf = PathBuf::from(cli_info.root_dir.as_deref().unwrap_or("."));

  if !root_dir.is_dir() {
    return Err(RewriteFailure::Config(format!(
      "The root directory '{}' does not exist or is not a directory.",
      root_dir.to_string_lossy()
    )));
  }

  let raw_config: RawRewriteConfig = load_raw_config(
    &root_dir,
    cli_info.config_file.as_deref().map(Path::new)
  )?.unwrap_or_default();

  return Ok(merge_run_config(cli_info, root_dir, raw_config));
}
