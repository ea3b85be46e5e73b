use colored::Colorize;

use crate::{common::path_manipulation::relative_to_root, logger::{note, warn}, markdown_rewriter::{rewrite_all, FileRewriteOutcome, RewriteFailure, RewriteSummary}, run_config::RewriteRunConfig};

fn plural(count: usize, singular: &str) -> String {
  return if count == 1 {
    format!("{} {}", count, singular)
  }
  else {
    format!("{} {}s", count, singular)
  }
}

fn report_file_outcome(run_config: &RewriteRunConfig, outcome: &FileRewriteOutcome) {
  let shown_path: String = relative_to_root(&run_config.root_dir, &outcome.path);

  if run_config.warn_on_rewrapped_lines && outcome.suspected_rewraps > 0 {
    warn(format!(
      "{} has {} that already start with a code span and still contain a backslash. They are wrapped again.",
      shown_path.yellow(),
      plural(outcome.suspected_rewraps, "line")
    ));
  }

  if run_config.quiet || outcome.lines_rewritten == 0 {
    return;
  }

  let action: &str = if outcome.written { "rewrote" } else { "would rewrite" };

  println!(
    "{} {} ({} of {})",
    action,
    shown_path.cyan(),
    plural(outcome.lines_rewritten, "line"),
    outcome.line_count
  );
}

fn print_summary(run_config: &RewriteRunConfig, summary: &RewriteSummary) {
  if summary.files_scanned == 0 {
    note(format!(
      "No files matched '{}' under '{}'. Nothing to do.",
      run_config.pattern,
      run_config.root_dir.to_string_lossy()
    ));
    return;
  }

  let rewritten_label: &str = if run_config.options.dry_run { "would be rewritten" } else { "rewritten" };

  println!(
    "\n{} scanned, {} {} ({} total)",
    plural(summary.files_scanned, "file"),
    plural(summary.files_rewritten(), "file").green(),
    rewritten_label,
    plural(summary.lines_rewritten(), "line")
  );

  if run_config.warn_on_rewrapped_lines && summary.suspected_rewraps() > 0 {
    warn(format!(
      "{} looked already rewritten. Running the rewriter twice over the same files nests code spans.",
      plural(summary.suspected_rewraps(), "line")
    ));
  }
}

pub fn handle_rewrite_docs(run_config: &RewriteRunConfig) -> Result<RewriteSummary, RewriteFailure> {
  let summary: RewriteSummary = rewrite_all(
    &run_config.root_dir,
    &run_config.pattern,
    &run_config.options,
    |outcome| report_file_outcome(run_config, outcome)
  )
    .map_err(|failure| failure.map_message(|err_message| format!(
      "While rewriting files matching '{}':\n{}",
      run_config.pattern,
      err_message
    )))?;

  if !run_config.quiet {
    print_summary(run_config, &summary);
  }

  return Ok(summary);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::markdown_rewriter::RewriteOptions;
  use std::fs;
  use tempfile::TempDir;

  #[test]
  fn plural_labels() {
    assert_eq!(plural(1, "line"), "1 line");
    assert_eq!(plural(0, "file"), "0 files");
    assert_eq!(plural(3, "file"), "3 files");
  }

  #[test]
  fn failure_message_names_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let run_config = RewriteRunConfig {
      root_dir: temp_dir.path().to_path_buf(),
      pattern: String::from("doc/api/[.md"),
      options: RewriteOptions::default(),
      warn_on_rewrapped_lines: true,
      quiet: true
    };

    let failure = handle_rewrite_docs(&run_config).unwrap_err();

    assert!(matches!(failure, RewriteFailure::Pattern(_)));
    assert!(failure.message().starts_with("While rewriting files matching 'doc/api/[.md'"));
  }

  #[test]
  fn rewrites_under_configured_root() {
    let temp_dir = TempDir::new().unwrap();
    let api_dir = temp_dir.path().join("doc").join("api");
    fs::create_dir_all(&api_dir).unwrap();
    fs::write(api_dir.join("Sim.md"), "Sim\\step\n").unwrap();

    let run_config = RewriteRunConfig {
      root_dir: temp_dir.path().to_path_buf(),
      pattern: String::from("doc/api/*.md"),
      options: RewriteOptions::default(),
      warn_on_rewrapped_lines: true,
      quiet: true
    };

    let summary = handle_rewrite_docs(&run_config).unwrap();

    assert_eq!(summary.files_rewritten(), 1);
    assert_eq!(fs::read_to_string(api_dir.join("Sim.md")).unwrap(), "`Sim`step\n");
  }
}
