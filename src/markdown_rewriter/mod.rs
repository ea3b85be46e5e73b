mod code_span;
mod failure;
mod file_rewrite;
mod file_selection;

use std::path::{Path, PathBuf};

use file_rewrite::rewrite_file;
use file_selection::MarkdownFileSelection;

pub use failure::RewriteFailure;
pub use file_rewrite::FileRewriteOutcome;
pub use file_selection::ProcessingOrder;

pub const DEFAULT_MARKDOWN_PATTERN: &'static str = "doc/api/*.md";

#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
  pub order: ProcessingOrder,
  pub dry_run: bool
}

#[derive(Debug, Default)]
pub struct RewriteSummary {
  pub files_scanned: usize,
  pub outcomes: Vec<FileRewriteOutcome>
}

impl RewriteSummary {
  pub fn changed_files(&self) -> impl Iterator<Item=&FileRewriteOutcome> {
    self.outcomes.iter().filter(|outcome| outcome.lines_rewritten > 0)
  }

  pub fn files_rewritten(&self) -> usize {
    self.changed_files().count()
  }

  pub fn lines_rewritten(&self) -> usize {
    self.outcomes.iter().map(|outcome| outcome.lines_rewritten).sum()
  }

  pub fn suspected_rewraps(&self) -> usize {
    self.outcomes.iter().map(|outcome| outcome.suspected_rewraps).sum()
  }
}

/// Rewrites every file under `root_dir` selected by `pattern`, one file at a time. The first
/// failure stops the batch; files handled before it keep their new contents.
/// `on_file_done` sees each outcome as soon as its file is finished.
pub fn rewrite_all(
  root_dir: &Path,
  pattern: &str,
  options: &RewriteOptions,
  mut on_file_done: impl FnMut(&FileRewriteOutcome)
) -> Result<RewriteSummary, RewriteFailure> {
  let selection: MarkdownFileSelection = MarkdownFileSelection::new(pattern)?;
  let matched_files: Vec<PathBuf> = selection.matching_files(root_dir, options.order)?;

  let mut summary = RewriteSummary {
    files_scanned: matched_files.len(),
    outcomes: Vec::with_capacity(matched_files.len())
  };

  for file_path in matched_files {
    let outcome: FileRewriteOutcome = rewrite_file(&file_path, options.dry_run)?;
    on_file_done(&outcome);
    summary.outcomes.push(outcome);
  }

  return Ok(summary);
}
