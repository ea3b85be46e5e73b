use std::{fs, path::{Path, PathBuf}};

use globset::{GlobBuilder, GlobMatcher};
use serde::Deserialize;
use walkdir::{DirEntry, WalkDir};

use crate::common::path_manipulation::{is_hidden_name, meaningful_components, relative_to_root, with_forward_slashes};

use super::failure::RewriteFailure;

const GLOB_META_CHARS: [char; 4] = ['*', '?', '[', '{'];

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingOrder {
  Sorted,
  Discovery
}

impl Default for ProcessingOrder {
  fn default() -> Self {
    return ProcessingOrder::Sorted;
  }
}

/// A glob pattern split into the literal directory the walk starts from and the
/// glob matched against paths below that directory.
#[derive(Debug)]
pub struct MarkdownFileSelection {
  literal_dir: PathBuf,
  matcher: GlobMatcher,
  max_depth: Option<usize>,
  dot_components: Vec<DotComponent>
}

/// Per glob component: whether it can match a hidden name. A component that itself starts
/// with '.' opts in to hidden entries at its depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DotComponent {
  Named,
  Unnamed,
  Recursive
}

fn has_glob_meta(component: &str) -> bool {
  return component.chars().any(|c| GLOB_META_CHARS.contains(&c));
}

fn classify_component(component: &str) -> DotComponent {
  return if component.contains("**") {
    DotComponent::Recursive
  }
  else if component.starts_with('.') {
    DotComponent::Named
  }
  else {
    DotComponent::Unnamed
  }
}

/// Regular files, and symlinks whose target is a regular file.
fn is_file_or_link_to_file(entry: &DirEntry) -> bool {
  if entry.file_type().is_file() {
    return true;
  }

  return entry.path_is_symlink() && fs::metadata(entry.path())
    .map(|target_metadata| target_metadata.is_file())
    .unwrap_or(false);
}

impl MarkdownFileSelection {
  pub fn new(pattern: &str) -> Result<Self, RewriteFailure> {
    let normalized_pattern: String = with_forward_slashes(pattern);
    let components: Vec<&str> = meaningful_components(&normalized_pattern);

    if components.is_empty() {
      return Err(RewriteFailure::Pattern(format!(
        "The pattern '{}' does not name any files.",
        pattern
      )));
    }

    // A pattern without wildcards still matches its last component against the
    // directory listing, so the walk always has a glob to test.
    let first_glob_index: usize = components.iter()
      .position(|component| has_glob_meta(component))
      .unwrap_or(components.len() - 1);

    let (literal_components, glob_components) = components.split_at(first_glob_index);

    let mut literal_dir: PathBuf = if normalized_pattern.starts_with('/') {
      PathBuf::from("/")
    }
    else {
      PathBuf::new()
    };

    for component in literal_components {
      literal_dir.push(component);
    }

    let relative_glob: String = glob_components.join("/");

    let matcher: GlobMatcher = GlobBuilder::new(&relative_glob)
      .literal_separator(true)
      .build()
      .map_err(|err| RewriteFailure::Pattern(format!(
        "Invalid glob pattern '{}': {}",
        pattern,
        err
      )))?
      .compile_matcher();

    let max_depth: Option<usize> = if glob_components.iter().any(|component| component.contains("**")) {
      None
    }
    else {
      Some(glob_components.len())
    };

    return Ok(MarkdownFileSelection {
      literal_dir,
      matcher,
      max_depth,
      dot_components: glob_components.iter()
        .map(|component| classify_component(component))
        .collect()
    });
  }

  fn allows_hidden_at_depth(&self, depth: usize) -> bool {
    let component_index: usize = depth - 1;
    let recursive_before: bool = self.dot_components.iter()
      .take(component_index + 1)
      .any(|component| *component == DotComponent::Recursive);

    // Below a '**' the depth no longer says which component applies, so only the final
    // component decides.
    let deciding_component: Option<&DotComponent> = if recursive_before {
      self.dot_components.last()
    }
    else {
      self.dot_components.get(component_index)
    };

    return deciding_component == Some(&DotComponent::Named);
  }

  fn skips_entry(&self, entry: &DirEntry) -> bool {
    return entry.depth() > 0
      && is_hidden_name(&entry.file_name().to_string_lossy())
      && !self.allows_hidden_at_depth(entry.depth());
  }

  pub fn walk_dir(&self, root_dir: &Path) -> PathBuf {
    return root_dir.join(&self.literal_dir);
  }

  /// Files under `root_dir` matched by the pattern, including symlinks to regular files.
  /// Symlinked directories are not descended into. Hidden entries are skipped unless the
  /// matching glob component starts with '.'. A missing start directory selects nothing.
  pub fn matching_files(
    &self,
    root_dir: &Path,
    order: ProcessingOrder
  ) -> Result<Vec<PathBuf>, RewriteFailure> {
    let walk_dir: PathBuf = self.walk_dir(root_dir);

    if !walk_dir.is_dir() {
      return Ok(Vec::new());
    }

    let mut walker: WalkDir = WalkDir::new(&walk_dir)
      .min_depth(1)
      .follow_links(false);

    if let Some(depth) = self.max_depth {
      walker = walker.max_depth(depth);
    }

    let mut matched_files: Vec<PathBuf> = Vec::new();

    for maybe_entry in walker.into_iter().filter_entry(|entry| !self.skips_entry(entry)) {
      let entry: DirEntry = maybe_entry.map_err(|err| RewriteFailure::Access(format!(
        "Failed to list files under '{}': {}",
        walk_dir.to_string_lossy(),
        err
      )))?;

      if !is_file_or_link_to_file(&entry) {
        continue;
      }

      let path_below_walk_dir: String = relative_to_root(&walk_dir, entry.path());

      if self.matcher.is_match(&path_below_walk_dir) {
        matched_files.push(entry.into_path());
      }
    }

    if let ProcessingOrder::Sorted = order {
      matched_files.sort();
    }

    return Ok(matched_files);
  }
}
