use std::{fs, io::{self, Write}, path::{Path, PathBuf}};

use tempfile::NamedTempFile;

use super::{code_span::{rewrite_text, RewrittenText}, failure::RewriteFailure};

#[derive(Debug, Clone)]
pub struct FileRewriteOutcome {
  pub path: PathBuf,
  pub line_count: usize,
  pub lines_rewritten: usize,
  pub suspected_rewraps: usize,
  pub written: bool
}

fn read_markdown_file(file_path: &Path) -> Result<String, RewriteFailure> {
  let contents: Vec<u8> = fs::read(file_path)
    .map_err(|err| RewriteFailure::access(file_path, "read", err))?;

  return String::from_utf8(contents)
    .map_err(|err| RewriteFailure::Encoding(format!(
      "'{}' is not valid UTF-8 text (invalid byte at offset {}).",
      file_path.to_string_lossy(),
      err.utf8_error().valid_up_to()
    )));
}

#[cfg(unix)]
fn copy_ownership(original_metadata: &fs::Metadata, replacement_path: &Path) -> io::Result<()> {
  use std::os::unix::fs::{chown, MetadataExt};

  // Unprivileged users can only hand a file to themselves, so a refused chown keeps the
  // replacement owned by the caller.
  match chown(replacement_path, Some(original_metadata.uid()), Some(original_metadata.gid())) {
    Err(err) if err.kind() != io::ErrorKind::PermissionDenied => Err(err),
    _ => Ok(())
  }
}

#[cfg(not(unix))]
fn copy_ownership(_original_metadata: &fs::Metadata, _replacement_path: &Path) -> io::Result<()> {
  Ok(())
}

/// Replaces the file's contents through a temporary file beside it which is renamed over the
/// original. The temporary file is removed when any step fails, so the original is either fully
/// replaced or untouched. Symlinks are resolved first, so the link stays a link and its target
/// gets the new contents.
pub fn replace_file_contents(file_path: &Path, new_contents: &str) -> io::Result<()> {
  let target_path: PathBuf = fs::canonicalize(file_path)?;

  let containing_dir: &Path = match target_path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new(".")
  };

  let original_metadata: fs::Metadata = fs::metadata(&target_path)?;

  let mut temp_file: NamedTempFile = NamedTempFile::new_in(containing_dir)?;
  temp_file.write_all(new_contents.as_bytes())?;
  temp_file.flush()?;
  temp_file.as_file().sync_all()?;
  fs::set_permissions(temp_file.path(), original_metadata.permissions())?;
  copy_ownership(&original_metadata, temp_file.path())?;

  temp_file.persist(&target_path)
    .map_err(|persist_err| persist_err.error)?;

  Ok(())
}

/// Rewrites every backslash-containing line of one markdown file. Files without such lines are
/// not written. With `dry_run` set, nothing is written and the outcome reports what would change.
pub fn rewrite_file(file_path: &Path, dry_run: bool) -> Result<FileRewriteOutcome, RewriteFailure> {
  let original_contents: String = read_markdown_file(file_path)?;
  let rewritten: RewrittenText = rewrite_text(&original_contents);
  let should_write: bool = rewritten.lines_rewritten > 0 && !dry_run;

  if should_write {
    replace_file_contents(file_path, &rewritten.text)
      .map_err(|err| RewriteFailure::access(file_path, "write", err))?;
  }

  return Ok(FileRewriteOutcome {
    path: file_path.to_path_buf(),
    line_count: rewritten.line_count,
    lines_rewritten: rewritten.lines_rewritten,
    suspected_rewraps: rewritten.suspected_rewraps,
    written: should_write
  });
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn dir_entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir).unwrap()
      .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
      .collect();

    names.sort();
    names
  }

  #[test]
  fn only_backslash_lines_are_rewritten() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("class.md");
    fs::write(&file_path, "# Title\nSee C:\\sam\\include\\Sim.h\nend\n").unwrap();

    let outcome = rewrite_file(&file_path, false).unwrap();

    assert_eq!(
      fs::read_to_string(&file_path).unwrap(),
      "# Title\n`See C:\\sam\\include`Sim.h\nend\n"
    );
    assert_eq!(outcome.line_count, 3);
    assert_eq!(outcome.lines_rewritten, 1);
    assert!(outcome.written);
    assert_eq!(dir_entry_names(temp_dir.path()), vec!["class.md"]);
  }

  #[test]
  fn unchanged_file_is_not_written() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("plain.md");
    fs::write(&file_path, "nothing to see\n").unwrap();

    let outcome = rewrite_file(&file_path, false).unwrap();

    assert_eq!(outcome.lines_rewritten, 0);
    assert!(!outcome.written);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "nothing to see\n");
  }

  #[test]
  fn dry_run_leaves_file_alone() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("dry.md");
    fs::write(&file_path, "a\\b\n").unwrap();

    let outcome = rewrite_file(&file_path, true).unwrap();

    assert_eq!(outcome.lines_rewritten, 1);
    assert!(!outcome.written);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "a\\b\n");
  }

  #[test]
  fn invalid_utf8_is_an_encoding_failure() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("binary.md");
    fs::write(&file_path, b"ok\\\n\xff\xfe\n").unwrap();

    let result = rewrite_file(&file_path, false);

    assert!(matches!(result, Err(RewriteFailure::Encoding(_))));
    assert_eq!(fs::read(&file_path).unwrap(), b"ok\\\n\xff\xfe\n".to_vec());
  }

  #[test]
  fn missing_file_is_an_access_failure() {
    let temp_dir = TempDir::new().unwrap();
    let result = rewrite_file(&temp_dir.path().join("gone.md"), false);

    assert!(matches!(result, Err(RewriteFailure::Access(_))));
  }

  #[test]
  fn failed_rename_keeps_target_and_removes_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let occupied_path = temp_dir.path().join("occupied.md");
    fs::create_dir(&occupied_path).unwrap();
    fs::write(occupied_path.join("child.md"), "keep\n").unwrap();

    assert!(replace_file_contents(&occupied_path, "`x`y\n").is_err());

    assert_eq!(dir_entry_names(temp_dir.path()), vec!["occupied.md"]);
    assert_eq!(fs::read_to_string(occupied_path.join("child.md")).unwrap(), "keep\n");
  }

  #[cfg(unix)]
  #[test]
  fn unwritable_directory_leaves_original_untouched() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let locked_dir = temp_dir.path().join("locked");
    fs::create_dir(&locked_dir).unwrap();
    let file_path = locked_dir.join("class.md");
    fs::write(&file_path, "a\\b\n").unwrap();
    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users ignore directory permissions, so there is nothing to observe.
    let is_privileged = fs::write(locked_dir.join("access-check"), "").is_ok();
    if is_privileged {
      fs::remove_file(locked_dir.join("access-check")).unwrap();
      fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();
      return;
    }

    let result = rewrite_file(&file_path, false);
    fs::set_permissions(&locked_dir, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(RewriteFailure::Access(_))));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "a\\b\n");
    assert_eq!(dir_entry_names(&locked_dir), vec!["class.md"]);
  }

  #[cfg(unix)]
  #[test]
  fn symlink_keeps_pointing_at_rewritten_target() {
    use std::os::unix::fs::symlink;

    let temp_dir = TempDir::new().unwrap();
    let real_path = temp_dir.path().join("real.md");
    let link_path = temp_dir.path().join("link.md");
    fs::write(&real_path, "a\\b\n").unwrap();
    symlink(&real_path, &link_path).unwrap();

    let outcome = rewrite_file(&link_path, false).unwrap();

    assert!(outcome.written);
    assert!(fs::symlink_metadata(&link_path).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&real_path).unwrap(), "`a`b\n");
  }

  #[cfg(unix)]
  #[test]
  fn ownership_survives_replacement() {
    use std::os::unix::fs::MetadataExt;

    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("owned.md");
    fs::write(&file_path, "x\\y\n").unwrap();
    let before = fs::metadata(&file_path).unwrap();

    replace_file_contents(&file_path, "`x`y\n").unwrap();

    let after = fs::metadata(&file_path).unwrap();
    assert_eq!((after.uid(), after.gid()), (before.uid(), before.gid()));
  }

  #[cfg(unix)]
  #[test]
  fn permissions_survive_replacement() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("perm.md");
    fs::write(&file_path, "x\\y\n").unwrap();
    fs::set_permissions(&file_path, fs::Permissions::from_mode(0o640)).unwrap();

    replace_file_contents(&file_path, "`x`y\n").unwrap();

    let mode = fs::metadata(&file_path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
  }
}
