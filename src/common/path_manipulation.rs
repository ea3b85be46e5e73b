use std::path::Path;

pub fn with_forward_slashes(file_path: &str) -> String {
  return file_path.replace("\\", "/");
}

/// Path components of a glob or relative path, without empty and '.' segments.
pub fn meaningful_components(file_path: &str) -> Vec<&str> {
  return file_path
    .split('/')
    .filter(|component| !component.is_empty() && *component != ".")
    .collect();
}

pub fn is_hidden_name(file_name: &str) -> bool {
  return file_name.starts_with('.') && file_name != "." && file_name != "..";
}

pub fn relative_to_root(root_dir: &Path, file_path: &Path) -> String {
  let shown_path: &Path = file_path
    .strip_prefix(root_dir)
    .unwrap_or(file_path);

  return with_forward_slashes(&shown_path.to_string_lossy());
}
