use std::{error::Error, fmt, io, path::Path};

#[derive(Debug)]
pub enum RewriteFailure {
  Access(String),
  Encoding(String),
  Pattern(String),
  Config(String)
}

impl RewriteFailure {
  pub fn access(path: &Path, action: &str, err: io::Error) -> Self {
    Self::Access(format!(
      "Failed to {} '{}': {}",
      action,
      path.to_string_lossy(),
      err
    ))
  }

  pub fn map_message(
    self,
    mapper: impl FnOnce(String) -> String
  ) -> Self {
    match self {
      Self::Access(err_message) => Self::Access(mapper(err_message)),
      Self::Encoding(err_message) => Self::Encoding(mapper(err_message)),
      Self::Pattern(err_message) => Self::Pattern(mapper(err_message)),
      Self::Config(err_message) => Self::Config(mapper(err_message))
    }
  }

  pub fn message(&self) -> &str {
    match self {
      Self::Access(msg) => msg,
      Self::Encoding(msg) => msg,
      Self::Pattern(msg) => msg,
      Self::Config(msg) => msg
    }
  }

  pub fn extract_message(self) -> String {
    return self.message().to_string();
  }
}

impl fmt::Display for RewriteFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message())
  }
}

impl Error for RewriteFailure { }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn access_failure_names_path_and_action() {
    let failure = RewriteFailure::access(
      Path::new("doc/api/missing.md"),
      "read",
      io::Error::new(io::ErrorKind::NotFound, "not found")
    );

    assert!(matches!(failure, RewriteFailure::Access(_)));
    assert_eq!(failure.to_string(), "Failed to read 'doc/api/missing.md': not found");
  }

  #[test]
  fn map_message_keeps_variant() {
    let failure = RewriteFailure::Pattern(String::from("bad"))
      .map_message(|msg| format!("While compiling: {}", msg));

    assert!(matches!(failure, RewriteFailure::Pattern(_)));
    assert_eq!(failure.extract_message(), "While compiling: bad");
  }
}
