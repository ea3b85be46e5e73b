use lazy_static::lazy_static;
use regex::Regex;

pub const CODE_SPAN_DELIMITER: char = '`';
const SPLIT_CHAR: char = '\\';

lazy_static! {
  // Opens with a closed single-backtick span, which is what a previous pass leaves behind.
  static ref REWRAPPED_LINE_REGEX: Regex = Regex::new("^`[^`\r\n]*`").unwrap();
}

#[derive(Debug, PartialEq, Eq)]
pub struct RewrittenText {
  pub text: String,
  pub line_count: usize,
  pub lines_rewritten: usize,
  pub suspected_rewraps: usize
}

/// Splits a line around its last backslash, dropping the backslash itself.
/// The suffix keeps the line terminator, if the line has one.
pub fn split_at_last_backslash(line: &str) -> Option<(&str, &str)> {
  return line.rfind(SPLIT_CHAR)
    .map(|split_index| (&line[..split_index], &line[split_index + SPLIT_CHAR.len_utf8()..]));
}

pub fn rewrite_line(line: &str) -> String {
  return match split_at_last_backslash(line) {
    Some((prefix, suffix)) => format!("{0}{1}{0}{2}", CODE_SPAN_DELIMITER, prefix, suffix),
    None => line.to_string()
  }
}

/// True when a line still has a backslash but already starts with a code span. Running the
/// rewrite on such a line wraps it a second time.
pub fn looks_already_rewritten(line: &str) -> bool {
  return line.contains(SPLIT_CHAR) && REWRAPPED_LINE_REGEX.is_match(line);
}

/// Lines of `contents` with their terminators attached. `\n`, `\r\n` and a lone `\r` all end
/// a line. A final line without a terminator is still returned.
pub fn split_lines_inclusive(contents: &str) -> Vec<&str> {
  let bytes: &[u8] = contents.as_bytes();
  let mut lines: Vec<&str> = Vec::new();
  let mut line_start: usize = 0;
  let mut index: usize = 0;

  while index < bytes.len() {
    let line_end: Option<usize> = match bytes[index] {
      b'\n' => Some(index),
      b'\r' if bytes.get(index + 1) == Some(&b'\n') => Some(index + 1),
      b'\r' => Some(index),
      _ => None
    };

    if let Some(end_index) = line_end {
      lines.push(&contents[line_start..=end_index]);
      line_start = end_index + 1;
      index = end_index;
    }

    index += 1;
  }

  if line_start < bytes.len() {
    lines.push(&contents[line_start..]);
  }

  return lines;
}

pub fn rewrite_text(contents: &str) -> RewrittenText {
  let mut rewritten = RewrittenText {
    text: String::with_capacity(contents.len()),
    line_count: 0,
    lines_rewritten: 0,
    suspected_rewraps: 0
  };

  for line in split_lines_inclusive(contents) {
    rewritten.line_count += 1;

    if line.contains(SPLIT_CHAR) {
      if looks_already_rewritten(line) {
        rewritten.suspected_rewraps += 1;
      }

      rewritten.text.push_str(&rewrite_line(line));
      rewritten.lines_rewritten += 1;
    }
    else {
      rewritten.text.push_str(line);
    }
  }

  return rewritten;
}
