use serde::Deserialize;

use crate::markdown_rewriter::ProcessingOrder;

/// Contents of an md_rewrite.yaml file. Every field is optional.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawRewriteConfig {
  pub pattern: Option<String>,
  pub order: Option<ProcessingOrder>,
  pub warn_on_rewrapped_lines: Option<bool>
}
