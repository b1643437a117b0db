use std::path::PathBuf;

use serde::Deserialize;

/// HTML view configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewsConfig {
    /// Directory holding `index.html`, `result.html` and `error.html`.
    /// The compiled-in views are used when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}
