use serde::{Deserialize, Serialize};

/// Limits applied to a single diff computation.
///
/// The defaults are unbounded: the engine only fails when an allocation does.
/// Services exposing the engine to untrusted input should start from
/// [`DiffConfig::bounded`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Maximum number of lines across both inputs.
    pub max_lines: Option<usize>,
    /// Maximum edit distance the search explores before giving up.
    pub max_edit_distance: Option<usize>,
}

impl DiffConfig {
    /// Limits suitable for text pasted by a user into a web form.
    pub fn bounded() -> Self {
        Self {
            max_lines: Some(200_000),
            max_edit_distance: Some(20_000),
        }
    }

    /// An explicitly unbounded configuration.
    pub fn unbounded() -> Self {
        Self::default()
    }
}
