use serde::{Deserialize, Serialize};

/// The whitespace/comment prefix and suffix stored on each node, per
/// §3.1. A node prints as `prefix + token(s) + children + suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Formatting {
    /// Computed on reify: the printer synthesizes a prefix/suffix the
    /// first time the node is printed, by copying the style of the
    /// nearest sibling of matching category (§4.B "Formatting
    /// inference"), falling back to a single space or empty string.
    #[default]
    Infer,
    /// Verbatim whitespace/comments preserved byte-exactly from the
    /// original source.
    Reified { prefix: String, suffix: String },
    /// No surrounding whitespace at all (used for synthetic punctuation
    /// nodes that never carry trivia, e.g. an inferred empty suffix).
    None,
}

impl Formatting {
    pub fn reified(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Formatting::Reified {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Returns the prefix/suffix pair this formatting contributes to
    /// printing. `Infer` must be reified before printing; calling this
    /// on an un-reified node is a logic error caught by `debug_assert`.
    pub fn prefix_suffix(&self) -> (&str, &str) {
        match self {
            Formatting::Reified { prefix, suffix } => (prefix.as_str(), suffix.as_str()),
            Formatting::None => ("", ""),
            Formatting::Infer => {
                debug_assert!(false, "Formatting::Infer must be reified before printing");
                ("", "")
            }
        }
    }

    pub fn is_infer(&self) -> bool {
        matches!(self, Formatting::Infer)
    }
}
