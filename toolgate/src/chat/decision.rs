//! Human decision on a confirm-required tool call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The answer a human gives to a pending confirmation.
///
/// On the wire this is exactly the string `"yes"` or `"no"` stored in the
/// invocation's `result` field; models and UIs depend on those two strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Run the tool.
    Yes,
    /// Do not run the tool.
    No,
}

impl Decision {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Reads a decision out of an invocation result.
    ///
    /// Only the exact strings qualify; anything else is a real tool result.
    #[must_use]
    pub fn from_result(value: &serde_json::Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }

    /// Returns the decision as a JSON result value.
    #[must_use]
    pub fn to_result(self) -> serde_json::Value {
        serde_json::Value::String(self.as_str().to_string())
    }
}

impl FromStr for Decision {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
