use core::fmt;

use tracing::instrument;

/// A URL (or anything the provider accepts as one) naming a remote video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference(String);

impl VideoReference {
    #[instrument(name = "Parsing video reference", skip(s), err(level = "debug"))]
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(String::from("Failed to parse video reference: cannot be empty"))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for VideoReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
