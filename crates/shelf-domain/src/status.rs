//! Lending status of a book.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Exactly one of these holds for every stored book.
///
/// Serialized as the upper-case token (e.g. `"ORGANIZING"`), which is also
/// what `Display` prints and `FromStr` accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookStatus {
    /// On the shelf and free to borrow.
    #[default]
    Available,
    /// Lent out to a patron.
    Borrowed,
    /// Returned and being processed before it goes back on the shelf.
    Organizing,
    /// Reported lost.
    Lost,
}

impl BookStatus {
    pub const ALL: [Self; 4] = [Self::Available, Self::Borrowed, Self::Organizing, Self::Lost];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Borrowed => "BORROWED",
            Self::Organizing => "ORGANIZING",
            Self::Lost => "LOST",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown book status: {0}")]
pub struct ParseBookStatusError(pub String);

impl FromStr for BookStatus {
    type Err = ParseBookStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseBookStatusError(s.to_owned()))
    }
}
