use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Cache container size, as encoded in the size icon file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Micro,
    Small,
    Regular,
    Large,
    Other,
    /// The owner did not pick a size.
    NotChosen,
}
impl Size {
    /// Returns the symbolic name, which is also the icon file stem.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Small => "small",
            Self::Regular => "regular",
            Self::Large => "large",
            Self::Other => "other",
            Self::NotChosen => "not_chosen",
        }
    }
}
impl FromStr for Size {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "micro" => Self::Micro,
            "small" => Self::Small,
            "regular" => Self::Regular,
            "large" => Self::Large,
            "other" => Self::Other,
            "not_chosen" => Self::NotChosen,
            _ => exn::bail!(ErrorKind::ExtractionFailed("size")),
        })
    }
}
impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
