use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A DEPREL label, either bare (`obl`) or subtyped (`obl:tmod`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Deprel(String);

impl Deprel {
    pub const OBLIQUE: &'static str = "obl";
    pub const CASE: &'static str = "case";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The universal part of the label, before any `:` subtype.
    pub fn family(&self) -> &str {
        match self.0.split_once(':') {
            Some((family, _)) => family,
            None => &self.0,
        }
    }
}

impl fmt::Display for Deprel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Deprel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<Relabel> for Deprel {
    fn from(relabel: Relabel) -> Self {
        Self::new(relabel.as_str())
    }
}

/// The relation an oblique is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Relabel {
    Advmod,
    Iobj,
    Orphan,
}

impl Relabel {
    pub const ALL: [Relabel; 3] = [Relabel::Advmod, Relabel::Iobj, Relabel::Orphan];

    pub const fn as_str(self) -> &'static str {
        match self {
            Relabel::Advmod => "advmod",
            Relabel::Iobj => "iobj",
            Relabel::Orphan => "orphan",
        }
    }
}

impl fmt::Display for Relabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
