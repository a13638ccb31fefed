use obl_protocol::{Deprel, Relabel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What an oblique without a `case` dependent becomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CaselessPolicy {
    #[default]
    Orphan,
    Iobj,
}

impl CaselessPolicy {
    pub fn relabel(self) -> Relabel {
        match self {
            CaselessPolicy::Orphan => Relabel::Orphan,
            CaselessPolicy::Iobj => Relabel::Iobj,
        }
    }
}

/// Whether the walk continues below an oblique that turned out caseless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DescentPolicy {
    /// Every node reachable from the root is visited.
    #[default]
    Always,
    /// The dependents of a caseless oblique are not visited.
    SkipCaseless,
}

/// How a DEPREL is compared against `obl` and `case`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RelationMatch {
    /// `obl:tmod` counts as `obl`.
    #[default]
    Family,
    /// Only the bare label counts.
    Exact,
}

impl RelationMatch {
    pub fn matches(self, deprel: &Deprel, label: &str) -> bool {
        match self {
            RelationMatch::Family => deprel.family() == label,
            RelationMatch::Exact => deprel.as_str() == label,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelabelConfig {
    pub caseless: CaselessPolicy,
    pub descent: DescentPolicy,
    pub matching: RelationMatch,
}
