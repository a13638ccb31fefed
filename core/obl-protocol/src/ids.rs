use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(TokenId, "1-based position of a syntactic word in a sentence. `0` is the synthetic root.");
define_id!(SentenceId, "0-based position of a sentence within a treebank file.");

impl TokenId {
    /// The synthetic root every real root attaches to.
    pub const ROOT: TokenId = TokenId(0);

    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

/// The ID column of a CoNLL-U row.
///
/// Only `Word` rows are nodes of the dependency tree. Multiword ranges and
/// empty nodes are carried along so that output keeps them in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowId {
    /// `7`
    Word(TokenId),
    /// `3-4`
    Range(u32, u32),
    /// `5.1`
    Empty(u32, u32),
}

impl RowId {
    pub fn word(self) -> Option<TokenId> {
        match self {
            RowId::Word(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Word(id) => write!(f, "{}", id),
            RowId::Range(start, end) => write!(f, "{}-{}", start, end),
            RowId::Empty(word, sub) => write!(f, "{}.{}", word, sub),
        }
    }
}
