use obl_protocol::TokenId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no word is attached to the root")]
    NoRoot,

    #[error("several words are attached to the root: {0:?}")]
    MultipleRoots(Vec<TokenId>),

    #[error("word {token} has head {head}, which is not a word of the sentence")]
    DanglingHead { token: TokenId, head: TokenId },

    #[error("word {0} has no head")]
    MissingHead(TokenId),

    #[error("word id {0} occurs more than once")]
    DuplicateId(TokenId),
}

/// The annotation record does not line up with the tree it is paired with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "annotation misaligned: tree has {tree_tokens} words, annotation has {annotation_tokens} tokens and {tags} tags"
)]
pub struct AlignmentError {
    pub tree_tokens: usize,
    pub annotation_tokens: usize,
    pub tags: usize,
}
