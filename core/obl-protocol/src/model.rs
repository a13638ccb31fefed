use crate::ids::{RowId, TokenId};
use crate::relation::Deprel;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One CoNLL-U row. Columns the relabeler never reads are kept verbatim
/// (`_` included) so that writing a sentence back is lossless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: RowId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: String,
    pub feats: String,
    /// `None` for rows whose HEAD column is `_` (ranges, empty nodes).
    pub head: Option<TokenId>,
    pub deprel: Deprel,
    pub deps: String,
    pub misc: String,
}

impl Token {
    /// A word row with every unused column set to `_`.
    pub fn word(id: u32, form: &str, head: u32, deprel: &str) -> Self {
        Self {
            id: RowId::Word(TokenId(id)),
            form: form.into(),
            lemma: "_".into(),
            upos: "_".into(),
            xpos: "_".into(),
            feats: "_".into(),
            head: Some(TokenId(head)),
            deprel: Deprel::new(deprel),
            deps: "_".into(),
            misc: "_".into(),
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self.id, RowId::Word(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t",
            self.id, self.form, self.lemma, self.upos, self.xpos, self.feats
        )?;
        match self.head {
            Some(head) => write!(f, "{}", head)?,
            None => f.write_str("_")?,
        }
        write!(f, "\t{}\t{}\t{}", self.deprel, self.deps, self.misc)
    }
}

/// A CoNLL-U sentence block: comment lines followed by rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    /// Comment lines without the leading `#`.
    pub comments: Vec<String>,
    pub rows: Vec<Token>,
}

impl Sentence {
    pub fn new(rows: Vec<Token>) -> Self {
        Self {
            comments: Vec::new(),
            rows,
        }
    }

    /// Syntactic words only, in file order.
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.rows.iter().filter(|t| t.is_word())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// Value of a `# key = value` comment, e.g. `sent_id`.
    pub fn comment_value(&self, key: &str) -> Option<&str> {
        self.comments.iter().find_map(|line| {
            let (k, v) = line.split_once('=')?;
            if k.trim() == key {
                Some(v.trim())
            } else {
                None
            }
        })
    }
}

/// Writes the block without a trailing blank line; the document writer
/// separates sentences.
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comment in &self.comments {
            writeln!(f, "#{}", comment)?;
        }
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Per-sentence supersense output of the tagger, aligned with the
/// sentence's syntactic words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct AnnotationRecord {
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}
