use std::io::{self, BufRead, Write};

use obl_protocol::{Deprel, RowId, Sentence, Token};

use crate::error::ConlluError;
use crate::parser::{parse_head, parse_row_id};

const COLUMNS: usize = 10;

/// Parses one row. `line` is the 1-based line number used in errors.
pub fn parse_token(row: &str, line: usize) -> Result<Token, ConlluError> {
    let fields: Vec<&str> = row.split('\t').collect();
    if fields.len() != COLUMNS {
        return Err(ConlluError::ColumnCount {
            line,
            found: fields.len(),
        });
    }

    let id = parse_row_id(fields[0]).ok_or_else(|| ConlluError::InvalidId {
        line,
        value: fields[0].to_string(),
    })?;
    let head = parse_head(fields[6]).ok_or_else(|| ConlluError::InvalidHead {
        line,
        value: fields[6].to_string(),
    })?;

    if let (RowId::Word(word), None) = (id, head) {
        return Err(ConlluError::MissingHead { line, id: word.0 });
    }

    Ok(Token {
        id,
        form: fields[1].to_string(),
        lemma: fields[2].to_string(),
        upos: fields[3].to_string(),
        xpos: fields[4].to_string(),
        feats: fields[5].to_string(),
        head,
        deprel: Deprel::new(fields[7]),
        deps: fields[8].to_string(),
        misc: fields[9].to_string(),
    })
}

/// Streams sentences out of a CoNLL-U source, one blank-line separated
/// block at a time.
pub struct ConlluReader<R> {
    inner: R,
    line: usize,
    done: bool,
}

impl<R: BufRead> ConlluReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            done: false,
        }
    }

    fn next_sentence(&mut self) -> Result<Option<Sentence>, ConlluError> {
        let mut sentence = Sentence::default();
        let mut buf = String::new();
        let mut start = 0;

        loop {
            buf.clear();
            if self.inner.read_line(&mut buf)? == 0 {
                self.done = true;
                break;
            }
            self.line += 1;

            let row = buf.trim_end_matches(['\n', '\r']);
            if row.trim().is_empty() {
                if sentence.rows.is_empty() && sentence.comments.is_empty() {
                    // Runs of blank lines between blocks
                    continue;
                }
                break;
            }

            if sentence.rows.is_empty() && sentence.comments.is_empty() {
                start = self.line;
            }
            if let Some(comment) = row.strip_prefix('#') {
                sentence.comments.push(comment.to_string());
            } else {
                sentence.rows.push(parse_token(row, self.line)?);
            }
        }

        if sentence.rows.is_empty() && sentence.comments.is_empty() {
            Ok(None)
        } else if sentence.rows.is_empty() {
            Err(ConlluError::NoTokens { line: start })
        } else {
            Ok(Some(sentence))
        }
    }
}

impl<R: BufRead> Iterator for ConlluReader<R> {
    type Item = Result<Sentence, ConlluError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_sentence() {
            Ok(Some(sentence)) => Some(Ok(sentence)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parses a whole CoNLL-U document held in memory.
pub fn parse_document(text: &str) -> Result<Vec<Sentence>, ConlluError> {
    ConlluReader::new(text.as_bytes()).collect()
}

/// Parses a single sentence block.
pub fn parse_sentence(block: &str) -> Result<Sentence, ConlluError> {
    Ok(ConlluReader::new(block.as_bytes())
        .next()
        .transpose()?
        .unwrap_or_default())
}

/// Writes one sentence followed by the blank separator line.
pub fn write_sentence<W: Write>(out: &mut W, sentence: &Sentence) -> io::Result<()> {
    write!(out, "{}", sentence)?;
    writeln!(out)
}

pub fn write_document<W: Write>(out: &mut W, sentences: &[Sentence]) -> io::Result<()> {
    for sentence in sentences {
        write_sentence(out, sentence)?;
    }
    Ok(())
}
