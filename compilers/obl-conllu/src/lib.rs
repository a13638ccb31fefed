pub mod annotations;
pub mod conllu;
pub mod error;
pub mod parser;

pub use annotations::read_annotations;
pub use conllu::{
    parse_document, parse_sentence, parse_token, write_document, write_sentence, ConlluReader,
};
pub use error::{AnnotationError, ConlluError};
