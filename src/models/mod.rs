pub mod loaders;
pub mod question;
pub mod source;

pub use loaders::{load_all_sources, load_source};
pub use question::{
    collapse_whitespace, OptionLetter, QuestionMap, QuestionOption, QuestionRecord,
};
pub use source::{SourceDocument, SourceKind, WordBox};
