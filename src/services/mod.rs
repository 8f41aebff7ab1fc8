pub mod noise_filter;
pub mod option_tokenizer;
pub mod question_segmenter;
pub mod result_assembler;
pub mod result_writer;
pub mod text_assembler;

pub use noise_filter::{FilterOutcome, NoiseFilter};
pub use option_tokenizer::{tokenize, TokenizedLine};
pub use question_segmenter::{segment, SegmenterState};
pub use result_assembler::{ExtractionStats, OutputFormat};
pub use result_writer::ResultWriter;
