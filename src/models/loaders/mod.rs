pub mod source_loader;

pub use source_loader::{load_all_sources, load_source, source_kind};
