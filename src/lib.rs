pub mod config;
pub mod downstream;
pub mod loader;
pub mod processing;
pub mod reflow;
pub mod writer;

// Re-export main types for convenient access
pub use config::ReflowConfig;
pub use reflow::{
    BoundaryStrategy, Condition, ReflowOutput, ReflowPipeline, ReflowReport, SentenceAccumulator,
};

// Re-export I/O boundary helpers
pub use loader::{load_pages_async, LoaderConfig, PageLoader};
pub use processing::{process_document, write_stats, ProcessOptions, RunStats};
pub use writer::{ensure_distinct_output, generate_output_path, write_sentences};
