pub mod analyzer;
mod wire;

pub use analyzer::GeminiAnalyzer;
