//! Veracity Providers
//!
//! Concrete implementations of the collaborator traits in `veracity-domain`.
//!
//! # Providers
//!
//! - [`TavilySearch`] - general web search over the Tavily API
//! - [`ArxivCorpus`] - scholarly corpus search over the arXiv Atom API
//! - [`HttpPageFetcher`] - fetches a page and keeps only its visible text
//! - [`PdfExtractor`] - PDF text from a URL, a local path or raw bytes
//! - [`GeminiEngine`] - reasoning engine with function calling
//!
//! The [`mock`] module carries deterministic stand-ins for all of the above,
//! used by the pipeline and orchestrator tests.
//!
//! # Configuration
//!
//! ```
//! use veracity_providers::ProvidersConfig;
//!
//! let config = ProvidersConfig::default();
//! assert!(config.validate().is_ok());
//! assert!(config.tavily.api_key.is_none());
//! ```

#![warn(missing_docs)]

mod arxiv;
mod config;
mod error;
mod gemini;
mod http;
pub mod mock;
mod page;
mod pdf;
mod tavily;

pub use arxiv::{arxiv_id, ArxivCorpus};
pub use config::{
    ArxivConfig, FunctionCallingMode, GeminiConfig, HttpConfig, ProvidersConfig, TavilyConfig,
    GEMINI_API_KEY_ENV, TAVILY_API_KEY_ENV,
};
pub use error::ProviderError;
pub use gemini::{GeminiEngine, GeminiSession};
pub use page::{visible_text, HttpPageFetcher};
pub use pdf::{extract_pdf_text, PdfExtractor};
pub use tavily::TavilySearch;
