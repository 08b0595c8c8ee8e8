pub mod cache;
pub mod client;
pub mod convert;
pub mod error;
pub mod output;
pub mod presentation;
pub mod tools;

pub use cache::DiskCache;
pub use client::InfoqClient;
pub use convert::{Converter, EncodingType};
pub use error::{InfoqError, InfoqResult};
pub use presentation::{Presentation, PresentationId};
pub use tools::{Tool, ToolConfig, ToolOverrides};
