pub mod config;
pub mod logging;

pub mod account;
pub mod checksum;
pub mod download;
pub mod error;
pub mod fanout;
pub mod http;
pub mod normalize;
pub mod product;
pub mod resolver;
pub mod retry;
pub mod source;
pub mod subproduct;
pub mod versions;

#[cfg(test)]
mod testing;

pub use error::{CatalogError, Result};
pub use resolver::{CatalogResolver, ResolvedDownload};
pub use source::DlgType;
