#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod config;
pub mod data_processor;
pub mod error;
pub mod traits;
pub mod types;

pub use catalog::{Catalog, DomainSpec, Package};
pub use data_processor::{CsvDirectory, MemoryTables};
pub use error::{Error, Result};
pub use traits::{KnowledgeSearch, TableSource};
pub use types::{DomainInfo, Record, ScoredResult};
