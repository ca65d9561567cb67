//! # Archgen IO
//!
//! File layer for archgen runs:
//! - Structured I/O errors carrying the path being worked on
//! - JSON helpers over serde
//! - Architecture and configuration persistence
//! - CSV and packed binary writers for allele and trait matrices

/// Architecture and configuration files
pub mod architecture;
/// Error types and result alias for I/O operations
pub mod error;
/// Allele and trait matrix output formats
pub mod matrices;
/// JSON helpers with `IoError` mapping
pub mod serialization;

pub use architecture::{load_architecture, load_config, save_architecture, save_config};
pub use error::{IoError, Result};
pub use matrices::{
    read_alleles_binary, save_alleles, save_traits, write_alleles_binary, write_alleles_csv,
    write_traits_csv,
};
pub use serialization::{from_json, read_json_file, to_json, to_json_pretty, write_json_file};
