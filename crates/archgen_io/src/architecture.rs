//! Persistence of architectures and run configurations.

use crate::error::{IoError, Result};
use crate::serialization::{read_json_file, write_json_file};
use archgen_core::{AppConfig, ArchitectureLogic};
use archgen_data::Architecture;
use std::path::Path;

pub fn save_architecture<P: AsRef<Path>>(path: P, arch: &Architecture) -> Result<()> {
    write_json_file(arch, &path)?;
    tracing::debug!(
        path = ?path.as_ref(),
        loci = arch.n_loci(),
        edges = arch.n_edges(),
        "Architecture saved"
    );
    Ok(())
}

/// Reads an architecture and checks its structural invariants.
pub fn load_architecture<P: AsRef<Path>>(path: P) -> Result<Architecture> {
    let arch: Architecture = read_json_file(&path)?;
    arch.check().map_err(|e| {
        IoError::from(e).with_context(format!("invalid architecture in {:?}", path.as_ref()))
    })?;
    Ok(arch)
}

/// Writes the effective configuration as TOML.
pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let toml = config
        .to_toml()
        .map_err(|e| IoError::serialization(format!("{e:#}")))?;
    std::fs::write(&path, toml).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("writing config to {:?}", path.as_ref()))
    })
}

/// Reads and validates a TOML configuration.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let content = std::fs::read_to_string(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading config from {:?}", path.as_ref()))
    })?;
    AppConfig::from_toml(&content).map_err(|e| {
        IoError::validation(format!("invalid config in {:?}: {e:#}", path.as_ref()))
    })
}
