pub mod alleles;
pub mod architecture;
pub mod traits;
