use crate::config::AppConfig;
use crate::error::{CoreError, Result};
use archgen_data::Architecture;

pub fn check(arch: &Architecture) -> Result<()> {
    if arch.n_traits == 0 {
        return Err(CoreError::invariant("architecture has no traits"));
    }
    if arch.loci.is_empty() {
        return Err(CoreError::invariant("architecture has no loci"));
    }

    for (i, locus) in arch.loci.iter().enumerate() {
        if locus.trait_id >= arch.n_traits {
            return Err(CoreError::invariant(format!(
                "locus {i} encodes trait {} but there are only {} traits",
                locus.trait_id, arch.n_traits
            )));
        }
    }

    let loci = arch.loci_per_trait();
    if let Some(t) = loci.iter().position(|&n| n == 0) {
        return Err(CoreError::invariant(format!(
            "trait {t} is encoded by no locus"
        )));
    }

    let n = arch.n_loci();
    for (i, edge) in arch.edges.iter().enumerate() {
        if edge.from >= n || edge.to >= n {
            return Err(CoreError::invariant(format!(
                "edge {i} ({} -> {}) points outside the {n} loci",
                edge.from, edge.to
            )));
        }
        if edge.from == edge.to {
            return Err(CoreError::invariant(format!(
                "edge {i} is a self-loop on locus {}",
                edge.from
            )));
        }
        let (a, b) = (arch.loci[edge.from].trait_id, arch.loci[edge.to].trait_id);
        if a != b {
            return Err(CoreError::invariant(format!(
                "edge {i} joins loci of traits {a} and {b}"
            )));
        }
    }

    for (t, (&l, &e)) in loci.iter().zip(&arch.edges_per_trait()).enumerate() {
        if e > l * (l - 1) / 2 {
            return Err(CoreError::invariant(format!(
                "trait {t} has {e} edges among {l} loci"
            )));
        }
    }

    Ok(())
}

pub fn check_against(arch: &Architecture, config: &AppConfig) -> Result<()> {
    check(arch)?;

    if arch.n_traits != config.n_traits() {
        return Err(CoreError::invariant(format!(
            "architecture has {} traits, expected {}",
            arch.n_traits,
            config.n_traits()
        )));
    }

    let loci = arch.loci_per_trait();
    let edges = arch.edges_per_trait();
    for (t, tc) in config.traits.iter().enumerate() {
        if loci[t] != tc.loci {
            return Err(CoreError::invariant(format!(
                "trait {t} has {} loci, expected {}",
                loci[t], tc.loci
            )));
        }
        if edges[t] != tc.edges {
            return Err(CoreError::invariant(format!(
                "trait {t} has {} edges, expected {}",
                edges[t], tc.edges
            )));
        }
    }

    Ok(())
}
