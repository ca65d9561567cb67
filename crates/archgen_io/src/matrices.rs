//! Writers for the allele and trait matrices.
//!
//! CSV files carry one row per individual. Allele rows hold the individual's
//! first haplotype across all loci followed by the second. The binary allele
//! format is the packed storage itself: each 64-bit word little-endian, with
//! bit `k` of the matrix at bit `k % 64` of word `k / 64`.

use crate::error::{IoError, Result};
use archgen_data::{AlleleMatrix, TraitMatrix};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_traits_csv<W: Write>(mut out: W, traits: &TraitMatrix) -> Result<()> {
    for row in traits.rows().take(traits.n_individuals()) {
        let line: Vec<String> = row.iter().map(f64::to_string).collect();
        writeln!(out, "{}", line.join(","))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_alleles_csv<W: Write>(mut out: W, alleles: &AlleleMatrix) -> Result<()> {
    let mut line = String::with_capacity(4 * alleles.n_loci());
    for i in 0..alleles.n_individuals() {
        line.clear();
        for h in 0..2 {
            for l in 0..alleles.n_loci() {
                if !line.is_empty() {
                    line.push(',');
                }
                line.push(if alleles.get(alleles.index(h, i, l)) { '1' } else { '0' });
            }
        }
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_alleles_binary<W: Write>(mut out: W, alleles: &AlleleMatrix) -> Result<()> {
    if !alleles.trailing_bits_clear() {
        return Err(IoError::validation("allele matrix has bits set past its end"));
    }
    for word in alleles.words() {
        out.write_all(&word.to_le_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Opens `path` for buffered writing and hands it to `write`.
fn write_file<P, F>(path: P, write: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(BufWriter<File>) -> Result<()>,
{
    let describe = || format!("writing {:?}", path.as_ref());
    let file = File::create(&path).map_err(|e| IoError::FileSystem(e).with_context(describe()))?;
    write(BufWriter::new(file)).map_err(|e| e.with_context(describe()))
}

pub fn save_traits<P: AsRef<Path>>(path: P, traits: &TraitMatrix) -> Result<()> {
    write_file(path, |out| write_traits_csv(out, traits))
}

/// Saves alleles as CSV, or in the packed binary format when `binary` is set.
pub fn save_alleles<P: AsRef<Path>>(path: P, alleles: &AlleleMatrix, binary: bool) -> Result<()> {
    if binary {
        write_file(path, |out| write_alleles_binary(out, alleles))
    } else {
        write_file(path, |out| write_alleles_csv(out, alleles))
    }
}

/// Reads back a file written by `write_alleles_binary`.
pub fn read_alleles_binary<P: AsRef<Path>>(
    path: P,
    n_individuals: usize,
    n_loci: usize,
) -> Result<AlleleMatrix> {
    let bytes = std::fs::read(&path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("reading {:?}", path.as_ref()))
    })?;
    if bytes.len() % 8 != 0 {
        return Err(IoError::validation(format!(
            "{:?} holds {} bytes, not a whole number of words",
            path.as_ref(),
            bytes.len()
        )));
    }
    let words = bytes
        .chunks_exact(8)
        .map(|c| {
            let mut word = [0u8; 8];
            word.copy_from_slice(c);
            u64::from_le_bytes(word)
        })
        .collect();
    AlleleMatrix::from_words(n_individuals, n_loci, words).ok_or_else(|| {
        IoError::validation(format!(
            "{:?} does not hold a {n_individuals} x {n_loci} allele matrix",
            path.as_ref()
        ))
    })
}
