use std::{io::BufWriter, path::Path};

use anyhow::Context;
use compress_io::compress::CompressIo;
use tempfile::NamedTempFile;

use sure_core::{sum_columns, write_totals, Totals};

/// Sum the requested count columns over one (possibly compressed) count file
pub fn sum_count_file(p: &Path, columns: &[String]) -> anyhow::Result<Vec<u64>> {
    trace!("Opening count file {} for reading", p.display());
    let mut rdr = CompressIo::new()
        .path(p)
        .bufreader()
        .with_context(|| format!("Could not open count file {}", p.display()))?;
    let sums = sum_columns(&mut rdr, columns, &p.display().to_string())?;
    Ok(sums)
}

/// Write totals to `p`.  Output goes to a temporary file in the same
/// directory which is only moved into place once completely written.
pub fn write_totals_file(p: &Path, totals: &Totals) -> anyhow::Result<()> {
    let dir = utils::setup_output_dir(p)?;
    let tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Could not create temporary file in {}", dir.display()))?;
    let mut wrt = BufWriter::new(tmp);
    write_totals(&mut wrt, totals, &p.display().to_string())?;
    let tmp = wrt
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("Error writing totals for {}", p.display()))?;
    tmp.persist(p)
        .with_context(|| format!("Could not create output file {}", p.display()))?;
    info!("Total counts written to {}", p.display());
    Ok(())
}
