use std::{io::BufWriter, path::Path};

use anyhow::Context;
use compress_io::compress::CompressIo;
use flate2::{write::GzEncoder, Compression};
use tempfile::NamedTempFile;

use sure_core::{read_table, read_totals, write_table, Table, Totals};

pub fn read_count_table(p: &Path) -> anyhow::Result<Table> {
    debug!("Reading SuRE counts file {}", p.display());
    let mut rdr = CompressIo::new()
        .path(p)
        .bufreader()
        .with_context(|| format!("Could not open count file {}", p.display()))?;
    let table = read_table(&mut rdr, &p.display().to_string())?;
    debug!(
        "Read {} rows with {} columns from {}",
        table.n_rows(),
        table.header().len(),
        p.display()
    );
    Ok(table)
}

pub fn read_totals_file(p: &Path, ipcr_column: &str) -> anyhow::Result<Totals> {
    debug!("Reading total counts from {}", p.display());
    let mut rdr = CompressIo::new()
        .path(p)
        .bufreader()
        .with_context(|| format!("Could not open total count file {}", p.display()))?;
    let totals = read_totals(&mut rdr, ipcr_column, &p.display().to_string())?;
    Ok(totals)
}

/// Write gzip compressed table to `p`.  Output goes to a temporary file in
/// the same directory which is only moved into place once complete.
pub fn write_table_gz(p: &Path, table: &Table) -> anyhow::Result<()> {
    let dir = utils::setup_output_dir(p)?;
    let tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("Could not create temporary file in {}", dir.display()))?;
    trace!("Writing to temporary file {}", tmp.path().display());

    let mut wrt = BufWriter::new(GzEncoder::new(tmp, Compression::default()));
    write_table(&mut wrt, table, &p.display().to_string())?;
    let tmp = wrt
        .into_inner()
        .map_err(|e| e.into_error())
        .and_then(|gz| gz.finish())
        .with_context(|| format!("Error writing compressed output for {}", p.display()))?;

    tmp.persist(p)
        .with_context(|| format!("Could not create output file {}", p.display()))?;
    Ok(())
}
