use sure_core::{expand_and_dedup, normalize, tag_library};

use crate::{config::Config, io};

/// Strategy
///
/// Load the library totals and the count table for one chromosome.
/// Split multi-variant fragments to one row per variant and remove
/// duplicates, then add normalized cDNA columns and the library name.
/// The output only appears once it has been completely written.
pub fn process_counts(cfg: &Config) -> anyhow::Result<()> {
    let origin = cfg.input().display().to_string();
    let totals = io::read_totals_file(cfg.totals(), cfg.ipcr_column())?;
    let table = io::read_count_table(cfg.input())?;

    info!("Reformatting SuRE table to have one variant per row");
    let expanded = expand_and_dedup(&table, &origin)?;
    drop(table);

    info!("Normalizing SuRE table");
    let normalized = normalize(expanded, &totals, cfg.norm_prefix(), &origin)?;
    let tagged = tag_library(normalized, cfg.library_column(), cfg.library());

    io::write_table_gz(cfg.output(), &tagged)?;
    info!(
        "Wrote {} rows for library {} to {}",
        tagged.n_rows(),
        cfg.library(),
        cfg.output().display()
    );
    Ok(())
}
