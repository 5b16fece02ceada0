use std::collections::HashSet;

use crate::{
    error::Result,
    table::Table,
    variant::VariantLayout,
};

/// Drop fragments without a variant and split every multi-variant fragment
/// into one row per variant.  Non variant columns are copied to each new row.
///
/// Fails with an alignment error if the variant columns of any row disagree
/// in the number of values; no output is produced in that case.  New rows
/// keep the source line of the row they were split from.
pub fn expand_variants(table: &Table, layout: &VariantLayout, origin: &str) -> Result<Table> {
    let mut rows = Vec::with_capacity(table.n_rows());
    let mut no_variant = 0;
    for (i, row) in table.rows().iter().enumerate() {
        if !layout.has_variant(row) {
            no_variant += 1;
            continue;
        }
        let line = table.line(i);
        let tuples = layout.decode(row, origin, line)?;
        if tuples.len() == 1 && layout.is_scalar(row) {
            rows.push((line, row.clone()))
        } else {
            rows.extend(tuples.iter().map(|t| (line, layout.apply(row, t))))
        }
    }
    debug!(
        "Variant expansion: {} rows in, {} without variant, {} rows out",
        table.n_rows(),
        no_variant,
        rows.len()
    );
    Ok(table.with_rows(rows))
}

/// Remove rows identical in every column to an earlier row.  Order is otherwise kept
pub fn drop_duplicates(table: &Table) -> Table {
    let mut seen = HashSet::with_capacity(table.n_rows());
    let rows: Vec<_> = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, r)| seen.insert(r.as_slice()))
        .map(|(i, r)| (table.line(i), r.clone()))
        .collect();
    let dups = table.n_rows() - rows.len();
    if dups > 0 {
        debug!("Removed {} duplicate rows", dups)
    }
    table.with_rows(rows)
}

/// Full row expansion: gate on the primary variant column, expand, then deduplicate
pub fn expand_and_dedup(table: &Table, origin: &str) -> Result<Table> {
    let layout = VariantLayout::resolve(table, origin)?;
    let expanded = expand_variants(table, &layout, origin)?;
    Ok(drop_duplicates(&expanded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::SureError, table::read_table, variant::VARIANT_COLUMNS};
    use std::io::Cursor;

    fn table(rows: &[[&str; 9]]) -> Table {
        let mut header = vec!["id".to_owned()];
        header.extend(VARIANT_COLUMNS.iter().map(|s| s.to_string()));
        header.push("count".to_owned());
        Table::new(
            header,
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn k_variants_give_k_rows_in_order() {
        let t = table(&[[
            "f1", "1,2,3", "a,b,c", "A,C,G", "T,T,A", "snp,snp,indel", "x,y,z", "7,8,9", "4",
        ]]);
        let e = expand_and_dedup(&t, "t").unwrap();
        assert_eq!(e.n_rows(), 3);
        for (j, r) in e.rows().iter().enumerate() {
            assert_eq!(r[0], "f1");
            assert_eq!(r[1], ["1", "2", "3"][j]);
            assert_eq!(r[4], ["T", "T", "A"][j]);
            assert_eq!(r[7], ["7", "8", "9"][j]);
            assert_eq!(r[8], "4");
        }
    }

    #[test]
    fn fragments_without_variant_never_appear() {
        let t = table(&[
            ["f1", "1", "a", "A", "", "snp", "", "7", "4"],
            ["f2", "1,2", "a,b", "A,C", "nan", "snp,snp", "x,y", "7,8", "4"],
            ["f3", "5", "a", "A", "G", "snp", "", "9", "4"],
        ]);
        let e = expand_and_dedup(&t, "t").unwrap();
        assert_eq!(e.n_rows(), 1);
        assert_eq!(e.rows()[0][0], "f3");
    }

    #[test]
    fn misaligned_row_aborts() {
        let t = table(&[
            ["f1", "5", "a", "A", "G", "snp", "", "9", "4"],
            ["f2", "1,2", "a,b", "A,C", "G,T", "snp", "x,y", "7,8", "4"],
        ]);
        match expand_and_dedup(&t, "t") {
            Err(SureError::Alignment { line, origin, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(origin, "t");
            }
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn alignment_error_reports_file_line() {
        let mut input = String::from("id");
        for c in VARIANT_COLUMNS.iter() {
            input.push('\t');
            input.push_str(c);
        }
        input.push_str("\tcount\n");
        input.push_str("f1\t5\ta\tA\tG\tsnp\t\t9\t4\n\n\n");
        input.push_str("f2\t1,2\ta,b\tA,C\tG,T\tsnp\tx,y\t7,8\t4\n");
        let t = read_table(&mut Cursor::new(input), "chr1.txt").unwrap();
        match expand_and_dedup(&t, "chr1.txt") {
            Err(e @ SureError::Alignment { line: 5, .. }) => {
                assert!(e.to_string().starts_with("chr1.txt:5 "))
            }
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn split_rows_keep_source_line() {
        let t = table(&[
            ["f0", "5", "a", "A", "", "snp", "", "9", "4"],
            ["f1", "1,2", "a,b", "A,C", "G,T", "snp,snp", "x,y", "7,8", "4"],
            ["f1", "1", "a", "A", "G", "snp", "x", "7", "4"],
            ["f2", "5", "a", "A", "G", "snp", "", "9", "3"],
        ]);
        let e = expand_and_dedup(&t, "t").unwrap();
        assert_eq!(e.n_rows(), 3);
        assert_eq!((0..3).map(|i| e.line(i)).collect::<Vec<_>>(), vec![3, 3, 5]);
    }

    #[test]
    fn paired_end_duplicates_collapse() {
        let t = table(&[
            ["f1", "1,2", "a,b", "A,C", "G,T", "snp,snp", "x,y", "7,8", "4"],
            ["f1", "2", "b", "C", "T", "snp", "y", "8", "4"],
        ]);
        let e = expand_and_dedup(&t, "t").unwrap();
        assert_eq!(e.n_rows(), 2);
        assert_eq!(e.rows()[0][1], "1");
        assert_eq!(e.rows()[1][1], "2");
    }

    #[test]
    fn expansion_is_idempotent() {
        let t = table(&[
            ["f1", "1,2", "a,b", "A,C", "G,T", "snp,snp", "x,y", "7,8", "4"],
            ["f2", "5", "a", "A", "G", "snp", "", "9", "3"],
            ["f2", "5", "a", "A", "G", "snp", "", "9", "3"],
        ]);
        let once = expand_and_dedup(&t, "t").unwrap();
        let twice = expand_and_dedup(&once, "t").unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.n_rows(), 3);
    }

    #[test]
    fn missing_variant_column_is_schema_mismatch() {
        let t = Table::new(vec!["id".to_owned(), "SNP_VAR".to_owned()], vec![]).unwrap();
        assert!(matches!(
            expand_and_dedup(&t, "t"),
            Err(SureError::SchemaMismatch { .. })
        ));
    }
}
