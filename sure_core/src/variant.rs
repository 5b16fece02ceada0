use crate::{
    error::{Result, SureError},
    table::{is_missing, Table},
};

pub const N_VARIANT_COLUMNS: usize = 7;

/// Linked variant columns, in tuple order.  When a fragment carries several
/// variants each of these holds a comma separated list in matching order.
pub const VARIANT_COLUMNS: [&str; N_VARIANT_COLUMNS] = [
    "SNP_ABS_POS",
    "SNP_SEQ",
    "SNP_PARENT",
    "SNP_VAR",
    "SNP_TYPE",
    "SNP_SUBTYPE",
    "SNP_ABS_POS_hg19",
];

/// Observed allele column; a missing value here means the fragment has no variant
pub const PRIMARY_VARIANT_COLUMN: &str = "SNP_VAR";

/// One variant of a fragment: a single scalar value for each variant column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantTuple<'a>([&'a str; N_VARIANT_COLUMNS]);

impl<'a> VariantTuple<'a> {
    pub fn values(&self) -> &[&'a str; N_VARIANT_COLUMNS] {
        &self.0
    }
}

/// Positions of the variant columns within a particular table
#[derive(Debug, Clone)]
pub struct VariantLayout {
    idx: [usize; N_VARIANT_COLUMNS],
    primary: usize,
}

impl VariantLayout {
    pub fn resolve(table: &Table, origin: &str) -> Result<Self> {
        let mut idx = [0; N_VARIANT_COLUMNS];
        for (ix, name) in idx.iter_mut().zip(VARIANT_COLUMNS.iter()) {
            *ix = table.require_column(name, origin)?;
        }
        let primary = table.require_column(PRIMARY_VARIANT_COLUMN, origin)?;
        Ok(Self { idx, primary })
    }

    pub fn has_variant(&self, row: &[String]) -> bool {
        !is_missing(row[self.primary].trim())
    }

    /// Decode the variant columns of `row` into aligned tuples.
    ///
    /// All columns are split together; if any column has a comma then every
    /// column must split into the same number of values.  `origin` and `line`
    /// are only used for error reporting.
    pub fn decode<'a>(
        &self,
        row: &'a [String],
        origin: &str,
        line: usize,
    ) -> Result<Vec<VariantTuple<'a>>> {
        let cells: [&'a str; N_VARIANT_COLUMNS] =
            std::array::from_fn(|i| row[self.idx[i]].as_str());

        if !cells.iter().any(|s| s.contains(',')) {
            return Ok(vec![VariantTuple(cells)]);
        }

        let split: Vec<Vec<&'a str>> = cells
            .iter()
            .map(|s| s.split(',').map(str::trim).collect())
            .collect();
        let k = split[0].len();
        if split.iter().any(|v| v.len() != k) {
            return Err(SureError::Alignment {
                origin: origin.to_owned(),
                line,
                counts: VARIANT_COLUMNS
                    .iter()
                    .zip(split.iter())
                    .map(|(c, v)| (c.to_string(), v.len()))
                    .collect(),
            });
        }

        Ok((0..k)
            .map(|j| VariantTuple(std::array::from_fn(|i| split[i][j])))
            .collect())
    }

    /// Copy of `row` with the variant columns replaced by the values of `tuple`
    pub fn apply(&self, row: &[String], tuple: &VariantTuple) -> Vec<String> {
        let mut r = row.to_vec();
        for (ix, v) in self.idx.iter().zip(tuple.0.iter()) {
            r[*ix] = v.to_string()
        }
        r
    }

    pub fn is_scalar(&self, row: &[String]) -> bool {
        self.idx.iter().all(|ix| !row[*ix].contains(','))
    }
}
