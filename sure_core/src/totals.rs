use std::io::{BufRead, Write};

use utils::get_next_line;

use crate::{
    error::{Result, SureError},
    table::is_missing,
};

/// Name of the value column in a totals file
pub const SUM_COLUMN: &str = "SUM";

/// Default name of the integration (iPCR) count column
pub const DEFAULT_IPCR_COLUMN: &str = "count";

/// Library wide count totals
///
/// One entry per count column in request order.  One of the entries is
/// designated as the integration counter; every other entry is a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    entries: Vec<(String, u64)>,
    integration: usize,
}

impl Totals {
    pub fn new(entries: Vec<(String, u64)>, integration: &str, origin: &str) -> Result<Self> {
        let integration = entries
            .iter()
            .position(|(c, _)| c == integration)
            .ok_or_else(|| SureError::schema(integration, origin))?;
        Ok(Self {
            entries,
            integration,
        })
    }

    /// All totals set to zero, ready for accumulation
    pub fn zeroed(columns: &[String], integration: &str) -> Result<Self> {
        Self::new(
            columns.iter().map(|c| (c.clone(), 0)).collect(),
            integration,
            "column list",
        )
    }

    /// Add per column sums from one input.  `sums` is in the column order of `self`
    pub fn accumulate(&mut self, sums: &[u64]) -> Result<()> {
        if sums.len() != self.entries.len() {
            return Err(SureError::LengthMismatch {
                expected: self.entries.len(),
                found: sums.len(),
            });
        }
        for ((c, t), s) in self.entries.iter_mut().zip(sums) {
            *t = t
                .checked_add(*s)
                .ok_or_else(|| SureError::Overflow { column: c.clone() })?;
        }
        Ok(())
    }

    /// Combine totals computed independently over disjoint sets of inputs
    pub fn merge(&mut self, other: &Totals) -> Result<()> {
        for (c, _) in other.entries.iter() {
            if self.get(c).is_none() {
                return Err(SureError::schema(c.as_str(), "totals"));
            }
        }
        let sums: Vec<_> = self
            .entries
            .iter()
            .map(|(c, _)| other.get(c).unwrap_or(0))
            .collect();
        self.accumulate(&sums)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn get(&self, column: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, t)| *t)
    }

    pub fn integration_column(&self) -> &str {
        &self.entries[self.integration].0
    }

    pub fn integration_total(&self) -> u64 {
        self.entries[self.integration].1
    }

    /// Condition columns with their totals (everything except the integration counter)
    pub fn conditions(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.integration)
            .map(|(_, (c, t))| (c.as_str(), *t))
    }

    /// Ratio of total integration counts to the total for `condition`
    pub fn multiplication_factor(&self, condition: &str) -> Option<f64> {
        self.get(condition)
            .map(|t| self.integration_total() as f64 / t as f64)
    }
}

/// Parse a count cell for summation.  Missing values give `None`.
fn parse_count(s: &str, origin: &str, line: usize, column: &str) -> Result<Option<u64>> {
    let s = s.trim();
    if is_missing(s) {
        return Ok(None);
    }
    if let Ok(x) = s.parse::<u64>() {
        return Ok(Some(x));
    }
    // Integral values written in float notation (e.g., 12.0)
    match s.parse::<f64>() {
        Ok(z) if z.is_finite() && z >= 0.0 && z.fract() == 0.0 && z < u64::MAX as f64 => {
            Ok(Some(z as u64))
        }
        _ => Err(SureError::InvalidValue {
            origin: origin.to_owned(),
            line,
            column: column.to_owned(),
            value: s.to_owned(),
        }),
    }
}

/// Sum the requested columns over every row of one count table.
///
/// Only the requested columns are parsed.  The result is in the order of `columns`.
/// Missing cells are skipped (they add nothing to the sum) and counted in a
/// warning per column.
pub fn sum_columns<R: BufRead>(rdr: &mut R, columns: &[String], origin: &str) -> Result<Vec<u64>> {
    let mut buf = String::new();
    let header = get_next_line(rdr, &mut buf).map_err(|e| SureError::io(e, origin))?;
    let idx: Vec<usize> = match header {
        Some(header) => columns
            .iter()
            .map(|c| {
                header
                    .iter()
                    .position(|h| *h == c.as_str())
                    .ok_or_else(|| SureError::schema(c.as_str(), origin))
            })
            .collect::<Result<_>>()?,
        None => {
            return Err(SureError::Malformed {
                origin: origin.to_owned(),
                line: 1,
                msg: "missing header line".to_owned(),
            })
        }
    };

    let mut sums = vec![0u64; columns.len()];
    let mut skipped = vec![0usize; columns.len()];
    let mut line = 1;
    while let Some(fields) = get_next_line(rdr, &mut buf).map_err(|e| SureError::io(e, origin))? {
        line += 1;
        if fields.is_empty() {
            continue;
        }
        for (((ix, s), c), k) in idx
            .iter()
            .zip(sums.iter_mut())
            .zip(columns)
            .zip(skipped.iter_mut())
        {
            let cell = fields.get(*ix).ok_or_else(|| SureError::Malformed {
                origin: origin.to_owned(),
                line,
                msg: format!("missing field for column '{}'", c),
            })?;
            match parse_count(cell, origin, line, c)? {
                Some(x) => {
                    *s = s
                        .checked_add(x)
                        .ok_or_else(|| SureError::Overflow { column: c.clone() })?
                }
                None => *k += 1,
            }
        }
    }
    for (c, k) in columns.iter().zip(skipped) {
        if k > 0 {
            warn!("{}: {} missing values in column {} not counted", origin, k, c)
        }
    }
    trace!("{}: summed {} lines", origin, line - 1);
    Ok(sums)
}

/// Write totals as `<name>\t<SUM>` lines under a `\tSUM` header
pub fn write_totals<W: Write>(wrt: &mut W, totals: &Totals, origin: &str) -> Result<()> {
    writeln!(wrt, "\t{}", SUM_COLUMN).map_err(|e| SureError::io(e, origin))?;
    for (c, t) in totals.entries() {
        writeln!(wrt, "{}\t{}", c, t).map_err(|e| SureError::io(e, origin))?;
    }
    Ok(())
}

/// Read a totals table, checking that it contains the integration counter
pub fn read_totals<R: BufRead>(rdr: &mut R, integration: &str, origin: &str) -> Result<Totals> {
    let mut buf = String::new();
    let sum_ix = match get_next_line(rdr, &mut buf).map_err(|e| SureError::io(e, origin))? {
        Some(header) => header
            .iter()
            .skip(1)
            .position(|h| *h == SUM_COLUMN)
            .map(|i| i + 1)
            .ok_or_else(|| SureError::schema(SUM_COLUMN, origin))?,
        None => return Err(SureError::schema(SUM_COLUMN, origin)),
    };

    let mut entries = Vec::new();
    let mut line = 1;
    while let Some(fields) = get_next_line(rdr, &mut buf).map_err(|e| SureError::io(e, origin))? {
        line += 1;
        if fields.is_empty() {
            continue;
        }
        let s = fields.get(sum_ix).ok_or_else(|| SureError::Malformed {
            origin: origin.to_owned(),
            line,
            msg: "missing SUM field".to_owned(),
        })?;
        let t = parse_count(s, origin, line, SUM_COLUMN)?.ok_or_else(|| {
            SureError::InvalidValue {
                origin: origin.to_owned(),
                line,
                column: SUM_COLUMN.to_owned(),
                value: s.to_string(),
            }
        })?;
        entries.push((fields[0].to_owned(), t));
    }
    debug!("Read {} totals from {}", entries.len(), origin);
    Totals::new(entries, integration, origin)
}
