use crate::{
    error::{Result, SureError},
    table::{is_missing, Table},
    totals::Totals,
};

/// Default prefix for derived normalized columns
pub const DEFAULT_NORM_PREFIX: &str = "ipcr.norm.sum.";

/// Count value for normalization.  Missing values become NaN and propagate.
fn parse_value(s: &str, origin: &str, line: usize, column: &str) -> Result<f64> {
    let s = s.trim();
    if is_missing(s) {
        Ok(f64::NAN)
    } else {
        s.parse::<f64>().map_err(|_| SureError::InvalidValue {
            origin: origin.to_owned(),
            line,
            column: column.to_owned(),
            value: s.to_owned(),
        })
    }
}

/// Name of the output column for condition `c`
pub fn norm_column_name(prefix: &str, c: &str) -> String {
    format!("{}{}", prefix, c)
}

/// Add one normalized column per condition counter in `totals`
///
/// norm[c] = (raw[c] / ipcr) * (ipcr_total / total[c])
///
/// Rows with a zero integration count give non-finite values.  These are
/// kept in the output and reported as a warning.
pub fn normalize(table: Table, totals: &Totals, prefix: &str, origin: &str) -> Result<Table> {
    let ipcr_col = totals.integration_column();
    let ipcr_ix = table.require_column(ipcr_col, origin)?;

    // Resolve every column before doing any work
    let conditions: Vec<(&str, usize, f64)> = totals
        .conditions()
        .map(|(c, _)| -> Result<_> {
            let ix = table.require_column(c, origin)?;
            let mf = totals
                .multiplication_factor(c)
                .ok_or_else(|| SureError::schema(c, "totals"))?;
            Ok((c, ix, mf))
        })
        .collect::<Result<_>>()?;

    let ipcr: Vec<f64> = table
        .column(ipcr_ix)
        .enumerate()
        .map(|(i, s)| parse_value(s, origin, table.line(i), ipcr_col))
        .collect::<Result<_>>()?;

    let mut derived = Vec::with_capacity(conditions.len());
    for (c, ix, mf) in conditions {
        if !mf.is_finite() {
            warn!(
                "Multiplication factor for {} is not finite (total = {})",
                c,
                totals.get(c).unwrap_or(0)
            )
        }
        debug!("Normalizing {}: multiplication factor {}", c, mf);
        let mut undefined = 0;
        let values: Vec<String> = table
            .column(ix)
            .zip(ipcr.iter())
            .enumerate()
            .map(|(i, (s, d))| {
                let z = parse_value(s, origin, table.line(i), c)? / d * mf;
                if !z.is_finite() {
                    undefined += 1
                }
                Ok(format!("{}", z))
            })
            .collect::<Result<_>>()?;
        if undefined > 0 {
            warn!(
                "{}: {} rows have undefined normalized values for {}",
                origin, undefined, c
            )
        }
        derived.push((norm_column_name(prefix, c), values));
    }

    Ok(derived
        .into_iter()
        .fold(table, |t, (name, values)| t.set_column(&name, values)))
}
