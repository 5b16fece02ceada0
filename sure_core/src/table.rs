use std::{
    collections::HashSet,
    io::{BufRead, Write},
};

use utils::get_next_line;

use crate::error::{Result, SureError};

/// Cell contents treated as missing data (the NA tokens used upstream)
const MISSING: &[&str] = &["", "NA", "NaN", "nan", "N/A", "NULL", "null", "None"];

pub fn is_missing(s: &str) -> bool {
    MISSING.contains(&s)
}

/// In memory tab separated table
///
/// All cells are kept as text.  Every row has exactly one cell per header column.
/// Each row remembers the line of the source it came from, so rows derived
/// from it still report errors against the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    lines: Vec<usize>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        check_header(&header, "<table>")?;
        if let Some(i) = rows.iter().position(|r| r.len() != header.len()) {
            return Err(SureError::Malformed {
                origin: "<table>".to_owned(),
                line: i + 2,
                msg: format!(
                    "expected {} fields, found {}",
                    header.len(),
                    rows[i].len()
                ),
            });
        }
        // Line 1 is the header
        let lines = (2..rows.len() + 2).collect();
        Ok(Self {
            header,
            rows,
            lines,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source line of row `i`
    pub fn line(&self, i: usize) -> usize {
        self.lines[i]
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str, origin: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| SureError::schema(name, origin))
    }

    pub fn column(&self, ix: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r[ix].as_str())
    }

    /// New table with the same header and a different set of rows, each
    /// given with its source line
    pub(crate) fn with_rows(&self, rows: Vec<(usize, Vec<String>)>) -> Self {
        debug_assert!(rows.iter().all(|(_, r)| r.len() == self.header.len()));
        let (lines, rows) = rows.into_iter().unzip();
        Self {
            header: self.header.clone(),
            rows,
            lines,
        }
    }

    /// Set column `name` to `values`, replacing an existing column of that
    /// name or appending a new one.  `values` must have one entry per row.
    pub(crate) fn set_column(mut self, name: &str, values: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(ix) => {
                for (r, v) in self.rows.iter_mut().zip(values) {
                    r[ix] = v
                }
            }
            None => {
                self.header.push(name.to_owned());
                for (r, v) in self.rows.iter_mut().zip(values) {
                    r.push(v)
                }
            }
        }
        self
    }
}

fn check_header(header: &[String], origin: &str) -> Result<()> {
    if header.is_empty() {
        return Err(SureError::Malformed {
            origin: origin.to_owned(),
            line: 1,
            msg: "empty header".to_owned(),
        });
    }
    let mut seen = HashSet::new();
    for h in header.iter() {
        if !seen.insert(h.as_str()) {
            return Err(SureError::Malformed {
                origin: origin.to_owned(),
                line: 1,
                msg: format!("duplicate column '{}'", h),
            });
        }
    }
    Ok(())
}

/// Read a complete table.  The first line is the header; blank lines are skipped
pub fn read_table<R: BufRead>(rdr: &mut R, origin: &str) -> Result<Table> {
    let mut buf = String::new();
    let mut line = 0;

    let header: Vec<String> = match get_next_line(rdr, &mut buf)
        .map_err(|e| SureError::io(e, origin))?
    {
        Some(fields) if !fields.is_empty() => fields.iter().map(|s| s.to_string()).collect(),
        _ => {
            return Err(SureError::Malformed {
                origin: origin.to_owned(),
                line: 1,
                msg: "missing header line".to_owned(),
            })
        }
    };
    line += 1;
    check_header(&header, origin)?;

    let mut rows = Vec::new();
    let mut lines = Vec::new();
    while let Some(fields) = get_next_line(rdr, &mut buf).map_err(|e| SureError::io(e, origin))? {
        line += 1;
        if fields.is_empty() {
            continue;
        }
        if fields.len() != header.len() {
            return Err(SureError::Malformed {
                origin: origin.to_owned(),
                line,
                msg: format!(
                    "expected {} fields, found {}",
                    header.len(),
                    fields.len()
                ),
            });
        }
        rows.push(fields.iter().map(|s| s.to_string()).collect());
        lines.push(line);
    }
    trace!("Read {} rows from {}", rows.len(), origin);
    Ok(Table {
        header,
        rows,
        lines,
    })
}

pub fn write_table<W: Write>(wrt: &mut W, table: &Table, origin: &str) -> Result<()> {
    let mut write_row = |r: &[String]| writeln!(wrt, "{}", r.join("\t"));
    write_row(&table.header).map_err(|e| SureError::io(e, origin))?;
    for r in table.rows.iter() {
        write_row(r).map_err(|e| SureError::io(e, origin))?
    }
    Ok(())
}
