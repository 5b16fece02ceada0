use std::path::{Path, PathBuf};

/// Config
///
/// Settings for one normalization run, generated from the command line
/// arguments.  Once set it is read only.
///
/// input - SuRE count file for one chromosome
/// totals - total counts file for the library (from sure_totals)
/// output - output file (gzip compressed)
/// library - library name added to each output row
/// ipcr_column - name of the iPCR count column
/// norm_prefix - prefix for the normalized cDNA columns
/// library_column - name of the library column
///
pub struct Config {
    input: PathBuf,
    totals: PathBuf,
    output: PathBuf,
    library: String,
    ipcr_column: String,
    norm_prefix: String,
    library_column: String,
}

impl Config {
    pub fn new(input: PathBuf, totals: PathBuf, output: PathBuf, library: String) -> Self {
        Self {
            input,
            totals,
            output,
            library,
            ipcr_column: sure_core::DEFAULT_IPCR_COLUMN.to_owned(),
            norm_prefix: sure_core::DEFAULT_NORM_PREFIX.to_owned(),
            library_column: sure_core::DEFAULT_LIBRARY_COLUMN.to_owned(),
        }
    }

    pub fn set_ipcr_column(&mut self, s: String) {
        self.ipcr_column = s
    }

    pub fn set_norm_prefix(&mut self, s: String) {
        self.norm_prefix = s
    }

    pub fn set_library_column(&mut self, s: String) {
        self.library_column = s
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn totals(&self) -> &Path {
        &self.totals
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn ipcr_column(&self) -> &str {
        &self.ipcr_column
    }

    pub fn norm_prefix(&self) -> &str {
        &self.norm_prefix
    }

    pub fn library_column(&self) -> &str {
        &self.library_column
    }
}
