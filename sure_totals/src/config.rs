use std::path::{Path, PathBuf};

pub struct Config {
    input_files: Vec<PathBuf>,
    columns: Vec<String>,
    ipcr_column: String,
    output: PathBuf,
    threads: usize,
}

impl Config {
    pub fn new(
        input_files: Vec<PathBuf>,
        columns: Vec<String>,
        ipcr_column: String,
        output: PathBuf,
    ) -> Self {
        Self {
            input_files,
            columns,
            ipcr_column,
            output,
            threads: 1,
        }
    }

    pub fn set_threads(&mut self, nt: usize) {
        self.threads = nt.max(1)
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn ipcr_column(&self) -> &str {
        &self.ipcr_column
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}
