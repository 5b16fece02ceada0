use std::path::{Path, PathBuf};

use anyhow::Context;
use regex::Regex;

fn count_file_regex(prefix: &str) -> anyhow::Result<Regex> {
    Regex::new(format!("^{}_([^_]+)[.](txt|tsv)([.]gz)?$", regex::escape(prefix)).as_str())
        .with_context(|| format!("Could not build file pattern for prefix {}", prefix))
}

/// Collect per chromosome count files `<prefix>_<chrom>.txt[.gz]` from `dir`.
/// Files are returned sorted by path.
pub fn collect_count_files(dir: Option<&PathBuf>, prefix: &str) -> anyhow::Result<Vec<PathBuf>> {
    let in_dir = dir.map(|p| p.to_owned()).unwrap_or_else(|| PathBuf::from("."));
    let reg = count_file_regex(prefix)?;
    let mut files = Vec::new();

    for f in in_dir
        .read_dir()
        .with_context(|| format!("Error checking input directory {}", in_dir.display()))?
    {
        let entry =
            f.with_context(|| format!("Could not get directory entry from {}", in_dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            if let Some(ctg) = matching_contig(&reg, &path) {
                trace!("Adding file {} ({})", path.display(), ctg);
                files.push(path)
            }
        }
    }

    if files.is_empty() {
        Err(anyhow!(
            "No input files found with prefix {} in {}",
            prefix,
            in_dir.display()
        ))
    } else {
        files.sort();
        debug!(
            "{} input files found with prefix {} in {}",
            files.len(),
            prefix,
            in_dir.display()
        );
        Ok(files)
    }
}

fn matching_contig(reg: &Regex, path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    reg.captures(name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_pattern() {
        let reg = count_file_regex("SuRE42").unwrap();
        assert_eq!(
            matching_contig(&reg, Path::new("/x/SuRE42_chr1.txt.gz")).as_deref(),
            Some("chr1")
        );
        assert_eq!(
            matching_contig(&reg, Path::new("SuRE42_chrX.tsv")).as_deref(),
            Some("chrX")
        );
        assert!(matching_contig(&reg, Path::new("SuRE42_chr1.bed")).is_none());
        assert!(matching_contig(&reg, Path::new("SuRE43_chr1.txt")).is_none());
    }

    #[test]
    fn prefix_is_literal() {
        let reg = count_file_regex("a.b").unwrap();
        assert!(matching_contig(&reg, Path::new("axb_chr1.txt")).is_none());
        assert!(matching_contig(&reg, Path::new("a.b_chr1.txt")).is_some());
    }

    #[test]
    fn files_are_collected_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for n in ["lib_chr2.txt", "lib_chr1.txt.gz", "other_chr1.txt", "lib_chr3.log"] {
            std::fs::write(dir.path().join(n), "").unwrap();
        }
        let d = dir.path().to_owned();
        let v = collect_count_files(Some(&d), "lib").unwrap();
        let names: Vec<_> = v
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["lib_chr1.txt.gz", "lib_chr2.txt"]);
        assert!(collect_count_files(Some(&d), "none").is_err());
    }
}
