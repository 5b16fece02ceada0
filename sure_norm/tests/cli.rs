/// Command line tests for sure_norm
use assert_cmd::Command;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const COUNTS: &str = "\
chr\tstart\tend\tSNP_ABS_POS\tSNP_SEQ\tSNP_PARENT\tSNP_VAR\tSNP_TYPE\tSNP_SUBTYPE\tSNP_ABS_POS_hg19\tcDNA\tcount
chr1\t100\t400\t150\tACG\tA\tG\tsnp\tts\t50\t20\t10
chr1\t200\t600\t250,300\tACG,TTA\tA,T\tG,C\tsnp,snp\tts,tv\t150,200\t30\t15
chr1\t200\t600\t250,300\tACG,TTA\tA,T\tG,C\tsnp,snp\tts,tv\t150,200\t30\t15
chr1\t300\t700\t\t\t\t\t\t\t\t8\t4
chr1\t900\t990\t950\tAAA\tA\tT\tsnp\ttv\t940\t6\t0
";

const TOTALS: &str = "\tSUM\ncDNA\t50\ncount\t25\n";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, content).unwrap();
    p
}

fn write_gz_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let p = dir.join(name);
    let mut wrt = GzEncoder::new(File::create(&p).unwrap(), Compression::default());
    wrt.write_all(content.as_bytes()).unwrap();
    wrt.finish().unwrap();
    p
}

fn read_gz(p: &Path) -> String {
    let mut s = String::new();
    GzDecoder::new(File::open(p).unwrap())
        .read_to_string(&mut s)
        .unwrap();
    s
}

fn norm_cmd(input: &Path, totals: &Path, output: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sure_norm").unwrap();
    cmd.arg("-i")
        .arg(input)
        .arg("-T")
        .arg(totals)
        .arg("-o")
        .arg(output)
        .arg("-L")
        .arg("SuRE42_1");
    cmd
}

#[test]
fn normalized_output_is_written() {
    let tmpdir = TempDir::new().unwrap();
    let input = write_file(tmpdir.path(), "SuRE42_1_chr1.txt", COUNTS);
    let totals = write_file(tmpdir.path(), "total_counts.txt", TOTALS);
    let output = tmpdir.path().join("norm").join("SuRE42_1_chr1.txt.gz");

    norm_cmd(&input, &totals, &output).assert().success();

    let s = read_gz(&output);
    let lines: Vec<_> = s.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("\tcDNA\tcount\tipcr.norm.sum.cDNA\tLib"));
    assert_eq!(
        lines[1],
        "chr1\t100\t400\t150\tACG\tA\tG\tsnp\tts\t50\t20\t10\t1\tSuRE42_1"
    );
    assert_eq!(
        lines[2],
        "chr1\t200\t600\t250\tACG\tA\tG\tsnp\tts\t150\t30\t15\t1\tSuRE42_1"
    );
    assert_eq!(
        lines[3],
        "chr1\t200\t600\t300\tTTA\tT\tC\tsnp\ttv\t200\t30\t15\t1\tSuRE42_1"
    );
    // Zero iPCR count is kept with an undefined value
    assert_eq!(
        lines[4],
        "chr1\t900\t990\t950\tAAA\tA\tT\tsnp\ttv\t940\t6\t0\tinf\tSuRE42_1"
    );
}

#[test]
fn compressed_input_is_read() {
    let tmpdir = TempDir::new().unwrap();
    let plain = write_file(tmpdir.path(), "chr1.txt", COUNTS);
    let input = write_gz_file(tmpdir.path(), "chr1.txt.gz", COUNTS);
    let totals = write_file(tmpdir.path(), "total_counts.txt", TOTALS);
    let out_plain = tmpdir.path().join("plain.txt.gz");
    let out_gz = tmpdir.path().join("gz.txt.gz");

    norm_cmd(&plain, &totals, &out_plain).assert().success();
    norm_cmd(&input, &totals, &out_gz).assert().success();

    let s = read_gz(&out_gz);
    assert_eq!(s.lines().count(), 5);
    assert_eq!(
        s.lines().nth(2),
        Some("chr1\t200\t600\t250\tACG\tA\tG\tsnp\tts\t150\t30\t15\t1\tSuRE42_1")
    );
    assert_eq!(s, read_gz(&out_plain));
}

#[test]
fn misaligned_variants_leave_no_output() {
    let tmpdir = TempDir::new().unwrap();
    let input = write_file(
        tmpdir.path(),
        "chr1.txt",
        &COUNTS.replace("ACG,TTA", "ACG,TTA,GGG"),
    );
    let totals = write_file(tmpdir.path(), "total_counts.txt", TOTALS);
    let output = tmpdir.path().join("out.txt.gz");

    norm_cmd(&input, &totals, &output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("variant columns"));
    assert!(!output.exists());
    // No temporary files left behind
    assert_eq!(fs::read_dir(tmpdir.path()).unwrap().count(), 2);
}

#[test]
fn totals_without_ipcr_key_fail() {
    let tmpdir = TempDir::new().unwrap();
    let input = write_file(tmpdir.path(), "chr1.txt", COUNTS);
    let totals = write_file(tmpdir.path(), "total_counts.txt", "\tSUM\ncDNA\t50\n");
    let output = tmpdir.path().join("out.txt.gz");

    norm_cmd(&input, &totals, &output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'count'"));
    assert!(!output.exists());
}

#[test]
fn custom_column_names() {
    let tmpdir = TempDir::new().unwrap();
    let input = write_file(
        tmpdir.path(),
        "chr1.txt",
        &COUNTS.replacen("\tcount\n", "\tipcr\n", 1),
    );
    let totals = write_file(tmpdir.path(), "total_counts.txt", "\tSUM\ncDNA\t50\nipcr\t25\n");
    let output = tmpdir.path().join("out.txt.gz");

    norm_cmd(&input, &totals, &output)
        .arg("-I")
        .arg("ipcr")
        .arg("--norm-prefix")
        .arg("norm_")
        .arg("--lib-col")
        .arg("library")
        .assert()
        .success();

    let s = read_gz(&output);
    let header = s.lines().next().unwrap();
    assert!(header.ends_with("\tcDNA\tipcr\tnorm_cDNA\tlibrary"));
}
