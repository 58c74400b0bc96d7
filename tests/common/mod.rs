//! Common test utilities for pipeline tests
//!
//! Builds scratch directories, query files and a scripted stand-in for the
//! HMMER tools that writes realistic intermediate files.
#![allow(dead_code)]

use conservation_hmm::tools::testing::{flag_value, last_argument};
use conservation_hmm::tools::{HmmerTool, ScriptedResponse, ScriptedRunner};
use conservation_hmm::PipelineRequest;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch layout for one pipeline run
pub struct TestEnvironment {
    temp_dir: TempDir,
    pub fasta: PathBuf,
    pub database: PathBuf,
    pub work: PathBuf,
    pub target: PathBuf,
}

impl TestEnvironment {
    /// Create a fresh environment holding `fasta` as the query
    pub fn with_query(fasta: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let work = temp_dir.path().join("work");
        fs::create_dir_all(&work).expect("Failed to create working dir");

        let fasta_path = temp_dir.path().join("query.fasta");
        fs::write(&fasta_path, fasta).expect("Failed to write query");
        let database = temp_dir.path().join("db.fasta");
        fs::write(&database, ">s1\nMKV\n").expect("Failed to write database");

        TestEnvironment {
            fasta: fasta_path,
            database,
            work,
            target: temp_dir.path().join("features.tsv"),
            temp_dir,
        }
    }

    pub fn request(&self) -> PipelineRequest {
        PipelineRequest::new(&self.fasta, &self.database, &self.work, &self.target)
    }

    pub fn freqgap(&self) -> PathBuf {
        let mut name = self.target.clone().into_os_string();
        name.push(".freqgap");
        PathBuf::from(name)
    }

    pub fn work_file(&self, name: &str) -> PathBuf {
        self.work.join(name)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Stockholm alignment with `count` named sequences of `columns` residues
pub fn stockholm(names: &[String], columns: usize) -> String {
    let mut text = String::from("# STOCKHOLM 1.0\n\n");
    for name in names {
        text.push_str(&format!("#=GS {} DE homolog\n", name));
    }
    text.push('\n');
    for name in names {
        text.push_str(&format!("{:<20} {}\n", name, "M".repeat(columns)));
    }
    text.push_str("//\n");
    text
}

pub fn hit_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("hit{}/1-50", i)).collect()
}

/// `esl-alistat --icinfo` style report with one row per column
pub fn icinfo_report(columns: usize) -> String {
    let mut text = String::from(
        "# Alignment file: query.fasta.sto.w\n#\n# column  nres   ngap      IC  relent\n# ------ ----- ------ ------- -------\n",
    );
    for col in 1..=columns {
        text.push_str(&format!(
            "{:>8} {:>5} {:>6} {:>7.4} {:>7.4}\n",
            col,
            4,
            0,
            col as f64 / 10.0,
            col as f64 / 20.0
        ));
    }
    text.push_str("//\n");
    text
}

/// `esl-alistat --rinfo` style report with one row per column
pub fn rinfo_report(columns: usize) -> String {
    let mut text = String::from(
        "# Alignment file: query.fasta.sto.w\n#\n#  aln_col  cons_col    nres    ngap    fres    fgap\n#  -------  --------  ------  ------  ------  ------\n",
    );
    for col in 1..=columns {
        text.push_str(&format!(
            "{:>10} {:>9} {:>7.2} {:>7.2} {:>7.4} {:>7.4}\n",
            col,
            col,
            4.0,
            0.0,
            1.0,
            col as f64 / 100.0
        ));
    }
    text.push_str("//\n");
    text
}

fn count_names(path: &Path) -> io::Result<usize> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().filter(|l| l.starts_with("#=GS")).count())
}

/// What the scripted `phmmer` should leave behind
#[derive(Debug, Clone, Copy)]
pub enum SearchResult {
    /// Write an alignment holding this many hits
    Hits(usize),
    /// Write no alignment file at all
    NoFile,
    /// Exit with this code and write nothing
    Fails(i32),
}

/// A runner whose tools behave like HMMER for an alignment of `columns` columns.
///
/// `esl-weight` and `esl-alistat` fail the way the real tools do when their
/// input is missing or names no sequences.
pub fn hmmer_runner(search: SearchResult, columns: usize) -> ScriptedRunner {
    ScriptedRunner::new()
        .on(HmmerTool::Phmmer, move |inv| {
            let alignment = flag_value(inv, "-A").expect("phmmer -A argument");
            match search {
                SearchResult::Hits(count) => {
                    fs::write(&alignment, stockholm(&hit_names(count), columns))?;
                    Ok(ScriptedResponse::success())
                }
                SearchResult::NoFile => Ok(ScriptedResponse::success()),
                SearchResult::Fails(code) => Ok(ScriptedResponse::failure(code)),
            }
        })
        .on(HmmerTool::EslAlimanip, move |inv| {
            let output = flag_value(inv, "-o").expect("esl-alimanip -o argument");
            let selection = flag_value(inv, "--seq-k").expect("esl-alimanip --seq-k argument");
            let names: Vec<String> = fs::read_to_string(selection)?
                .lines()
                .map(str::to_string)
                .collect();
            fs::write(output, stockholm(&names, columns))?;
            Ok(ScriptedResponse::success())
        })
        .on(HmmerTool::EslWeight, |inv| {
            let input = last_argument(inv).expect("esl-weight input");
            match fs::read_to_string(&input) {
                Ok(text) => Ok(ScriptedResponse::with_stdout(
                    text.replace("# STOCKHOLM 1.0\n", "# STOCKHOLM 1.0\n#=GF WT PB\n"),
                )),
                Err(_) => Ok(ScriptedResponse::failure(1)),
            }
        })
        .on(HmmerTool::EslAlistat, move |inv| {
            let weighted = last_argument(inv).expect("esl-alistat input");
            if count_names(&weighted).unwrap_or(0) == 0 {
                return Ok(ScriptedResponse::failure(1));
            }
            let ic = flag_value(inv, "--icinfo").expect("--icinfo argument");
            let r = flag_value(inv, "--rinfo").expect("--rinfo argument");
            fs::write(ic, icinfo_report(columns))?;
            fs::write(r, rinfo_report(columns))?;
            Ok(ScriptedResponse::success())
        })
}
