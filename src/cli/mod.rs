use crate::core::config::{load_config, Config};
use crate::core::pipeline::PipelineRequest;
use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "Please report issues at https://github.com/cusbg/prankweb/issues";

#[derive(Parser, Debug)]
#[command(
    name = "conservation-hmm",
    version,
    about = "Per-residue conservation scores from a HMMER homology search",
    long_about = "Searches a sequence database with the query protein (phmmer), optionally \
                  subsamples the resulting alignment, weights its sequences (esl-weight) and \
                  writes per-residue information content and gap frequency (esl-alistat) as \
                  tab-separated feature tables.",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Query protein in FASTA format (single record)
    #[arg(value_name = "FASTA_FILE")]
    pub fasta_file: PathBuf,

    /// Sequence database searched with phmmer
    #[arg(value_name = "DATABASE_FILE")]
    pub database_file: PathBuf,

    /// Directory for intermediate alignments and reports
    #[arg(value_name = "WORKING_DIRECTORY")]
    pub working_directory: PathBuf,

    /// Information-content feature table; gap frequencies go to <TARGET_FILE>.freqgap
    #[arg(value_name = "TARGET_FILE")]
    pub target_file: PathBuf,

    /// Also export the alignment (not yet implemented)
    #[arg(long)]
    pub msa: bool,

    /// Subsample alignments holding more than this many sequences
    #[arg(long = "max_seqs", visible_alias = "max-seqs", value_name = "N")]
    pub max_seqs: Option<usize>,

    /// Prefix prepended to each HMMER executable name (e.g. /opt/hmmer/bin/)
    #[arg(long, env = "HMMER_DIR", value_name = "PREFIX")]
    pub hmmer_dir: Option<String>,

    /// Seed for sequence sampling
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Merge command-line values over the config file (or defaults).
    pub fn resolve_config(&self) -> Result<Config, crate::ConservationError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(prefix) = &self.hmmer_dir {
            config.tools.hmmer_dir = prefix.clone();
        }
        if let Some(seed) = self.seed {
            config.sampling.seed = seed;
        }
        if self.max_seqs.is_some() {
            config.sampling.max_seqs = self.max_seqs;
        }
        Ok(config)
    }

    pub fn request(&self, config: &Config) -> PipelineRequest {
        PipelineRequest::new(
            &self.fasta_file,
            &self.database_file,
            &self.working_directory,
            &self.target_file,
        )
        .with_msa(self.msa)
        .with_max_seqs(config.sampling.max_seqs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["conservation-hmm", "q.fasta", "db.fasta", "work", "out.tsv"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        let cli = parse(&[]);
        assert_eq!(cli.fasta_file, PathBuf::from("q.fasta"));
        assert_eq!(cli.database_file, PathBuf::from("db.fasta"));
        assert_eq!(cli.working_directory, PathBuf::from("work"));
        assert_eq!(cli.target_file, PathBuf::from("out.tsv"));
        assert!(!cli.msa);
        assert_eq!(cli.max_seqs, None);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["--msa", "--max_seqs", "1000", "-vv"]);
        assert!(cli.msa);
        assert_eq!(cli.max_seqs, Some(1000));
        assert_eq!(cli.verbose, 2);

        let cli = parse(&["--max-seqs", "25"]);
        assert_eq!(cli.max_seqs, Some(25));
    }

    #[test]
    fn test_missing_positional_is_rejected() {
        assert!(Cli::try_parse_from(["conservation-hmm", "q.fasta", "db.fasta"]).is_err());
    }

    #[test]
    fn test_non_numeric_max_seqs_is_rejected() {
        let argv = ["conservation-hmm", "q", "d", "w", "t", "--max_seqs", "many"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_command_line_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conservation.toml");
        std::fs::write(
            &path,
            "[tools]\nhmmer_dir = \"/from/config/\"\n[sampling]\nseed = 1\nmax_seqs = 50\n",
        )
        .unwrap();
        let path = path.to_string_lossy().into_owned();

        let cli = parse(&["--config", &path, "--hmmer-dir", "/from/cli/", "--max_seqs", "10"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.tools.hmmer_dir, "/from/cli/");
        assert_eq!(config.sampling.seed, 1);
        assert_eq!(config.sampling.max_seqs, Some(10));

        let request = cli.request(&config);
        assert_eq!(request.max_seqs, Some(10));
        assert_eq!(request.target_file, PathBuf::from("out.tsv"));
    }

    #[test]
    fn test_config_file_threshold_used_when_flag_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conservation.toml");
        std::fs::write(&path, "[sampling]\nmax_seqs = 50\n").unwrap();
        let path = path.to_string_lossy().into_owned();

        let cli = parse(&["-c", &path]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(cli.request(&config).max_seqs, Some(50));
    }
}
