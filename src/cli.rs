use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Mirror NVD CVE and CPE Match Criteria records into a git repository
#[derive(Parser, Debug)]
#[command(name = "nvd-sync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Mirror NVD CVE and CPE Match Criteria records into a git repository",
    long_about = None
)]
#[command(group(ArgGroup::new("mode").args(["resync", "cveid", "matchid"])))]
pub struct Args {
    /// Root directory of the mirror repository
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Fetch every record instead of the changes since syncdate.json
    #[arg(short, long)]
    pub resync: bool,

    /// Fetch a single CVE, e.g. CVE-2021-44228
    #[arg(short, long, value_name = "CVEID")]
    pub cveid: Option<String>,

    /// Fetch a single CPE match criteria by its UUID
    #[arg(short, long, value_name = "MATCHCRITERIAID")]
    pub matchid: Option<String>,

    /// Config file (defaults to <PATH>/nvd-sync.config.yml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// NVD API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// NVD API key
    #[arg(long, value_name = "KEY", env = "NVD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Commit the updated mirror when anything changed
    #[arg(long)]
    pub commit: bool,

    /// Push the commit to the upstream branch
    #[arg(long, requires = "commit")]
    pub push: bool,

    /// Commit message; {timestamp} is replaced with the run time
    #[arg(long, value_name = "MSG")]
    pub message: Option<String>,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
