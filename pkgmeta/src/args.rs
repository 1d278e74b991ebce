use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::batch::FailurePolicy;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pkgmeta",
    version,
    about = "Extract module and export metadata from compiled Meteor package bundles"
)]
pub struct PkgmetaCli {
    /// Config file (defaults to pkgmeta.config.json5 in the working directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Skip bundles that fail instead of aborting.
    #[arg(long)]
    pub keep_going: bool,

    #[arg(long)]
    pub pretty: bool,

    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(required = true, value_name = "BUNDLE")]
    pub bundles: Vec<PathBuf>,
}

impl PkgmetaCli {
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::AbortOnFirst
        }
    }
}

pub fn parse_args<I, T>(argv: I) -> Result<PkgmetaCli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    PkgmetaCli::try_parse_from(argv)
}
