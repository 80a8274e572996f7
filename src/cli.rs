use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "email-triage")]
#[command(version, about = "Classify a batch of emails and draft replies", long_about = None)]
pub struct Cli {
    /// Email body; repeat to send several emails in one batch
    #[arg(short, long = "text", value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Plain-text (.txt) file with emails separated by lines containing `---`
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print the results as JSON instead of the formatted report
    #[arg(long)]
    pub json: bool,
}
