use anyhow::Result;
use clap::Parser;
use statsflatten::{export, flatten_or_empty, FlattenedRecord};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Parses FreeSurfer statistics then flattens the included table(s) of brain
/// structure features into a 1-row table as CSV.
#[derive(Parser, Debug)]
#[command(
    name = "flattener",
    about = "Flatten FreeSurfer stats tables into a one-row morphometry CSV"
)]
struct Args {
    /// Input paths to .stats files, relative to the subject directory
    #[arg(
        short,
        long,
        num_args = 1..,
        default_values = ["stats/aseg.stats", "stats/rh.aparc.stats", "stats/lh.aparc.stats"]
    )]
    input: Vec<PathBuf>,

    /// Subject directory yielded from FreeSurfer
    #[arg(short, long, default_value = ".")]
    subject: PathBuf,

    /// Output CSV filename
    #[arg(short, long, default_value = "morphometry.csv")]
    output: PathBuf,

    /// Don't print the output filename
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    // Flatten each stats file in order, concatenating column-wise. A file
    // that fails one of the anticipated ways is logged inside the wrapper
    // and contributes nothing; the batch keeps going.
    let mut combined = FlattenedRecord::empty();
    for input in &args.input {
        let path = args.subject.join(input);
        let record = flatten_or_empty(&path)?;
        info!(path = %path.display(), columns = record.width(), "flattened");
        combined.append(record);
    }

    export::write_csv(&combined, &args.output)?;
    if !args.quiet {
        println!("{}", args.output.display());
    }

    Ok(())
}
