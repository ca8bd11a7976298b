mod compare;
mod logging;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "pricecheck",
    version,
    about = "Compare a vendor price sheet against alternate online vendors"
)]
struct Cli {
    /// Path to the price sheet (PDF or spreadsheet: xlsx, xls, xlsb, ods)
    infile: PathBuf,

    /// Path of the CSV report to write (overwritten)
    outfile: PathBuf,

    /// Seconds to wait after each search request
    #[arg(long, value_name = "SECS", default_value = "2", value_parser = parse_seconds)]
    delay: Duration,

    /// Search results to scrape per item
    #[arg(long, value_name = "N", default_value_t = 3)]
    results: usize,

    /// Timeout in seconds for each HTTP request
    #[arg(long, value_name = "SECS", default_value = "10", value_parser = parse_seconds)]
    timeout: Duration,

    /// Which rows decide the report columns
    #[arg(long, value_enum, default_value_t = Columns::FirstRow)]
    columns: Columns,

    /// Log each search and scraped page
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Columns {
    /// Header from the first row; extra alternate vendors on later rows are dropped
    FirstRow,
    /// Header wide enough for every row
    AllRows,
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration '{s}': {e}"))
}

fn main() {
    let cli = Cli::parse();
    logging::initialize(cli.verbose);

    if let Err(e) = compare::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
