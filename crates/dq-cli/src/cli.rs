//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dq_model::Field;
use dq_model::options::DEFAULT_ID_COLUMN;

#[derive(Parser)]
#[command(
    name = "dq",
    version,
    about = "Customer data-quality checker - detect, correct and re-validate customer records",
    long_about = "Detect, correct and re-validate Slovenian customer records.\n\n\
                  Every record gets a status per field group (first name, last name,\n\
                  address, email, phone) and an overall status. The input table is\n\
                  written back with detection, correction and status columns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow customer values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a customer CSV and write the augmented table.
    Run(RunArgs),

    /// Run detection and correction on a single value.
    Check(CheckArgs),

    /// List the error-code catalog and its detect/correct switches.
    Rules(RulesArgs),

    /// Verify the reference data manifest and print counts.
    Doctor(DoctorArgs),
}

#[derive(Parser)]
pub struct ReferenceArgs {
    /// Reference data directory (default: $DQ_REFERENCE_DIR, then the bundled data).
    #[arg(long = "reference-dir", value_name = "DIR")]
    pub reference_dir: Option<PathBuf>,

    /// Rule configuration CSV overriding the one in the reference manifest.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Customer CSV to check.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Augmented CSV path (default: <INPUT stem>_checked.csv next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write a JSON run report.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Name of the record identifier column.
    #[arg(
        long = "id-column",
        value_name = "NAME",
        default_value = DEFAULT_ID_COLUMN
    )]
    pub id_column: String,

    /// Minimum frequency for a first name or surname to count as known.
    #[arg(long = "min-name-frequency", value_name = "N", default_value_t = 1)]
    pub min_name_frequency: u64,

    /// Process records on one thread.
    #[arg(long = "sequential")]
    pub sequential: bool,

    /// Number of rows in the top error codes table.
    #[arg(long = "top-codes", value_name = "N", default_value_t = 10)]
    pub top_codes: usize,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Field whose rules to run.
    #[arg(long = "field", value_enum)]
    pub field: FieldArg,

    /// Value to check. Leading and trailing whitespace is kept.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    #[command(flatten)]
    pub reference: ReferenceArgs,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Only list codes of this field.
    #[arg(long = "field", value_enum)]
    pub field: Option<FieldArg>,

    #[command(flatten)]
    pub reference: ReferenceArgs,
}

#[derive(Parser)]
pub struct DoctorArgs {
    /// Reference data directory (default: $DQ_REFERENCE_DIR, then the bundled data).
    #[arg(long = "reference-dir", value_name = "DIR")]
    pub reference_dir: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// Checked fields as CLI values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    FirstName,
    LastName,
    Email,
    Phone,
    Street,
    HouseNumber,
    PostalCode,
    City,
}

impl From<FieldArg> for Field {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::FirstName => Field::FirstName,
            FieldArg::LastName => Field::LastName,
            FieldArg::Email => Field::Email,
            FieldArg::Phone => Field::Phone,
            FieldArg::Street => Field::Street,
            FieldArg::HouseNumber => Field::HouseNumber,
            FieldArg::PostalCode => Field::PostalCode,
            FieldArg::City => Field::City,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
