use clap::Parser;

/// This is a ranking program for the TOPSIS multi-criteria decision method.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The table of alternatives. The first column holds the names of the
    /// alternatives, the other columns the numeric criteria.
    #[clap(value_parser)]
    pub input: Option<String>,

    /// (list of comma-separated numbers, e.g. "1,1,2") The weight of each criterion.
    #[clap(value_parser, allow_hyphen_values = true)]
    pub weights: Option<String>,

    /// (list of comma-separated '+' or '-', e.g. "+,-,+") Whether each criterion should be
    /// maximized (+) or minimized (-).
    #[clap(value_parser, allow_hyphen_values = true)]
    pub impacts: Option<String>,

    /// (file path, optional) A JSON file describing the run. The other options override the
    /// values it contains.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) Where the result table is written in CSV format.
    /// Defaults to output-result.csv.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference CSV file containing the expected result. If provided, topsis will
    /// check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default csv) The type of the input: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the first worksheet) When using an Excel file, indicates the name of the
    /// worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (default reject) What to do with a criterion that only contains zeros: reject or zero-fill.
    #[clap(long, value_parser)]
    pub zero_column_policy: Option<String>,

    // Other arguments
    /// If passed as an argument, the summary table will not be printed.
    #[clap(long, takes_value = false)]
    pub quiet: bool,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
