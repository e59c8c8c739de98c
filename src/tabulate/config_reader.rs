use crate::args::Args;
use crate::tabulate::io_common::resolve_path;
use crate::tabulate::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_OUTPUT: &str = "output-result.csv";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "printResults")]
    pub print_results: Option<bool>,
}

/// The content of a run configuration file.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TopsisConfig {
    pub input: Option<InputSource>,
    // Either "1,1,2" or [1, 1, 2]
    pub weights: Option<JSValue>,
    // Either "+,-,+" or ["+", "-", "+"]
    pub impacts: Option<JSValue>,
    #[serde(rename = "zeroColumnPolicy")]
    pub zero_column_policy: Option<String>,
    pub output: Option<OutputSettings>,
}

impl TopsisConfig {
    pub fn weights_str(&self) -> CliResult<Option<String>> {
        read_js_list(&self.weights, "weights")
    }

    pub fn impacts_str(&self) -> CliResult<Option<String>> {
        read_js_list(&self.impacts, "impacts")
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputProvider {
    Csv,
    Xlsx,
}

impl InputProvider {
    pub fn parse(s: &str) -> CliResult<InputProvider> {
        match s {
            "csv" => Ok(InputProvider::Csv),
            "xlsx" | "excel" => Ok(InputProvider::Xlsx),
            x => UnknownProviderSnafu { provider: x }.fail(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum OutputTarget {
    File(String),
    Stdout,
}

/// All the settings of one run, after merging the configuration file and
/// the command line.
#[derive(PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input_path: String,
    pub provider: InputProvider,
    pub excel_worksheet_name: Option<String>,
    pub weights: String,
    pub impacts: String,
    pub rules: TopsisRules,
    pub output: OutputTarget,
    pub print_results: bool,
    pub reference: Option<String>,
}

pub fn read_config(path: &str) -> CliResult<TopsisConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    debug!("read_config: {:?}", contents);
    serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })
}

pub fn parse_policy(s: &str) -> CliResult<DegenerateColumnPolicy> {
    match s {
        "reject" => Ok(DegenerateColumnPolicy::Reject),
        "zeroFill" | "zero-fill" => Ok(DegenerateColumnPolicy::ZeroFill),
        x => UnknownPolicySnafu { policy: x }.fail(),
    }
}

/// Merges the command line arguments with the optional configuration file.
/// Command line values win.
pub fn resolve_settings(args: &Args) -> CliResult<RunSettings> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("resolve_settings: config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?
                .to_path_buf();
            (Some(config), Some(root))
        }
        None => (None, None),
    };
    let config_input = config.as_ref().and_then(|c| c.input.clone());
    let config_output = config.as_ref().and_then(|c| c.output.clone());

    let input_path = match (&args.input, &config_input) {
        (Some(p), _) => p.clone(),
        (None, Some(src)) => resolve_path(root.as_deref(), &src.file_path),
        (None, None) => return MissingArgumentSnafu { name: "input" }.fail(),
    };

    let provider_s: String = args
        .input_type
        .clone()
        .or_else(|| config_input.as_ref().and_then(|src| src.provider.clone()))
        .unwrap_or_else(|| "csv".to_string());
    let provider = InputProvider::parse(&provider_s)?;

    let excel_worksheet_name = args.excel_worksheet_name.clone().or_else(|| {
        config_input
            .as_ref()
            .and_then(|src| src.excel_worksheet_name.clone())
    });

    let config_weights = match config.as_ref() {
        Some(c) => c.weights_str()?,
        None => None,
    };
    let weights = args
        .weights
        .clone()
        .or(config_weights)
        .context(MissingArgumentSnafu { name: "weights" })?;
    let config_impacts = match config.as_ref() {
        Some(c) => c.impacts_str()?,
        None => None,
    };
    let impacts = args
        .impacts
        .clone()
        .or(config_impacts)
        .context(MissingArgumentSnafu { name: "impacts" })?;

    let policy = match args
        .zero_column_policy
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.zero_column_policy.clone()))
    {
        Some(s) => parse_policy(&s)?,
        None => TopsisRules::DEFAULT_RULES.degenerate_column,
    };

    let output = match (&args.out, config_output.as_ref().and_then(|o| o.file_path.clone())) {
        (Some(o), _) if o == "stdout" => OutputTarget::Stdout,
        (Some(o), _) => OutputTarget::File(o.clone()),
        (None, Some(o)) if o == "stdout" => OutputTarget::Stdout,
        (None, Some(o)) => OutputTarget::File(resolve_path(root.as_deref(), &o)),
        (None, None) => OutputTarget::File(DEFAULT_OUTPUT.to_string()),
    };

    // Stdout only carries the CSV when it is the output.
    let print_results = !args.quiet
        && output != OutputTarget::Stdout
        && config_output
            .as_ref()
            .and_then(|o| o.print_results)
            .unwrap_or(true);

    Ok(RunSettings {
        input_path,
        provider,
        excel_worksheet_name,
        weights,
        impacts,
        rules: TopsisRules {
            degenerate_column: policy,
        },
        output,
        print_results,
        reference: args.reference.clone(),
    })
}

fn read_js_list(x: &Option<JSValue>, name: &str) -> CliResult<Option<String>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::String(s)) => Ok(Some(s.clone())),
        Some(JSValue::Array(elts)) => {
            let mut tokens: Vec<String> = Vec::with_capacity(elts.len());
            for elt in elts {
                match elt {
                    JSValue::String(s) => tokens.push(s.clone()),
                    JSValue::Number(n) => tokens.push(n.to_string()),
                    _ => return ConfigListSnafu { name }.fail(),
                }
            }
            Ok(Some(tokens.join(",")))
        }
        Some(_) => ConfigListSnafu { name }.fail(),
    }
}
