use crate::cli::OutputFormat;
use crate::infra::read_request;
use clap::Args;
use saw_engine::config::AppConfig;
use saw_engine::error::AppError;
use saw_engine::report::ranking_csv_string;
use saw_engine::saw::format::{format_decimal, format_rupiah};
use saw_engine::saw::sample::{housing_request, HARGA};
use saw_engine::saw::{
    Alternative, CalculationRequest, CriterionId, MissingValuePolicy, SawEngine, SawResult,
};
use saw_engine::validation::check_calculation;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// JSON file holding `alternatives` and `criterias`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Reject alternatives missing a value for any criterion
    #[arg(long)]
    pub(crate) strict: bool,
    /// Output rendering
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Output rendering
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let CalculateArgs {
        input,
        strict,
        format,
    } = args;

    let mut engine_config = AppConfig::load()?.engine;
    if strict {
        engine_config.missing_values = MissingValuePolicy::Reject;
    }

    let request = read_request(&input)?;
    check_calculation(&request)?;
    let result = SawEngine::new(engine_config).calculate(&request.alternatives, &request.criterias)?;
    print!("{}", render(&request, &result, format, false)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let request = housing_request();
    let result = SawEngine::default().calculate(&request.alternatives, &request.criterias)?;

    if args.format == OutputFormat::Table {
        println!("SAW housing demo (bundled sample dataset)");
        println!();
    }
    print!("{}", render(&request, &result, args.format, true)?);
    Ok(())
}

fn render(
    request: &CalculationRequest,
    result: &SawResult,
    format: OutputFormat,
    show_prices: bool,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Table => Ok(render_table(request, result, show_prices)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
        OutputFormat::Csv => Ok(ranking_csv_string(result)?),
    }
}

fn render_table(request: &CalculationRequest, result: &SawResult, show_prices: bool) -> String {
    let mut out = String::new();

    out.push_str("Criteria\n");
    for criterion in &result.criterias {
        out.push_str(&format!(
            "- {} ({}, {}%)\n",
            criterion.name,
            criterion.polarity.label(),
            format_decimal(criterion.weight, 2)
        ));
    }

    if result.normalized_alternatives.is_empty() {
        out.push_str("\nRanking: no alternatives supplied\n");
        return out;
    }

    out.push_str("\nRanking\n");
    for alternative in &result.normalized_alternatives {
        out.push_str(&format!(
            "{}. {} ({}) | score {}",
            alternative.ranking,
            alternative.name,
            alternative.location,
            format_decimal(alternative.final_score, 4)
        ));
        if show_prices {
            if let Some(price) = raw_price(&request.alternatives, alternative.id.0) {
                out.push_str(&format!(" | {}", format_rupiah(price)));
            }
        }
        out.push('\n');

        let breakdown: Vec<String> = result
            .criterias
            .iter()
            .map(|criterion| {
                format!(
                    "{} {}",
                    criterion.name,
                    format_decimal(alternative.normalized(criterion.id), 4)
                )
            })
            .collect();
        out.push_str(&format!("   {}\n", breakdown.join(" | ")));
    }

    if let Some(best) = &result.best_alternative {
        out.push_str(&format!(
            "\nBest alternative: {} ({})\n",
            best.name,
            format_decimal(best.final_score, 4)
        ));
    }

    out
}

// Raw price from the sample dataset's price criterion.
fn raw_price(alternatives: &[Alternative], id: i64) -> Option<f64> {
    alternatives
        .iter()
        .find(|alternative| alternative.id.0 == id)
        .and_then(|alternative| alternative.value_for(CriterionId(HARGA)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use saw_engine::saw::calculate;

    fn sample() -> (CalculationRequest, SawResult) {
        let request = housing_request();
        let result = calculate(&request.alternatives, &request.criterias).expect("calculates");
        (request, result)
    }

    #[test]
    fn table_lists_best_alternative_and_prices() {
        let (request, result) = sample();

        let table = render_table(&request, &result, true);

        assert!(table.contains("- Harga (Cost, 25.00%)"));
        assert!(table.contains("1. Taman Sari Residence (Jakarta Selatan, DKI Jakarta) | score 0.8667 | Rp 750.000.000"));
        assert!(table.contains("Best alternative: Taman Sari Residence (0.8667)"));
        assert!(!render_table(&request, &result, false).contains("Rp "));
    }

    #[test]
    fn table_handles_empty_population() {
        let request = CalculationRequest {
            alternatives: Vec::new(),
            criterias: housing_request().criterias,
        };
        let result = calculate(&request.alternatives, &request.criterias).expect("calculates");

        let table = render_table(&request, &result, false);

        assert!(table.contains("no alternatives supplied"));
        assert!(!table.contains("Best alternative"));
    }

    #[test]
    fn json_rendering_matches_boundary_shape() {
        let (request, result) = sample();

        let rendered = render(&request, &result, OutputFormat::Json, false).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(value["bestAlternative"]["ranking"], 1);
    }

    #[test]
    fn csv_rendering_has_header_and_rows() {
        let (request, result) = sample();

        let rendered = render(&request, &result, OutputFormat::Csv, false).expect("renders");

        assert_eq!(rendered.lines().count(), 6);
    }

    #[test]
    fn request_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("saw-request-{}.json", std::process::id()));
        std::fs::write(
            &path,
            serde_json::to_vec(&housing_request()).expect("serializes"),
        )
        .expect("writes request");

        let loaded = read_request(&path).expect("loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, housing_request());
    }
}
