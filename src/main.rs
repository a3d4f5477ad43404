use std::process::ExitCode;

use clap::Parser;

use face_compare::{
    comparator::{load_or_compare, ComparisonSource},
    config::{CompareArgs, CompareConfig, COMPARISON_FILE, DETECTION_FILE},
    detector::detect_or_reuse,
    report::write_summary,
    service::FaceppContext,
    tools::log::{init_logging, log_error, LogServiceType},
    Result,
};


#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(LogServiceType::Other, format!("Error: {}", e));
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<()> {
    let args = CompareArgs::parse();
    let config = CompareConfig::from_args(&args)?;
    let service = FaceppContext::from_config(&config)?;

    let detection_path = config.artifact_path(DETECTION_FILE);
    let detection = detect_or_reuse(&service, &args.image, &detection_path, args.reuse_detection).await?;
    let faces = detection.descriptors();

    let comparison_path = config.artifact_path(COMPARISON_FILE);
    let (results, source) = load_or_compare(&service, &faces, &comparison_path).await?;
    if let ComparisonSource::Computed { failed } = source {
        if failed > 0 {
            log_error(LogServiceType::Comparison, format!("{} comparisons failed and were skipped", failed));
        }
    }

    write_summary(&mut std::io::stdout().lock(), &faces, &results)?;
    Ok(())
}
