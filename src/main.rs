use clap::Parser;
use nfr_funding::config::cli::Command;
use nfr_funding::utils::error::ErrorCategory;
use nfr_funding::utils::{logger, validation::Validate};
use nfr_funding::{
    CliConfig, FundingConfig, FundingError, LookupService, NfrApiClient, ReqwestTransport,
    SearchParams, SearchService,
};
use serde::Serialize;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting nfr-funding CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match &cli.config {
        Some(path) => FundingConfig::from_file(path),
        None => FundingConfig::from_env(),
    }
    .and_then(|config| config.validate().map(|_| config));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let transport =
        ReqwestTransport::with_timeout(Duration::from_secs(config.request_timeout_seconds))?;
    let client = NfrApiClient::new(transport, config.nfr_api_base_url()?);

    match cli.command {
        Command::Lookup { identifier } => {
            let service = LookupService::new(client, &config);
            match service.resolve(&identifier).await {
                Ok(funding) => print_json(&funding)?,
                Err(e) => exit_with(e),
            }
        }
        Command::Search {
            name,
            term,
            offset,
            size,
        } => {
            let service = SearchService::new(client, &config);
            let params = SearchParams {
                name,
                term,
                offset: Some(offset),
                size: Some(size),
            };
            match service.search_params(&params).await {
                Ok(page) => print_json(&page)?,
                Err(e) => exit_with(e),
            }
        }
    }

    Ok(())
}

fn print_json<S: Serialize>(value: &S) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_with(error: FundingError) -> ! {
    tracing::error!(
        "❌ Request failed: {} (Category: {:?}, Status: {})",
        error,
        error.category(),
        error.status_code()
    );
    eprintln!("❌ {}", error.public_detail());

    // 根據錯誤類別決定退出碼
    let exit_code = match error.category() {
        ErrorCategory::Client => 2,
        ErrorCategory::Upstream => 3,
        ErrorCategory::Internal => 1,
    };
    std::process::exit(exit_code);
}
