//! Terminal entry point: classify a news text or URL and fact-check it,
//! printing the JSON report.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use claimlens_common::observability::{init_logging, LogConfig};
use claimlens_config::AppConfigLoader;
use claimlens_factcheck::{initialize_fact_checker, ArtifactStore, FactChecker};
use claimlens_llm::classify::classify_news;
use claimlens_llm::ensure_llm_ready;
use claimlens_web::scrape::{resolve_claim_input, ScrapeConfig, ScrapeEngine};
use claimlens_web::search::client::CseApi;
use claimlens_web::search::{SearchConfig, SourceGateway};

#[derive(Parser, Debug)]
#[command(name = "claimlens", about = "Classify and fact-check a news claim")]
struct Cli {
    /// News text, or an http(s) URL whose article body will be used
    input: String,

    /// Recency category (e.g. "Evergreen News"); classified when omitted
    #[arg(long)]
    recency: Option<String>,

    /// Misinformation domain (Health/Finance/General/Other); classified when omitted
    #[arg(long)]
    domain: Option<String>,

    /// Optional claim identifier carried into the report
    #[arg(long)]
    id: Option<String>,

    /// Configuration file
    #[arg(long, default_value = "claimlens.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_path = init_logging(LogConfig {
        app_name: "claimlens",
        emit_stderr: false,
        ..LogConfig::default()
    })?;
    tracing::info!(log_path = %log_path.display(), "claimlens starting");

    let config = AppConfigLoader::new()
        .with_file(&cli.config)
        .load()
        .context("failed to load configuration")?;

    let llm = ensure_llm_ready(config.llm.as_ref().unwrap_or(&claimlens_common::LlmConfig::None))
        .context("LLM provider must be configured (see the `llm` config section)")?;

    let api = match (&config.search.api_key, &config.search.engine_id) {
        (Some(key), Some(cx)) => Some(
            CseApi::new(key.clone(), cx.clone(), &config.search.endpoint)
                .context("failed to build search client")?,
        ),
        _ => None,
    };
    let gateway = SourceGateway::new(
        api,
        SearchConfig {
            page_delay: Duration::from_millis(config.search.page_delay_ms),
            ..SearchConfig::default()
        },
    );

    let engine = ScrapeEngine::new(
        ScrapeConfig {
            timeout: Duration::from_secs(config.scrape.timeout_secs),
            ..ScrapeConfig::default()
        },
        &config.scrape.proxies,
    )?;

    let claim_text = resolve_claim_input(&engine, &cli.input)
        .await
        .context("could not resolve the claim input")?;

    let (recency_label, domain_label) = match (cli.recency, cli.domain) {
        (Some(recency), Some(domain)) => (recency, domain),
        (recency, domain) => {
            let classified = classify_news(llm.as_ref(), &claim_text)
                .await
                .context("classification call failed")?;
            eprintln!(
                "Classified as: {}, {}",
                classified.news_type_label, classified.domain_label
            );
            (
                recency.unwrap_or(classified.news_type_label),
                domain.unwrap_or(classified.domain_label),
            )
        }
    };

    let checker = FactChecker::new(
        Arc::new(gateway),
        Arc::new(engine),
        llm,
        Some(ArtifactStore::new(&config.results_dir)),
    );

    let report =
        initialize_fact_checker(&checker, &recency_label, &claim_text, &domain_label, cli.id).await;

    println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    Ok(())
}
