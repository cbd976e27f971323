use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;

mod config;
mod extract;
mod fetch;
mod insights;
mod models;
#[cfg(test)]
mod test_support;

use config::Config;
use fetch::Fetcher;
use models::{AnalysisResult, AnalyzeRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let fetcher = Fetcher::new(config.timeout, config.insecure_ssl)?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(fetcher)).await?;
    Ok(())
}

fn app(fetcher: Fetcher) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", post(analyze_form))
        .route("/analyze", post(analyze_json))
        .with_state(fetcher)
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn analyze_form(
    State(fetcher): State<Fetcher>,
    Form(req): Form<AnalyzeRequest>,
) -> Json<AnalysisResult> {
    Json(analyze(&fetcher, &req.url).await)
}

async fn analyze_json(
    State(fetcher): State<Fetcher>,
    Json(req): Json<AnalyzeRequest>,
) -> Json<AnalysisResult> {
    Json(analyze(&fetcher, &req.url).await)
}

/// Fetch, then score. Fetch failures become `AnalysisResult::Failure`.
async fn analyze(fetcher: &Fetcher, input: &str) -> AnalysisResult {
    tracing::info!(url = %fetch::normalize_url(input), "analyzing page");
    match fetcher.fetch(input).await {
        Ok(snapshot) => {
            let insights = insights::generate_insights(&snapshot)
                .into_iter()
                .map(|i| i.to_string())
                .collect();
            AnalysisResult::Success {
                snapshot,
                insights,
                domain: input.to_string(),
            }
        }
        Err(e) => {
            tracing::warn!(url = input, error = %e, "fetch failed");
            AnalysisResult::Failure {
                error: e.to_string(),
            }
        }
    }
}
