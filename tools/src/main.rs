//! ctc-dashboard: serves the Child Tax Credit reform dashboard over HTTP.
//!
//! Usage:
//!   ctc-dashboard --data-dir ./data --host 127.0.0.1 --port 8050
//!   ctc-dashboard --config dashboard.json --port 9000

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use ctc_core::{
    config::DashboardConfig,
    dashboard::Dashboard,
    dataset::Datasets,
    html,
    render::RenderModel,
    selection::{Selection, SelectionQuery, SelectorCatalogue},
};
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
struct AppState {
    dashboard: Dashboard,
    catalogue: Arc<SelectorCatalogue>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = build_config(&args)?;

    log::info!("Child Tax Credit Reform Dashboard");
    log::info!("  data_dir:  {}", config.data_dir);
    log::info!("  bind:      {}", config.bind_addr());

    // Startup load failures are fatal.
    let datasets = Datasets::load(&config)?;
    let state = AppState {
        dashboard: Dashboard::new(Arc::new(datasets)),
        catalogue: Arc::new(SelectorCatalogue::standard()),
    };

    let app = Router::new()
        .route("/", get(page_handler))
        .route("/api/render", get(render_handler))
        .route("/api/options", get(options_handler))
        .route("/health", get(|| async { "ok" }))
        .with_state(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    log::info!("Serving on http://{}", config.bind_addr());
    axum::serve(listener, app).await?;
    Ok(())
}

/// Config file first (if given), then command-line overrides.
fn build_config(args: &[String]) -> Result<DashboardConfig> {
    let mut config = match string_arg(args, "--config") {
        Some(path) => DashboardConfig::load(path).with_context(|| format!("Cannot load config {path}"))?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = string_arg(args, "--data-dir") {
        config.data_dir = dir.to_string();
    }
    if let Some(host) = string_arg(args, "--host") {
        config.host = host.to_string();
    }
    config.port = parse_arg(args, "--port", config.port);
    Ok(config)
}

async fn page_handler(
    State(state): State<AppState>,
    query: Result<Query<SelectionQuery>, QueryRejection>,
) -> impl IntoResponse {
    let (selection, model) = interact(&state.dashboard, query);
    Html(html::render_page(&selection, &state.catalogue, &model))
}

async fn render_handler(
    State(state): State<AppState>,
    query: Result<Query<SelectionQuery>, QueryRejection>,
) -> impl IntoResponse {
    Json(interact(&state.dashboard, query).1)
}

/// A query string that does not decode (a repeated key, say) gets the
/// same warning as any other bad selection instead of a bare 400.
fn interact(
    dashboard: &Dashboard,
    query: Result<Query<SelectionQuery>, QueryRejection>,
) -> (Selection, RenderModel) {
    match query {
        Ok(Query(query)) => dashboard.render_interaction(&query),
        Err(rejection) => Dashboard::reject_query(&rejection.body_text()),
    }
}

async fn options_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalogue.as_ref().clone())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;
    use ctc_core::{render::NO_DATA_MESSAGE, scenario::PolicyScenario};

    fn fixture_dashboard() -> Dashboard {
        let datasets = Datasets::load(&DashboardConfig::default_test()).unwrap();
        Dashboard::new(Arc::new(datasets))
    }

    fn decode(uri: &str) -> Result<Query<SelectionQuery>, QueryRejection> {
        Query::try_from_uri(&uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn repeated_query_key_renders_no_data_warning() {
        let query = decode("/?view=summary&view=parameters");
        assert!(query.is_err(), "repeated key should not decode");

        let (selection, model) = interact(&fixture_dashboard(), query);
        assert_eq!(selection, Selection::default());
        assert_eq!(model, RenderModel::warning(NO_DATA_MESSAGE));
    }

    #[test]
    fn decoded_query_renders_its_selection() {
        let (selection, model) = interact(&fixture_dashboard(), decode("/?reform=house25&view=parameters"));
        assert_eq!(selection.reform, PolicyScenario::House.into());
        assert!(model.as_table().is_some());
    }

    #[test]
    fn flags_override_defaults() {
        let args: Vec<String> = ["ctc-dashboard", "--data-dir", "/srv/ctc", "--port", "9000"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let config = build_config(&args).unwrap();
        assert_eq!(config.data_dir, "/srv/ctc");
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
    }
}
