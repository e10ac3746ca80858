//! Stock Dashboard Worker - interactive stock-price dashboard on Cloudflare Workers
//!
//! Serves three dashboard pages built from the vega-datasets stocks table.
//!
//! # Architecture
//! - Main entry point routes HTTP requests to a page render
//! - Dataset fetched once per isolate and memoized
//! - Charts emitted as Vega-Lite specs and rendered in the browser by vega-embed
//!
//! # Pages
//! - Page 1: 2x2 grid of linked price time series
//! - Page 2: annotated price time series
//! - Page 3: mean price per symbol as pie and bar charts

#![allow(clippy::cast_precision_loss)] // Float casts OK for averages
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns

mod aggregate;
pub mod chart;
mod config;
mod dashboard;
mod dataset;
mod error;
mod pages;
mod types;

use worker::{Context, Env, Request, Response, Router, console_error, console_log, event};

pub use aggregate::aggregate_mean;
pub use config::Config;
pub use dashboard::render_page;
pub use dataset::{DatasetCache, filter_after, get_data, parse_stocks_csv};
pub use error::DashboardError;
pub use pages::{Page, PageLayout, PageSettings, PageView, PanelSpec, compose_page};
pub use types::*;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

/// Map the `:id` path parameter to a page
fn page_from_param(id: Option<&String>) -> error::Result<Page> {
    match id {
        Some(id) => id.parse(),
        None => Err(DashboardError::UnknownPage(String::new())),
    }
}

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "environment": config.environment,
                "dataset_cached": dataset::is_cached(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        })
        // Dashboard pages
        .get_async("/", |_req, ctx| async move { page_html(Page::Overview, &ctx.env).await })
        .get_async("/page/:id", |_req, ctx| async move {
            match page_from_param(ctx.param("id")) {
                Ok(page) => page_html(page, &ctx.env).await,
                Err(e) => Response::error(e.to_string(), 404),
            }
        })
        // Layout and Vega-Lite specs as JSON
        .get_async("/api/pages/:id", |_req, ctx| async move {
            match page_from_param(ctx.param("id")) {
                Ok(page) => page_json(page, &ctx.env).await,
                Err(e) => Response::error(e.to_string(), 404),
            }
        })
        .run(req, env)
        .await
}

async fn page_html(page: Page, env: &Env) -> WResult<Response> {
    let config = match Config::from_env(env) {
        Ok(c) => c,
        Err(e) => return Response::error(format!("Config error: {e}"), 500),
    };

    match build_view(page, &config).await.and_then(|view| render_page(&view, &config)) {
        Ok(html) => Response::from_html(html),
        Err(e) => {
            console_error!("{} render failed: {}", page, e);
            Response::error(format!("{e}"), 500)
        }
    }
}

async fn page_json(page: Page, env: &Env) -> WResult<Response> {
    let config = match Config::from_env(env) {
        Ok(c) => c,
        Err(e) => return Response::error(format!("Config error: {e}"), 500),
    };

    match build_view(page, &config).await {
        Ok(view) => Response::from_json(&view),
        Err(e) => {
            console_error!("{} spec failed: {}", page, e);
            Response::error(format!("{e}"), 500)
        }
    }
}

/// Load the table and compose one page
async fn build_view(page: Page, config: &Config) -> error::Result<PageView> {
    let table = get_data(config).await?;
    let view = compose_page(page, &table, &PageSettings::from_config(config))?;
    if config.log_level == "debug" {
        console_log!(
            "{}: {} charts from {} rows, {} symbols",
            page,
            view.charts.len(),
            table.len(),
            table.symbols().len()
        );
    }
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_param() {
        let id = |s: &str| Some(s.to_string());
        assert_eq!(page_from_param(id("1").as_ref()).unwrap(), Page::Overview);
        assert_eq!(page_from_param(id("2").as_ref()).unwrap(), Page::Annotated);
        assert_eq!(page_from_param(id("3").as_ref()).unwrap(), Page::Summary);
        assert_eq!(page_from_param(id("Page 3").as_ref()).unwrap(), Page::Summary);
    }

    #[test]
    fn test_page_from_param_unknown() {
        let err = page_from_param(Some(&"7".to_string())).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownPage(ref id) if id == "7"));
        assert!(page_from_param(Some(&"x".to_string())).is_err());
        assert!(matches!(page_from_param(None), Err(DashboardError::UnknownPage(_))));
    }
}
