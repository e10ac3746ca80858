//! Dashboard module - page shell around the chart specs
//!
//! Turns a composed `PageView` into a complete HTML document.
//! Separated into HTML, CSS, and JS submodules for maintainability.
//!
//! # Architecture
//! - `html.rs`: sidebar and chart containers
//! - `css.rs`: theme and layout spacing
//! - `js.rs`: vega-embed bootstrap

mod css;
mod html;
mod js;

use crate::config::Config;
use crate::error::Result;
use crate::pages::PageView;

/// Generate the complete HTML page for one dashboard view
pub fn render_page(view: &PageView, config: &Config) -> Result<String> {
    let specs = script_safe_json(&serde_json::to_string(&view.charts)?);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dashboard - {title}</title>
    <script src="{cdn}/vega@5"></script>
    <script src="{cdn}/vega-lite@5"></script>
    <script src="{cdn}/vega-embed@6"></script>
    <style>
{css}
{layout_css}
    </style>
</head>
<body>
<div class="app">
{sidebar}
    <main class="main">
        <header><h2>{title}</h2></header>
{charts}
    </main>
</div>
    <script>
const CHART_SPECS = {specs};
{js}
    </script>
</body>
</html>"#,
        title = view.title,
        cdn = config.vega_cdn,
        css = css::STYLES,
        layout_css = css::LAYOUT_STYLES,
        sidebar = html::sidebar(view.page),
        charts = html::chart_area(view.layout, view.charts.len()),
        js = js::SCRIPT,
    ))
}

/// JSON that cannot close the surrounding `<script>` element
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
