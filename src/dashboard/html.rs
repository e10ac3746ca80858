//! Dashboard HTML fragments
//!
//! Contains the page structure:
//! - Sidebar with the page selector
//! - Chart containers arranged per `PageLayout`

use std::fmt::Write;

use crate::pages::{Page, PageLayout};

/// Sidebar with one radio-style link per page
pub fn sidebar(active: Page) -> String {
    let links = Page::ALL
        .iter()
        .map(|page| {
            let class = if *page == active { "page-link active" } else { "page-link" };
            format!(
                r#"            <a class="{class}" href="/page/{id}"><span class="radio"></span>{label}</a>"#,
                id = page.id(),
                label = page.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"    <aside class="sidebar">
        <h1>Dashboard</h1>
        <nav class="page-select">
            <span class="nav-label">Select Page</span>
{links}
        </nav>
    </aside>"#
    )
}

fn chart_slot(index: usize) -> String {
    format!(r#"<div class="chart" id="chart-{index}"></div>"#)
}

/// Containers for `count` charts, numbered `chart-0` onwards
pub fn chart_area(layout: PageLayout, count: usize) -> String {
    let mut out = String::new();
    match layout {
        PageLayout::Grid { columns, row_gap_px } => {
            let columns = columns.max(1);
            let rows = count.div_ceil(columns);
            for row in 0..rows {
                if row > 0 {
                    let _ = writeln!(
                        out,
                        r#"        <div class="row-separator" style="margin-bottom: {row_gap_px}px !important;"></div>"#
                    );
                }
                let _ = writeln!(out, r#"        <div class="chart-row">"#);
                for index in (row * columns..(row + 1) * columns).filter(|i| *i < count) {
                    let _ = writeln!(
                        out,
                        r#"            <div class="column"><div class="element-container">{}</div></div>"#,
                        chart_slot(index)
                    );
                }
                let _ = writeln!(out, "        </div>");
            }
        }
        PageLayout::Single => {
            for index in 0..count {
                let _ = writeln!(
                    out,
                    r#"        <div class="element-container">{}</div>"#,
                    chart_slot(index)
                );
            }
        }
        PageLayout::Stack { gap_px } => {
            let _ = writeln!(out, r#"        <div class="row-container">"#);
            for index in 0..count {
                let _ = writeln!(
                    out,
                    r#"            <div class="chart-container" style="margin-bottom: {gap_px}px;">{}</div>"#,
                    chart_slot(index)
                );
            }
            let _ = writeln!(out, "        </div>");
        }
    }
    out
}
