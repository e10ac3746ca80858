//! Page composition
//!
//! Each page is built from scratch on every render:
//! - Page 1: four linked time-series panels on a 2x2 grid
//! - Page 2: one annotated time series at full width
//! - Page 3: pie and bar charts of the mean price per symbol, stacked

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::aggregate::aggregate_mean;
use crate::chart::{
    ANNOTATIONS, ChartData, CompositeChart, FocusField, LinkedChartOptions, PieOptions,
    build_annotations, build_linked_chart, build_pie_chart,
};
use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::types::StockTable;

/// Vertical gap between the two rows of the overview grid
const GRID_ROW_GAP_PX: u32 = 50;
/// Gap between stacked charts on the summary page
const STACK_GAP_PX: u32 = 20;

/// Dashboard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    Overview,
    Annotated,
    Summary,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Overview, Page::Annotated, Page::Summary];

    /// Sidebar label
    pub fn label(self) -> &'static str {
        match self {
            Page::Overview => "Page 1",
            Page::Annotated => "Page 2",
            Page::Summary => "Page 3",
        }
    }

    /// Path segment used in `/page/:id`
    pub fn id(self) -> u8 {
        match self {
            Page::Overview => 1,
            Page::Annotated => 2,
            Page::Summary => 3,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Page {
    type Err = DashboardError;

    /// Accepts the sidebar label (`Page 2`) or the bare id (`2`)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Page::ALL
            .into_iter()
            .find(|page| page.label().eq_ignore_ascii_case(s) || page.id().to_string() == s)
            .ok_or_else(|| DashboardError::UnknownPage(s.to_string()))
    }
}

/// How charts are arranged on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLayout {
    /// Row-major grid
    Grid { columns: usize, row_gap_px: u32 },
    /// One chart at container width
    Single,
    /// Charts stacked vertically
    Stack { gap_px: u32 },
}

/// Parameters of one overview panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub rule_opacity: f64,
}

/// Per-render page parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub overview_panels: Vec<PanelSpec>,
    pub detail_rule_opacity: f64,
    pub pie_highlight: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl PageSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            overview_panels: config
                .overview_panel_titles
                .iter()
                .map(|title| PanelSpec {
                    title: title.clone(),
                    rule_opacity: config.grid_rule_opacity,
                })
                .collect(),
            detail_rule_opacity: config.detail_rule_opacity,
            pie_highlight: config.pie_highlight,
        }
    }
}

/// A composed page ready for the HTML shell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub title: &'static str,
    pub layout: PageLayout,
    pub charts: Vec<CompositeChart>,
}

/// Build every chart of `page` from `table`
pub fn compose_page(page: Page, table: &StockTable, settings: &PageSettings) -> Result<PageView> {
    let (layout, charts) = match page {
        Page::Overview => (
            PageLayout::Grid {
                columns: 2,
                row_gap_px: GRID_ROW_GAP_PX,
            },
            compose_overview(table, &settings.overview_panels)?,
        ),
        Page::Annotated => (
            PageLayout::Single,
            vec![compose_annotated(table, settings.detail_rule_opacity)?],
        ),
        Page::Summary => (
            PageLayout::Stack { gap_px: STACK_GAP_PX },
            compose_summary(table, settings)?,
        ),
    };

    Ok(PageView {
        page,
        title: page.label(),
        layout,
        charts,
    })
}

fn compose_overview(table: &StockTable, panels: &[PanelSpec]) -> Result<Vec<CompositeChart>> {
    let data = ChartData::from_rows(&table.rows)?;
    Ok(panels
        .iter()
        .map(|panel| {
            let options = LinkedChartOptions::new(FocusField::Date)
                .rule_opacity(panel.rule_opacity)
                .title(panel.title.clone());
            build_linked_chart(data.clone(), &options)
        })
        .collect())
}

fn compose_annotated(table: &StockTable, rule_opacity: f64) -> Result<CompositeChart> {
    let options = LinkedChartOptions::new(FocusField::Date)
        .rule_opacity(rule_opacity)
        .title("Evolution of stock prices");
    let chart = build_linked_chart(ChartData::from_rows(&table.rows)?, &options);
    Ok(chart.overlay(build_annotations(&ANNOTATIONS)?))
}

fn compose_summary(table: &StockTable, settings: &PageSettings) -> Result<Vec<CompositeChart>> {
    let means = ChartData::from_rows(&aggregate_mean(table))?;

    let pie = build_pie_chart(
        means.clone(),
        &PieOptions {
            highlight: settings.pie_highlight,
            title: None,
        },
    );
    let bars = build_linked_chart(
        means,
        &LinkedChartOptions::new(FocusField::Symbol).rule_opacity(settings.detail_rule_opacity),
    );

    Ok(vec![pie, bars])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Mark;
    use crate::types::Observation;
    use chrono::NaiveDate;

    fn table() -> StockTable {
        let mut rows = Vec::new();
        for (symbol, base) in [("MSFT", 25.0), ("AMZN", 40.0), ("IBM", 80.0), ("GOOG", 400.0), ("AAPL", 30.0)] {
            for month in 1..=3 {
                rows.push(Observation {
                    date: NaiveDate::from_ymd_opt(2005, month, 1).unwrap(),
                    symbol: symbol.to_string(),
                    price: base + f64::from(month),
                });
            }
        }
        StockTable::new(rows)
    }

    #[test]
    fn test_page_from_str() {
        assert_eq!("Page 1".parse::<Page>().unwrap(), Page::Overview);
        assert_eq!("page 2".parse::<Page>().unwrap(), Page::Annotated);
        assert_eq!("3".parse::<Page>().unwrap(), Page::Summary);
        assert!(matches!("Page 4".parse::<Page>(), Err(DashboardError::UnknownPage(_))));
        assert_eq!(Page::Summary.to_string(), "Page 3");
    }

    #[test]
    fn test_overview_is_a_grid_of_identical_linked_charts() {
        let table = table();
        let view = compose_page(Page::Overview, &table, &PageSettings::default()).unwrap();

        assert_eq!(view.layout, PageLayout::Grid { columns: 2, row_gap_px: 50 });
        assert_eq!(view.charts.len(), 4);

        let expected = build_linked_chart(
            ChartData::from_rows(&table.rows).unwrap(),
            &LinkedChartOptions::new(FocusField::Date).title("Graph 1"),
        );
        assert!(view.charts.iter().all(|chart| *chart == expected));
    }

    #[test]
    fn test_overview_panels_are_parameterized() {
        let mut settings = PageSettings::default();
        settings.overview_panels[3] = PanelSpec {
            title: "GOOG only".to_string(),
            rule_opacity: 0.9,
        };
        let view = compose_page(Page::Overview, &table(), &settings).unwrap();

        assert_eq!(view.charts[0].title.as_deref(), Some("Graph 1"));
        assert_eq!(view.charts[3].title.as_deref(), Some("GOOG only"));
        assert_eq!(view.charts[3].marks(), view.charts[0].marks());
    }

    #[test]
    fn test_annotated_page_has_four_layers() {
        let view = compose_page(Page::Annotated, &table(), &PageSettings::default()).unwrap();

        assert_eq!(view.layout, PageLayout::Single);
        assert_eq!(view.charts.len(), 1);
        let chart = &view.charts[0];
        assert_eq!(chart.marks(), vec![Mark::Line, Mark::Circle, Mark::Rule, Mark::Text]);
        assert_eq!(chart.title.as_deref(), Some("Evolution of stock prices"));
        assert_eq!(chart.layer[3].data.as_ref().map(ChartData::len), Some(4));

        let json = chart.to_json().unwrap();
        assert_eq!(json["layer"][2]["encoding"]["opacity"]["condition"]["value"], 0.3);
    }

    #[test]
    fn test_summary_page_has_pie_and_bar() {
        let view = compose_page(Page::Summary, &table(), &PageSettings::default()).unwrap();

        assert_eq!(view.layout, PageLayout::Stack { gap_px: 20 });
        assert_eq!(view.charts.len(), 2);
        assert_eq!(view.charts[0].marks(), vec![Mark::Arc]);
        assert_eq!(view.charts[1].marks(), vec![Mark::Bar, Mark::Circle, Mark::Rule]);

        for chart in &view.charts {
            assert_eq!(chart.data.as_ref().map(ChartData::len), Some(5));
        }
    }

    #[test]
    fn test_summary_of_empty_table() {
        let view = compose_page(Page::Summary, &StockTable::default(), &PageSettings::default()).unwrap();
        assert!(view.charts.iter().all(|c| c.data.as_ref().is_some_and(ChartData::is_empty)));
    }

    #[test]
    fn test_page_view_serialization() {
        let view = compose_page(Page::Summary, &table(), &PageSettings::default()).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["page"], "Summary");
        assert_eq!(json["layout"], serde_json::json!({"kind": "stack", "gap_px": 20}));
        assert_eq!(json["charts"][1]["layer"][0]["mark"]["type"], "bar");
    }
}
