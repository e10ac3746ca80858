//! Linked hover charts
//!
//! A linked chart is three layers over the same rows:
//! - base: line (time series) or bar (categorical)
//! - highlight: circles restricted to the hovered rows
//! - tooltip: a rule carrying the tooltip fields, visible only near the cursor
//!
//! The tooltip layer is always last so it wins hit-testing.

use super::layer::{
    Channel, ChartData, ChartLayer, CompositeChart, Encoding, FieldDef, HoverSelection, Mark,
    MarkDef, Trigger,
};

/// Highlight circle size in square pixels
const HIGHLIGHT_SIZE: f64 = 65.0;
const PIE_POINT_SIZE: f64 = 100.0;

/// Attribute driving the x axis and the hover match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    /// Time series over `date`
    Date,
    /// One bar per `symbol`
    Symbol,
}

impl FocusField {
    pub fn name(self) -> &'static str {
        match self {
            FocusField::Date => "date",
            FocusField::Symbol => "symbol",
        }
    }

    pub fn base_mark(self) -> Mark {
        match self {
            FocusField::Date => Mark::Line,
            FocusField::Symbol => Mark::Bar,
        }
    }

    /// (field, display title) pairs shown by the tooltip rule
    pub fn tooltip_titles(self) -> [(&'static str, &'static str); 2] {
        match self {
            FocusField::Date => [("date", "Date"), ("price", "Price (USD)")],
            FocusField::Symbol => [("symbol", "Symbol"), ("price", "Price (USD)")],
        }
    }

    fn x(self) -> FieldDef {
        match self {
            FocusField::Date => FieldDef::temporal("date"),
            FocusField::Symbol => FieldDef::nominal("symbol").sort("-y"),
        }
    }

    fn tooltip(self) -> Vec<FieldDef> {
        self.tooltip_titles()
            .into_iter()
            .map(|(field, title)| tooltip_field(field).title(title))
            .collect()
    }
}

fn tooltip_field(field: &str) -> FieldDef {
    match field {
        "date" => FieldDef::temporal(field),
        "price" => FieldDef::quantitative(field),
        _ => FieldDef::nominal(field),
    }
}

/// Parameters of [`build_linked_chart`]
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedChartOptions {
    pub focus: FocusField,
    /// Match the data point nearest to the pointer
    pub nearest: bool,
    pub trigger: Trigger,
    /// Opacity of the tooltip rule while hovered
    pub rule_opacity: f64,
    pub title: Option<String>,
}

impl Default for LinkedChartOptions {
    fn default() -> Self {
        Self {
            focus: FocusField::Date,
            nearest: true,
            trigger: Trigger::Hover,
            rule_opacity: 0.5,
            title: None,
        }
    }
}

impl LinkedChartOptions {
    pub fn new(focus: FocusField) -> Self {
        Self {
            focus,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn rule_opacity(mut self, opacity: f64) -> Self {
        self.rule_opacity = opacity;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Build base, highlight and tooltip layers over `data`
pub fn build_linked_chart(data: ChartData, options: &LinkedChartOptions) -> CompositeChart {
    let focus = options.focus;
    let hover = HoverSelection::on_field(focus.name(), options.nearest, options.trigger);

    let base = ChartLayer::new(
        MarkDef::new(focus.base_mark()),
        Encoding {
            x: Some(focus.x().into()),
            y: Some(FieldDef::quantitative("price").into()),
            color: Some(FieldDef::nominal("symbol").into()),
            ..Encoding::default()
        },
    );

    let layers = match focus {
        FocusField::Date => {
            let points = base
                .with_mark(MarkDef::new(Mark::Circle).size(HIGHLIGHT_SIZE))
                .filtered_by(&hover);

            // The rule hosts the selection: it spans every date, so the
            // nearest-match always has a candidate under the pointer.
            let tooltips = ChartLayer::new(
                MarkDef::new(Mark::Rule),
                Encoding {
                    x: Some(FieldDef::temporal("date").time_unit("yearmonthdate").into()),
                    y: Some(FieldDef::quantitative("price").into()),
                    opacity: Some(rule_opacity(&hover, options.rule_opacity)),
                    tooltip: focus.tooltip(),
                    ..Encoding::default()
                },
            )
            .with_selection(&hover);

            vec![base, points, tooltips]
        }
        FocusField::Symbol => {
            let mut bars = base;
            bars.encoding.tooltip = vec![FieldDef::nominal("symbol"), FieldDef::quantitative("price")];
            let bars = bars.with_selection(&hover);

            let mut points = bars
                .with_mark(MarkDef::new(Mark::Circle).size(HIGHLIGHT_SIZE))
                .filtered_by(&hover);
            points.encoding.tooltip.clear();
            points.encoding.opacity = Some(Channel::when(&hover, Channel::value(1), 0));

            let tooltips = ChartLayer::new(
                MarkDef::new(Mark::Rule),
                Encoding {
                    x: Some(focus.x().into()),
                    y: Some(FieldDef::quantitative("price").into()),
                    opacity: Some(rule_opacity(&hover, options.rule_opacity)),
                    tooltip: focus.tooltip(),
                    ..Encoding::default()
                },
            )
            .filtered_by(&hover);

            vec![bars, points, tooltips]
        }
    };

    CompositeChart::combine(layers)
        .with_data(data)
        .with_title(options.title.clone())
}

fn rule_opacity(hover: &HoverSelection, opacity: f64) -> Channel {
    Channel::when(hover, Channel::value(opacity), 0)
}

/// Parameters of [`build_pie_chart`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieOptions {
    /// Overlay a point and a bold label on the hovered slice
    pub highlight: bool,
    pub title: Option<String>,
}

/// Arc chart of `price` share per `symbol`
pub fn build_pie_chart(data: ChartData, options: &PieOptions) -> CompositeChart {
    let slice_encoding = || Encoding {
        theta: Some(FieldDef::quantitative("price").into()),
        color: Some(FieldDef::nominal("symbol").into()),
        ..Encoding::default()
    };

    let mut arcs = ChartLayer::new(
        MarkDef::new(Mark::Arc),
        Encoding {
            tooltip: vec![FieldDef::nominal("symbol"), FieldDef::quantitative("price")],
            ..slice_encoding()
        },
    );

    if !options.highlight {
        return CompositeChart::combine([arcs])
            .with_data(data)
            .with_title(options.title.clone());
    }

    let hover = HoverSelection::on_field("symbol", true, Trigger::Hover);
    arcs = arcs.with_selection(&hover);

    let points = ChartLayer::new(
        MarkDef::new(Mark::Point).size(PIE_POINT_SIZE).filled(true),
        Encoding {
            opacity: Some(Channel::when(&hover, Channel::value(1), 0)),
            ..slice_encoding()
        },
    )
    .filtered_by(&hover);

    let labels = ChartLayer::new(
        MarkDef::new(Mark::Text).offset(15.0, -15.0).font(15.0, "bold"),
        Encoding {
            text: Some(Channel::when(&hover, FieldDef::nominal("symbol").into(), "")),
            tooltip: vec![FieldDef::nominal("symbol"), FieldDef::quantitative("price")],
            ..slice_encoding()
        },
    )
    .filtered_by(&hover);

    CompositeChart::combine([arcs, points, labels])
        .with_data(data)
        .with_title(options.title.clone())
}
