//! Chart specification module
//!
//! Builds Vega-Lite specs for the dashboard pages. Nothing here touches the
//! Workers runtime, so every builder is testable on the host.
//!
//! # Architecture
//! - `layer.rs`: the layer grammar (marks, channels, selections, composition)
//! - `builder.rs`: linked hover charts and the pie chart
//! - `annotation.rs`: the fixed emoji annotations

mod annotation;
mod builder;
mod layer;

pub use annotation::{ANNOTATIONS, AnnotationRecord, build_annotations, parse_annotations};
pub use builder::{
    FocusField, LinkedChartOptions, PieOptions, build_linked_chart, build_pie_chart,
};
pub use layer::{
    Channel, ChartData, ChartLayer, CompositeChart, Encoding, FieldDef, FieldType, HoverSelection,
    Mark, MarkDef, Trigger, VEGA_LITE_SCHEMA,
};
