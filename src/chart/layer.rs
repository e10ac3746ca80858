//! Declarative chart layer grammar
//!
//! A small subset of Vega-Lite v5: a layer is a mark, a channel encoding,
//! optional filter transforms and optional selection params. Layers stack
//! into a [`CompositeChart`] in z-order. Every type serializes straight to
//! the Vega-Lite JSON the browser runtime expects.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Geometric rendering primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Line,
    Bar,
    Arc,
    Point,
    Circle,
    Text,
    Rule,
}

/// Mark type plus its static styling
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDef {
    #[serde(rename = "type")]
    pub kind: Mark,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

impl MarkDef {
    pub fn new(kind: Mark) -> Self {
        Self {
            kind,
            size: None,
            filled: None,
            dx: None,
            dy: None,
            align: None,
            font_size: None,
            font_weight: None,
        }
    }

    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn filled(mut self, filled: bool) -> Self {
        self.filled = Some(filled);
        self
    }

    #[must_use]
    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.dx = Some(dx);
        self.dy = Some(dy);
        self
    }

    #[must_use]
    pub fn align(mut self, align: &str) -> Self {
        self.align = Some(align.to_string());
        self
    }

    #[must_use]
    pub fn font(mut self, size: f64, weight: &str) -> Self {
        self.font_size = Some(size);
        self.font_weight = Some(weight.to_string());
        self
    }
}

/// Measurement type of an encoded field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Temporal,
    Quantitative,
    Nominal,
}

/// Field-to-channel binding
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl FieldDef {
    pub fn new(field: &str, kind: FieldType) -> Self {
        Self {
            field: field.to_string(),
            kind,
            time_unit: None,
            sort: None,
            title: None,
        }
    }

    pub fn temporal(field: &str) -> Self {
        Self::new(field, FieldType::Temporal)
    }

    pub fn quantitative(field: &str) -> Self {
        Self::new(field, FieldType::Quantitative)
    }

    pub fn nominal(field: &str) -> Self {
        Self::new(field, FieldType::Nominal)
    }

    #[must_use]
    pub fn time_unit(mut self, unit: &str) -> Self {
        self.time_unit = Some(unit.to_string());
        self
    }

    /// Sort order, e.g. `-y` for descending by the y channel
    #[must_use]
    pub fn sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// Branch taken while a selection is active
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionBranch {
    pub param: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
    #[serde(flatten)]
    pub then: Channel,
}

/// What a channel draws from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Channel {
    Field(FieldDef),
    Value {
        value: Value,
    },
    Conditional {
        condition: Box<ConditionBranch>,
        value: Value,
    },
}

impl Channel {
    pub fn value(value: impl Into<Value>) -> Self {
        Channel::Value { value: value.into() }
    }

    /// `then` while `selection` matches, `otherwise` everywhere else
    pub fn when(selection: &HoverSelection, then: Channel, otherwise: impl Into<Value>) -> Self {
        Channel::Conditional {
            condition: Box::new(ConditionBranch {
                param: selection.name.clone(),
                empty: selection.empty_flag(),
                then,
            }),
            value: otherwise.into(),
        }
    }
}

impl From<FieldDef> for Channel {
    fn from(def: FieldDef) -> Self {
        Channel::Field(def)
    }
}

/// Visual channels used by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Channel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<FieldDef>,
}

/// Event that updates a hover selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    #[default]
    Hover,
    Click,
}

impl Trigger {
    pub fn event(self) -> &'static str {
        match self {
            Trigger::Hover => "mouseover",
            Trigger::Click => "click",
        }
    }
}

impl Serialize for Trigger {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.event())
    }
}

/// Named point selection recomputed by the browser on every interaction
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSelection {
    pub name: String,
    pub fields: Vec<String>,
    pub nearest: bool,
    pub on: Trigger,
    /// Whether an empty selection matches everything
    pub empty: bool,
}

impl HoverSelection {
    /// Selection named `hover`, empty by default, on one field
    pub fn on_field(field: &str, nearest: bool, on: Trigger) -> Self {
        Self {
            name: "hover".to_string(),
            fields: vec![field.to_string()],
            nearest,
            on,
            empty: false,
        }
    }

    fn empty_flag(&self) -> Option<bool> {
        (!self.empty).then_some(false)
    }

    pub fn param(&self) -> SelectionParam {
        SelectionParam {
            name: self.name.clone(),
            select: PointSelect {
                kind: "point",
                fields: self.fields.clone(),
                nearest: self.nearest,
                on: self.on,
            },
        }
    }

    pub fn filter(&self) -> Transform {
        Transform {
            filter: ParamPredicate {
                param: self.name.clone(),
                empty: self.empty_flag(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionParam {
    pub name: String,
    pub select: PointSelect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSelect {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub fields: Vec<String>,
    pub nearest: bool,
    pub on: Trigger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamPredicate {
    pub param: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub filter: ParamPredicate,
}

/// Inline table rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub values: Vec<Value>,
}

impl ChartData {
    pub fn from_rows<T: Serialize>(rows: &[T]) -> Result<Self> {
        let values = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One mark with its encoding, filters and selections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayer {
    pub mark: MarkDef,
    pub encoding: Encoding,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<SelectionParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ChartData>,
}

impl ChartLayer {
    pub fn new(mark: MarkDef, encoding: Encoding) -> Self {
        Self {
            mark,
            encoding,
            transform: Vec::new(),
            params: Vec::new(),
            data: None,
        }
    }

    /// Same encoding drawn with another mark
    #[must_use]
    pub fn with_mark(&self, mark: MarkDef) -> Self {
        Self {
            mark,
            encoding: self.encoding.clone(),
            transform: self.transform.clone(),
            params: Vec::new(),
            data: self.data.clone(),
        }
    }

    /// Keep only rows matching the selection
    #[must_use]
    pub fn filtered_by(mut self, selection: &HoverSelection) -> Self {
        self.transform.push(selection.filter());
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: &HoverSelection) -> Self {
        self.params.push(selection.param());
        self
    }

    /// Layer-local rows instead of the composite's shared data
    #[must_use]
    pub fn with_data(mut self, data: ChartData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn mark_kind(&self) -> Mark {
        self.mark.kind
    }
}

/// Overlay stack of layers sharing axes and data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeChart {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub width: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ChartData>,
    pub layer: Vec<ChartLayer>,
}

impl CompositeChart {
    /// Stack `layers` bottom to top
    pub fn combine(layers: impl IntoIterator<Item = ChartLayer>) -> Self {
        Self {
            schema: VEGA_LITE_SCHEMA,
            title: None,
            width: "container",
            data: None,
            layer: layers.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: ChartData) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Put `layer` on top of the existing stack
    #[must_use]
    pub fn overlay(mut self, layer: ChartLayer) -> Self {
        self.layer.push(layer);
        self
    }

    pub fn marks(&self) -> Vec<Mark> {
        self.layer.iter().map(ChartLayer::mark_kind).collect()
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hover() -> HoverSelection {
        HoverSelection::on_field("date", true, Trigger::Hover)
    }

    #[test]
    fn test_mark_def_serialization() {
        let mark = MarkDef::new(Mark::Text).size(20.0).offset(-10.0, 0.0).align("left");
        let json = serde_json::to_value(&mark).unwrap();
        assert_eq!(
            json,
            json!({"type": "text", "size": 20.0, "dx": -10.0, "dy": 0.0, "align": "left"})
        );

        let json = serde_json::to_value(MarkDef::new(Mark::Text).font(15.0, "bold")).unwrap();
        assert_eq!(json["fontSize"], 15.0);
        assert_eq!(json["fontWeight"], "bold");
    }

    #[test]
    fn test_conditional_opacity() {
        let opacity = Channel::when(&hover(), Channel::value(0.5), 0);
        assert_eq!(
            serde_json::to_value(&opacity).unwrap(),
            json!({"condition": {"param": "hover", "empty": false, "value": 0.5}, "value": 0})
        );
    }

    #[test]
    fn test_conditional_field() {
        let text = Channel::when(&hover(), FieldDef::nominal("symbol").into(), "");
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            json!({
                "condition": {"param": "hover", "empty": false, "field": "symbol", "type": "nominal"},
                "value": ""
            })
        );
    }

    #[test]
    fn test_selection_param_and_filter() {
        let selection = hover();
        assert_eq!(
            serde_json::to_value(selection.param()).unwrap(),
            json!({
                "name": "hover",
                "select": {"type": "point", "fields": ["date"], "nearest": true, "on": "mouseover"}
            })
        );
        assert_eq!(
            serde_json::to_value(selection.filter()).unwrap(),
            json!({"filter": {"param": "hover", "empty": false}})
        );

        let mut always = hover();
        always.empty = true;
        assert_eq!(
            serde_json::to_value(always.filter()).unwrap(),
            json!({"filter": {"param": "hover"}})
        );
    }

    #[test]
    fn test_encoding_skips_unset_channels() {
        let encoding = Encoding {
            x: Some(FieldDef::nominal("symbol").sort("-y").into()),
            y: Some(FieldDef::quantitative("price").into()),
            ..Encoding::default()
        };
        assert_eq!(
            serde_json::to_value(&encoding).unwrap(),
            json!({
                "x": {"field": "symbol", "type": "nominal", "sort": "-y"},
                "y": {"field": "price", "type": "quantitative"}
            })
        );
    }

    #[test]
    fn test_with_mark_keeps_encoding_but_not_params() {
        let base = ChartLayer::new(
            MarkDef::new(Mark::Bar),
            Encoding {
                y: Some(FieldDef::quantitative("price").into()),
                ..Encoding::default()
            },
        )
        .with_selection(&hover());

        let derived = base.with_mark(MarkDef::new(Mark::Circle).size(65.0));
        assert_eq!(derived.encoding, base.encoding);
        assert!(derived.params.is_empty());
        assert_eq!(derived.mark_kind(), Mark::Circle);
    }

    #[test]
    fn test_combine_preserves_z_order() {
        let layer = |mark| ChartLayer::new(MarkDef::new(mark), Encoding::default());
        let chart = CompositeChart::combine([layer(Mark::Line), layer(Mark::Circle)])
            .overlay(layer(Mark::Rule))
            .with_title(Some("Graph 1".to_string()));

        assert_eq!(chart.marks(), vec![Mark::Line, Mark::Circle, Mark::Rule]);

        let json = chart.to_json().unwrap();
        assert_eq!(json["$schema"], VEGA_LITE_SCHEMA);
        assert_eq!(json["width"], "container");
        assert_eq!(json["title"], "Graph 1");
        assert_eq!(json["layer"][2]["mark"]["type"], "rule");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_chart_data_from_rows() {
        #[derive(Serialize)]
        struct Row {
            symbol: &'static str,
            price: f64,
        }
        let data = ChartData::from_rows(&[Row { symbol: "IBM", price: 91.5 }]).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.values[0], json!({"symbol": "IBM", "price": 91.5}));
    }
}
