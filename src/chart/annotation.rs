//! Emoji annotations for the price time series

use chrono::NaiveDate;

use super::layer::{ChartData, ChartLayer, Encoding, FieldDef, Mark, MarkDef};
use crate::error::{DashboardError, Result};
use crate::types::Annotation;

/// Date format of the hand-authored records, e.g. `Sep 01, 2007`
const ANNOTATION_DATE_FORMAT: &str = "%b %d, %Y";

/// (date, price, marker, description)
pub type AnnotationRecord = (&'static str, f64, &'static str, &'static str);

pub const ANNOTATIONS: [AnnotationRecord; 4] = [
    ("Sep 01, 2007", 450.0, "🙂", "Something's going well for GOOG & AAPL."),
    ("Nov 01, 2008", 220.0, "🙂", "The market is recovering."),
    ("Dec 01, 2007", 750.0, "😱", "Something's going wrong for GOOG & AAPL."),
    ("Dec 01, 2009", 680.0, "😱", "A hiccup for GOOG."),
];

pub fn parse_annotations(records: &[AnnotationRecord]) -> Result<Vec<Annotation>> {
    records
        .iter()
        .map(|&(date, price, marker, description)| -> Result<Annotation> {
            let parsed = NaiveDate::parse_from_str(date, ANNOTATION_DATE_FORMAT).map_err(|e| {
                DashboardError::AnnotationDate {
                    date: date.to_string(),
                    reason: e.to_string(),
                }
            })?;
            Ok(Annotation {
                date: parsed,
                price,
                marker: marker.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}

/// Text layer drawing each marker at (date, price), with its own rows
pub fn build_annotations(records: &[AnnotationRecord]) -> Result<ChartLayer> {
    let annotations = parse_annotations(records)?;

    let layer = ChartLayer::new(
        MarkDef::new(Mark::Text).size(20.0).offset(-10.0, 0.0).align("left"),
        Encoding {
            x: Some(FieldDef::temporal("date").into()),
            y: Some(FieldDef::quantitative("price").into()),
            text: Some(FieldDef::nominal("marker").into()),
            tooltip: vec![FieldDef::nominal("description")],
            ..Encoding::default()
        },
    )
    .with_data(ChartData::from_rows(&annotations)?);

    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_annotations() {
        let annotations = parse_annotations(&ANNOTATIONS).unwrap();
        assert_eq!(annotations.len(), 4);
        assert_eq!(annotations[0].date, NaiveDate::from_ymd_opt(2007, 9, 1).unwrap());
        assert_eq!(annotations[3].date, NaiveDate::from_ymd_opt(2009, 12, 1).unwrap());
        assert_eq!(annotations[2].marker, "😱");
    }

    #[test]
    fn test_overlay_positions_every_label() {
        let layer = build_annotations(&ANNOTATIONS).unwrap();
        assert_eq!(layer.mark_kind(), Mark::Text);

        let data = layer.data.as_ref().unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.values[0]["date"], "2007-09-01T00:00:00");
        assert_eq!(data.values[0]["price"], 450.0);
        assert_eq!(data.values[1]["description"], "The market is recovering.");

        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["encoding"]["text"]["field"], "marker");
        assert_eq!(json["encoding"]["tooltip"][0]["field"], "description");
        assert_eq!(json["mark"]["align"], "left");
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let records = [("2007-09-01", 1.0, "?", "wrong format")];
        let err = build_annotations(&records).unwrap_err();
        assert!(matches!(err, DashboardError::AnnotationDate { ref date, .. } if date == "2007-09-01"));
    }
}
