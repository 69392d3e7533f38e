use serde::Serialize;
use serde_json::{json, Value};

use crate::quiz::classifier::{EXTROVERT_MIN_PERCENT, INTROVERT_MAX_PERCENT};
use crate::quiz::{Category, ClassificationResult};

pub const GAUGE_TITLE: &str = "Introvert-Extrovert Scale";

/// Declarative gauge for an interactive frontend. No pixels are produced here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSpec {
    pub title: String,
    pub mode: String,
    pub value: f64,
    pub axis: [f64; 2],
    pub bar_color: String,
    pub bands: Vec<GaugeBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeBand {
    pub label: Category,
    pub range: [f64; 2],
    pub color: String,
}

pub fn build_gauge(result: &ClassificationResult) -> GaugeSpec {
    let low = f64::from(INTROVERT_MAX_PERCENT);
    let high = f64::from(EXTROVERT_MIN_PERCENT);
    let band = |label, range, color: &str| GaugeBand {
        label,
        range,
        color: color.to_string(),
    };

    GaugeSpec {
        title: GAUGE_TITLE.to_string(),
        mode: "gauge+number".to_string(),
        value: result.percentage,
        axis: [0.0, 100.0],
        bar_color: "darkblue".to_string(),
        bands: vec![
            band(Category::Introvert, [0.0, low], "lightgray"),
            band(Category::Ambivert, [low, high], "gray"),
            band(Category::Extrovert, [high, 100.0], "darkgray"),
        ],
    }
}

impl GaugeSpec {
    /// Plotly figure with a single `indicator` trace.
    pub fn to_plotly_json(&self) -> Value {
        let steps: Vec<Value> = self
            .bands
            .iter()
            .map(|b| json!({ "range": b.range, "color": b.color, "name": b.label }))
            .collect();

        json!({
            "data": [{
                "type": "indicator",
                "mode": self.mode,
                "value": self.value,
                "title": { "text": self.title },
                "gauge": {
                    "axis": { "range": self.axis },
                    "bar": { "color": self.bar_color },
                    "steps": steps,
                }
            }],
            "layout": {}
        })
    }

    /// One-line text gauge, `cells` wide, with the needle drawn as `|`.
    ///
    /// Cells take the shade of the band they fall in: `░` `▒` `▓` from low to high.
    pub fn to_text(&self, cells: usize) -> String {
        const SHADES: [char; 3] = ['░', '▒', '▓'];
        let cells = cells.max(1);
        let [min, max] = self.axis;
        let span = max - min;

        let needle = (((self.value - min) / span) * cells as f64)
            .floor()
            .clamp(0.0, (cells - 1) as f64) as usize;

        let bar: String = (0..cells)
            .map(|i| {
                if i == needle {
                    return '|';
                }
                let at = min + (i as f64 + 0.5) * span / cells as f64;
                let shade = self
                    .bands
                    .iter()
                    .position(|b| at >= b.range[0] && at < b.range[1])
                    .unwrap_or(self.bands.len().saturating_sub(1));
                SHADES[shade.min(SHADES.len() - 1)]
            })
            .collect();

        format!("{} {:.1}%", bar, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(category: Category, percentage: f64) -> ClassificationResult {
        ClassificationResult {
            category,
            percentage,
        }
    }

    #[test]
    fn bands_follow_classifier_thresholds() {
        let gauge = build_gauge(&result(Category::Ambivert, 40.0));

        assert_eq!(gauge.value, 40.0);
        assert_eq!(gauge.axis, [0.0, 100.0]);
        assert_eq!(
            gauge
                .bands
                .iter()
                .map(|b| (b.label, b.range, b.color.as_str()))
                .collect::<Vec<_>>(),
            vec![
                (Category::Introvert, [0.0, 33.0], "lightgray"),
                (Category::Ambivert, [33.0, 66.0], "gray"),
                (Category::Extrovert, [66.0, 100.0], "darkgray"),
            ]
        );
    }

    #[test]
    fn plotly_figure_shape() {
        let figure = build_gauge(&result(Category::Extrovert, 70.0)).to_plotly_json();
        let trace = &figure["data"][0];

        assert_eq!(trace["type"], "indicator");
        assert_eq!(trace["mode"], "gauge+number");
        assert_eq!(trace["value"], 70.0);
        assert_eq!(trace["title"]["text"], GAUGE_TITLE);
        assert_eq!(trace["gauge"]["axis"]["range"], json!([0.0, 100.0]));
        assert_eq!(trace["gauge"]["bar"]["color"], "darkblue");
        assert_eq!(trace["gauge"]["steps"][1]["range"], json!([33.0, 66.0]));
        assert_eq!(trace["gauge"]["steps"][2]["name"], "Extrovert");
    }

    #[test]
    fn text_gauge_places_needle() {
        let gauge = build_gauge(&result(Category::Ambivert, 40.0));
        assert_eq!(gauge.to_text(10), "░░░▒|▒▒▓▓▓ 40.0%");
    }

    #[test]
    fn text_gauge_clamps_the_ends() {
        let empty = build_gauge(&result(Category::Introvert, 0.0)).to_text(5);
        let full = build_gauge(&result(Category::Extrovert, 100.0)).to_text(5);
        assert!(empty.starts_with('|'));
        assert!(full.starts_with("░░▒▓|"));
    }
}
