// 📈 Chart figures - Plotly-compatible JSON
//
// The web pages hand `Figure` straight to `Plotly.newPlot(el, fig.data, fig.layout)`.

use serde::Serialize;

pub const GREEN: &str = "#2ecc71";
pub const RED: &str = "#e74c3c";
pub const BLUE: &str = "#3498db";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter {
        x: Vec<String>,
        y: Vec<f64>,
        name: String,
        mode: String,
        line: Line,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
    },
    Bar {
        x: Vec<String>,
        y: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        marker: Marker,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
        marker: PieMarker,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// One color for the whole series, or one per bar
    pub color: MarkerColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Single(String),
    PerBar(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

// ============================================================================
// BUILDERS
// ============================================================================

impl Figure {
    pub fn new(title: &str) -> Self {
        Figure {
            data: Vec::new(),
            layout: Layout {
                title: title.to_string(),
                xaxis: None,
                yaxis: None,
                barmode: None,
                template: "plotly_white".to_string(),
            },
        }
    }

    pub fn x_title(mut self, title: &str) -> Self {
        self.layout.xaxis = Some(Axis {
            title: title.to_string(),
        });
        self
    }

    pub fn y_title(mut self, title: &str) -> Self {
        self.layout.yaxis = Some(Axis {
            title: title.to_string(),
        });
        self
    }

    pub fn grouped(mut self) -> Self {
        self.layout.barmode = Some("group".to_string());
        self
    }

    pub fn trace(mut self, trace: Trace) -> Self {
        self.data.push(trace);
        self
    }

    pub fn title(&self) -> &str {
        &self.layout.title
    }
}

impl Trace {
    fn scatter(name: &str, x: Vec<String>, y: Vec<f64>, color: &str, mode: &str, fill: Option<&str>) -> Self {
        Trace::Scatter {
            x,
            y,
            name: name.to_string(),
            mode: mode.to_string(),
            line: Line {
                color: color.to_string(),
                width: 2,
            },
            fill: fill.map(str::to_string),
        }
    }

    pub fn lines_with_markers(name: &str, x: Vec<String>, y: Vec<f64>, color: &str) -> Self {
        Trace::scatter(name, x, y, color, "lines+markers", None)
    }

    /// Line filled down to the x axis
    pub fn area(name: &str, x: Vec<String>, y: Vec<f64>, color: &str) -> Self {
        Trace::scatter(name, x, y, color, "lines", Some("tozeroy"))
    }

    /// Single-bar series, used for grouped comparisons
    pub fn bar(name: &str, category: &str, value: f64, color: &str) -> Self {
        Trace::Bar {
            x: vec![category.to_string()],
            y: vec![value],
            name: Some(name.to_string()),
            marker: Marker {
                color: MarkerColor::Single(color.to_string()),
            },
        }
    }

    /// One bar per (label, value, color)
    pub fn bars(items: &[(&str, f64, &str)]) -> Self {
        Trace::Bar {
            x: items.iter().map(|(label, _, _)| label.to_string()).collect(),
            y: items.iter().map(|(_, value, _)| *value).collect(),
            name: None,
            marker: Marker {
                color: MarkerColor::PerBar(
                    items.iter().map(|(_, _, color)| color.to_string()).collect(),
                ),
            },
        }
    }

    pub fn pie(items: &[(&str, f64, &str)]) -> Self {
        Trace::Pie {
            labels: items.iter().map(|(label, _, _)| label.to_string()).collect(),
            values: items.iter().map(|(_, value, _)| *value).collect(),
            marker: PieMarker {
                colors: items.iter().map(|(_, _, color)| color.to_string()).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scatter_serializes_as_plotly() {
        let figure = Figure::new("Daily Transaction Volume")
            .x_title("Date")
            .y_title("Number of Transactions")
            .trace(Trace::lines_with_markers(
                "Daily Transactions",
                vec!["2024-01-01".to_string()],
                vec![3.0],
                BLUE,
            ));

        let value = serde_json::to_value(&figure).unwrap();
        assert_eq!(value["data"][0]["type"], json!("scatter"));
        assert_eq!(value["data"][0]["mode"], json!("lines+markers"));
        assert_eq!(value["data"][0]["line"]["color"], json!(BLUE));
        assert!(value["data"][0].get("fill").is_none());
        assert_eq!(value["layout"]["xaxis"]["title"], json!("Date"));
        assert_eq!(value["layout"]["template"], json!("plotly_white"));
        assert!(value["layout"].get("barmode").is_none());
    }

    #[test]
    fn test_area_fills_to_zero() {
        let trace = Trace::area("Cumulative", vec![], vec![], GREEN);
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["fill"], json!("tozeroy"));
        assert_eq!(value["mode"], json!("lines"));
    }

    #[test]
    fn test_bars_and_pie_colors() {
        let bars = serde_json::to_value(Trace::bars(&[("A", 1.0, RED), ("B", 2.0, GREEN)])).unwrap();
        assert_eq!(bars["type"], json!("bar"));
        assert_eq!(bars["marker"]["color"], json!([RED, GREEN]));
        assert!(bars.get("name").is_none());

        let single = serde_json::to_value(Trace::bar("Revenue", "Performance", 5.0, GREEN)).unwrap();
        assert_eq!(single["marker"]["color"], json!(GREEN));

        let pie = serde_json::to_value(Trace::pie(&[("Tax", 3.0, BLUE)])).unwrap();
        assert_eq!(pie["type"], json!("pie"));
        assert_eq!(pie["labels"], json!(["Tax"]));
        assert_eq!(pie["marker"]["colors"], json!([BLUE]));
    }
}
