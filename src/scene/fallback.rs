use serde::{Deserialize, Serialize};

/// One headline figure of the static summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

/// Static panel shown instead of the globe when no 3D context exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSummary {
    pub title: String,
    pub items: Vec<SummaryItem>,
}

impl Default for StaticSummary {
    fn default() -> Self {
        let item = |label: &str, value: &str| SummaryItem {
            label: label.to_owned(),
            value: value.to_owned(),
        };
        Self {
            title: "Environmental Data Overview".to_owned(),
            items: vec![
                item("Global Temperature Rise", "+1.1°C"),
                item("CO₂ Levels", "425 ppm"),
                item("Forest Loss (Annual)", "10M hectares"),
                item("Renewable Energy Growth", "+15% YoY"),
            ],
        }
    }
}
