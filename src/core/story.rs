use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};
use crate::render::Color;

/// Chart family used to present a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Area,
}

/// One sample of a story series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub year: i32,
    pub value: f64,
    pub label: String,
}

impl DataPoint {
    #[must_use]
    pub fn new(year: i32, value: f64, label: impl Into<String>) -> Self {
        Self {
            year,
            value,
            label: label.into(),
        }
    }
}

/// Serialized form of a story, validated into `Story` on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub id: u32,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    #[serde(alias = "data")]
    pub data_points: Vec<DataPoint>,
    /// `#rrggbb`.
    pub color: String,
    pub unit: String,
    #[serde(alias = "type")]
    pub chart_type: ChartType,
}

/// Immutable, validated data story.
///
/// Construction fails fast on an empty series, non-finite values or a
/// malformed color, so a broken chart can never be animated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoryRecord", into = "StoryRecord")]
pub struct Story {
    id: u32,
    title: String,
    subtitle: String,
    description: String,
    data_points: Vec<DataPoint>,
    color: Color,
    color_text: String,
    unit: String,
    chart_type: ChartType,
}

impl Story {
    pub fn new(record: StoryRecord) -> VizResult<Self> {
        let invalid = |reason: String| VizError::InvalidStory {
            id: record.id,
            reason,
        };

        if record.data_points.is_empty() {
            return Err(invalid("data points must not be empty".to_owned()));
        }
        if let Some(point) = record.data_points.iter().find(|p| !p.value.is_finite()) {
            return Err(invalid(format!(
                "value for `{}` must be finite",
                point.label
            )));
        }
        let color =
            Color::parse_hex(&record.color).map_err(|err| invalid(err.to_string()))?;

        Ok(Self {
            id: record.id,
            title: record.title,
            subtitle: record.subtitle,
            description: record.description,
            data_points: record.data_points,
            color,
            color_text: record.color,
            unit: record.unit,
            chart_type: record.chart_type,
        })
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn data_points(&self) -> &[DataPoint] {
        &self.data_points
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    /// Series values in data order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data_points.iter().map(|point| point.value)
    }

    /// `(min, max)` of the series. The series is never empty.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        self.values()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }
}

impl TryFrom<StoryRecord> for Story {
    type Error = VizError;

    fn try_from(record: StoryRecord) -> Result<Self, Self::Error> {
        Self::new(record)
    }
}

impl From<Story> for StoryRecord {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            title: story.title,
            subtitle: story.subtitle,
            description: story.description,
            data_points: story.data_points,
            color: story.color_text,
            unit: story.unit,
            chart_type: story.chart_type,
        }
    }
}

/// Ordered, immutable, non-empty story list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Story>", into = "Vec<Story>")]
pub struct StoryCatalog {
    stories: Vec<Story>,
}

impl StoryCatalog {
    pub fn new(stories: Vec<Story>) -> VizResult<Self> {
        if stories.is_empty() {
            return Err(VizError::InvalidData(
                "story catalog must contain at least one story".to_owned(),
            ));
        }
        Ok(Self { stories })
    }

    /// Parses a JSON array of story records.
    pub fn from_json_str(json: &str) -> VizResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The four environmental stories shipped with the viewer.
    pub fn builtin() -> VizResult<Self> {
        let stories = builtin_records()
            .into_iter()
            .map(Story::new)
            .collect::<VizResult<Vec<_>>>()?;
        Self::new(stories)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }

    #[must_use]
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }
}

impl TryFrom<Vec<Story>> for StoryCatalog {
    type Error = VizError;

    fn try_from(stories: Vec<Story>) -> Result<Self, Self::Error> {
        Self::new(stories)
    }
}

impl From<StoryCatalog> for Vec<Story> {
    fn from(catalog: StoryCatalog) -> Self {
        catalog.stories
    }
}

fn series(points: &[(i32, f64, &str)]) -> Vec<DataPoint> {
    points
        .iter()
        .map(|&(year, value, label)| DataPoint::new(year, value, label))
        .collect()
}

fn builtin_records() -> Vec<StoryRecord> {
    vec![
        StoryRecord {
            id: 0,
            title: "Rising Global Temperatures".to_owned(),
            subtitle: "Temperature anomalies over the past century".to_owned(),
            description: "Global average temperatures have risen by 1.1°C since pre-industrial \
                          times, with accelerating warming in recent decades."
                .to_owned(),
            data_points: series(&[
                (1920, -0.2, "1920s"),
                (1940, 0.1, "1940s"),
                (1960, -0.1, "1960s"),
                (1980, 0.3, "1980s"),
                (2000, 0.6, "2000s"),
                (2020, 1.1, "2020s"),
            ]),
            color: "#ff6b6b".to_owned(),
            unit: "°C".to_owned(),
            chart_type: ChartType::Line,
        },
        StoryRecord {
            id: 1,
            title: "Atmospheric CO₂ Levels".to_owned(),
            subtitle: "Carbon dioxide concentration in the atmosphere".to_owned(),
            description: "CO₂ levels have increased by over 40% since pre-industrial times, \
                          reaching record highs of 420+ ppm."
                .to_owned(),
            data_points: series(&[
                (1960, 315.0, "1960"),
                (1980, 340.0, "1980"),
                (2000, 370.0, "2000"),
                (2010, 390.0, "2010"),
                (2020, 415.0, "2020"),
                (2024, 425.0, "2024"),
            ]),
            color: "#4ecdc4".to_owned(),
            unit: "ppm".to_owned(),
            chart_type: ChartType::Bar,
        },
        StoryRecord {
            id: 2,
            title: "Global Forest Loss".to_owned(),
            subtitle: "Deforestation rates worldwide".to_owned(),
            description: "We lose approximately 10 million hectares of forest annually, \
                          equivalent to the size of South Korea."
                .to_owned(),
            data_points: series(&[
                (2000, 100.0, "2000"),
                (2005, 95.0, "2005"),
                (2010, 88.0, "2010"),
                (2015, 82.0, "2015"),
                (2020, 76.0, "2020"),
                (2024, 71.0, "2024"),
            ]),
            color: "#45b7d1".to_owned(),
            unit: "% of 2000 levels".to_owned(),
            chart_type: ChartType::Area,
        },
        StoryRecord {
            id: 3,
            title: "Renewable Energy Growth".to_owned(),
            subtitle: "Global renewable energy capacity".to_owned(),
            description: "Renewable energy capacity has grown exponentially, offering hope for \
                          a sustainable future."
                .to_owned(),
            data_points: series(&[
                (2010, 1320.0, "2010"),
                (2012, 1580.0, "2012"),
                (2014, 1850.0, "2014"),
                (2016, 2200.0, "2016"),
                (2018, 2580.0, "2018"),
                (2020, 3064.0, "2020"),
                (2022, 3372.0, "2022"),
                (2024, 3870.0, "2024"),
            ]),
            color: "#96ceb4".to_owned(),
            unit: "GW".to_owned(),
            chart_type: ChartType::Line,
        },
    ]
}
