use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRow {
    pub dimension_values: Vec<Cell>,
    pub metric_values: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub metric_values: Vec<Cell>,
}

/// Analytics-style report (dimensions, metrics, rows, totals) attached to a
/// conversation to give the model numbers to reason about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingDataset {
    pub dimension_headers: Vec<Header>,
    pub metric_headers: Vec<Header>,
    pub rows: Vec<DataRow>,
    pub totals: Vec<Totals>,
}

impl GroundingDataset {
    /// The fixed page-view sample for 2024-07-01.
    pub fn sample() -> &'static GroundingDataset {
        static SAMPLE: OnceLock<GroundingDataset> = OnceLock::new();
        SAMPLE.get_or_init(|| {
            let row = |date: &str, path: &str, views: &str, users: &str| DataRow {
                dimension_values: cells(&[date, path]),
                metric_values: cells(&[views, users]),
            };

            GroundingDataset {
                dimension_headers: headers(&["date", "pagePath"]),
                metric_headers: headers(&["screenPageViews", "activeUsers"]),
                rows: vec![
                    row("20240701", "/", "180", "90"),
                    row("20240701", "/products", "120", "60"),
                    row("20240701", "/blog", "90", "70"),
                    row("20240701", "/contact", "30", "20"),
                ],
                totals: vec![Totals {
                    metric_values: cells(&["420", "240"]),
                }],
            }
        })
    }

    /// Every row and totals entry has one value per header.
    pub fn is_consistent(&self) -> bool {
        let dims = self.dimension_headers.len();
        let metrics = self.metric_headers.len();

        self.rows
            .iter()
            .all(|r| r.dimension_values.len() == dims && r.metric_values.len() == metrics)
            && self.totals.iter().all(|t| t.metric_values.len() == metrics)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn headers(names: &[&str]) -> Vec<Header> {
    names
        .iter()
        .map(|n| Header {
            name: n.to_string(),
        })
        .collect()
}

fn cells(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|v| Cell {
            value: v.to_string(),
        })
        .collect()
}
