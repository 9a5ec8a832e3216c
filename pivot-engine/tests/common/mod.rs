//! FILENAME: pivot-engine/tests/common/mod.rs
//! Fixtures for pivot-engine integration tests.

#![allow(dead_code)]

use pivot_engine::{PivotDefinition, Record};
use serde::Deserialize;

/// A monthly cost response grouped by environment and region.
pub const EXAMPLE_API_RESPONSE: &str = r#"
{
    "count": 19,
    "dates": ["2025-04", "2025-05"],
    "groups": ["environment", "region"],
    "data": [
        {"region": "eu-west-1", "date": "2025-04", "cost": "18698.651307699", "environment": "preproduction"},
        {"region": "global", "date": "2025-04", "cost": "112.8457268368", "environment": "preproduction"},
        {"region": "global", "date": "2025-05", "cost": "111.9029923845", "environment": "preproduction"},
        {"region": "global", "date": "2025-04", "cost": "274.8772830607", "environment": "development"},
        {"region": "eu-west-1", "date": "2025-05", "cost": "18472.3659787955", "environment": "preproduction"},
        {"region": "eu-west-2", "date": "2025-05", "cost": "3201.7159650691", "environment": "backup"},
        {"region": "eu-west-2", "date": "2025-04", "cost": "3169.8725900172", "environment": "backup"},
        {"region": "global", "date": "2025-05", "cost": "283.2623031041", "environment": "development"},
        {"region": "eu-west-1", "date": "2025-04", "cost": "16624.4592870909", "environment": "development"},
        {"region": "eu-west-1", "date": "2025-04", "cost": "122.2465100761", "environment": "backup"},
        {"region": "eu-west-1", "date": "2025-04", "cost": "23966.5839162545", "environment": "production"},
        {"region": "eu-west-1", "date": "2025-05", "cost": "24757.93159818", "environment": "production"},
        {"region": "eu-west-1", "date": "2025-05", "cost": "124.8369473436", "environment": "backup"},
        {"region": "eu-west-1", "date": "2025-05", "cost": "17437.4141169768", "environment": "development"},
        {"region": "us-east-1", "date": "2025-04", "cost": "13.5831226785", "environment": "preproduction"},
        {"region": "eu-west-2", "date": "2025-05", "cost": "5031.2779760823", "environment": "production"},
        {"region": "eu-west-2", "date": "2025-05", "cost": "2058.7912547951", "environment": "preproduction"},
        {"region": "eu-west-2", "date": "2025-04", "cost": "2111.4750480189", "environment": "preproduction"},
        {"region": "eu-west-2", "date": "2025-04", "cost": "4955.1675861698", "environment": "production"}
    ]
}
"#;

#[derive(Debug, Deserialize)]
pub struct ExampleResponse {
    pub dates: Vec<String>,
    pub groups: Vec<String>,
    pub data: Vec<Record>,
}

pub fn load_example() -> ExampleResponse {
    serde_json::from_str(EXAMPLE_API_RESPONSE).expect("example response parses")
}

/// Definition matching the example response's groups and dates.
pub fn example_definition() -> PivotDefinition {
    let response = load_example();
    PivotDefinition::new(response.groups, response.dates)
}

pub fn record(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Records for a uniform grid: every (team, month) pair gets `value`.
pub fn uptime_grid(teams: &[&str], months: &[&str], value: &str) -> Vec<Record> {
    let mut records = Vec::new();
    for team in teams {
        for month in months {
            records.push(record(&[("team", team), ("date", month), ("average", value)]));
        }
    }
    records
}
