use std::collections::HashMap;

use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Country")]
    country_code: String,
    #[tabled(rename = "Postal codes")]
    count: usize,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

/// Per-country counts, sorted by country code
pub fn counts_table(counts: &HashMap<String, usize>) -> String {
    if counts.is_empty() {
        return String::new();
    }

    let mut rows: Vec<CountryRow> = counts
        .iter()
        .map(|(country_code, count)| CountryRow {
            country_code: country_code.clone(),
            count: *count,
        })
        .collect();
    rows.sort_by(|a, b| a.country_code.cmp(&b.country_code));

    Table::new(rows).with(Style::rounded()).to_string()
}
