use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sortiment_barcode::RenderParams;

use crate::layout::LayoutConfig;

/// Everything that shapes the negative-list document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Header text repeated on every page.
    pub title: String,
    /// Printed before the identifier in each cell, e.g. `GTIN: 4006381333931`.
    pub identifier_prefix: String,
    pub layout: LayoutConfig,
    pub barcode: RenderParams,
    /// Date stamp shown in the header.
    pub generated_on: Option<NaiveDate>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "Herzstuecke Negativliste".to_string(),
            identifier_prefix: "GTIN".to_string(),
            layout: LayoutConfig::default(),
            barcode: RenderParams::default(),
            generated_on: None,
        }
    }
}

impl DocumentConfig {
    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn header_text(&self) -> String {
        match self.generated_on {
            Some(date) => format!("{}  (Stand {})", self.title, date.format("%d.%m.%Y")),
            None => self.title.clone(),
        }
    }

    pub fn identifier_line(&self, identifier: &str) -> String {
        format!("{}: {}", self.identifier_prefix, identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_includes_date_stamp() {
        let config = DocumentConfig::default()
            .with_generated_on(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(config.header_text(), "Herzstuecke Negativliste  (Stand 19.10.2026)");
        assert_eq!(config.identifier_line("123"), "GTIN: 123");
    }

    #[test]
    fn partial_json_settings_keep_defaults() {
        let config: DocumentConfig =
            serde_json::from_str(r#"{"title": "Filiale 12", "layout": {"columns": 2}}"#).unwrap();
        assert_eq!(config.title, "Filiale 12");
        assert_eq!(config.layout.columns, 2);
        assert_eq!(config.layout.row_height_mm, 42.0);
        assert_eq!(config.identifier_prefix, "GTIN");
    }
}
