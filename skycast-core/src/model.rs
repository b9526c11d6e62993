use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// How free-form location text is interpreted.
///
/// The mode drives both input normalization and the `type` query parameter
/// sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryMode {
    #[default]
    City,
    PostalCode,
}

impl QueryMode {
    /// Value of the `type` request parameter for this mode.
    pub fn as_param(&self) -> &'static str {
        match self {
            QueryMode::City => "city",
            QueryMode::PostalCode => "zip",
        }
    }

    pub const fn all() -> &'static [QueryMode] {
        &[QueryMode::City, QueryMode::PostalCode]
    }

    /// Normalize raw input text for this mode.
    ///
    /// City names get word-wise capitalization; postal codes pass through
    /// unchanged. Splitting is on single spaces, so consecutive and boundary
    /// spaces survive as empty segments and the separators round-trip.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            QueryMode::City => capitalize_words(raw),
            QueryMode::PostalCode => raw.to_string(),
        }
    }
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_param())
    }
}

impl TryFrom<&str> for QueryMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "city" => Ok(QueryMode::City),
            "zip" | "postal" | "postal_code" => Ok(QueryMode::PostalCode),
            _ => Err(anyhow::anyhow!(
                "Unknown search mode '{value}'. Supported modes: city, zip."
            )),
        }
    }
}

fn capitalize_words(s: &str) -> String {
    s.split(' ').map(capitalize_word).collect::<Vec<_>>().join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// A location lookup as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct Query {
    text: String,
    mode: QueryMode,
}

impl Query {
    pub fn new(mode: QueryMode) -> Self {
        Self { text: String::new(), mode }
    }

    /// Store new input text, normalized for the current mode.
    pub fn set_text(&mut self, raw: &str) {
        self.text = self.mode.normalize(raw);
    }

    /// Switch the query mode. Already-stored text is kept as-is; it is not
    /// re-normalized under the new mode.
    pub fn set_mode(&mut self, mode: QueryMode) {
        self.mode = mode;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// A query is submittable only when it contains non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Weather lookup response returned by the backend, stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub weather: Conditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub main: String,
    pub description: String,
    pub icon: String,
    pub temperature: Temperature,
    pub humidity: u8,
    pub wind: Wind,
}

impl Conditions {
    /// URL of the provider-hosted icon image for these conditions.
    ///
    /// The icon identifier is used as-is; the backend is trusted to hand out
    /// valid ones.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

/// Temperatures are always transported in Celsius; display conversion
/// happens in [`crate::units`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub current: f64,
    pub feels_like: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_param_roundtrip() {
        for mode in QueryMode::all() {
            let s = mode.as_param();
            let parsed = QueryMode::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*mode, parsed);
        }
    }

    #[test]
    fn unknown_mode_error() {
        let err = QueryMode::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown search mode"));
    }

    #[test]
    fn city_normalization_capitalizes_each_word() {
        assert_eq!(QueryMode::City.normalize("new york"), "New York");
        assert_eq!(QueryMode::City.normalize("LONDON"), "London");
        assert_eq!(QueryMode::City.normalize("rio de janeiro"), "Rio De Janeiro");
    }

    #[test]
    fn city_normalization_preserves_separator_spaces() {
        assert_eq!(QueryMode::City.normalize("  paris  "), "  Paris  ");
        assert_eq!(QueryMode::City.normalize("new  york"), "New  York");
        assert_eq!(QueryMode::City.normalize(""), "");
        assert_eq!(QueryMode::City.normalize("   "), "   ");
    }

    #[test]
    fn city_normalization_is_idempotent() {
        for input in ["new york", "  paris  ", "rio de janeiro", "QUÉBEC CITY", ""] {
            let once = QueryMode::City.normalize(input);
            let twice = QueryMode::City.normalize(&once);
            assert_eq!(once, twice, "normalizing {input:?} twice changed it");
        }
    }

    #[test]
    fn city_normalization_handles_non_ascii() {
        assert_eq!(QueryMode::City.normalize("münchen"), "München");
        assert_eq!(QueryMode::City.normalize("québec city"), "Québec City");
    }

    #[test]
    fn postal_code_normalization_is_identity() {
        assert_eq!(QueryMode::PostalCode.normalize("10001"), "10001");
        assert_eq!(QueryMode::PostalCode.normalize("sw1a 1aa"), "sw1a 1aa");
        assert_eq!(QueryMode::PostalCode.normalize("  90210 "), "  90210 ");
    }

    #[test]
    fn query_normalizes_on_edit() {
        let mut query = Query::new(QueryMode::City);
        query.set_text("new york");
        assert_eq!(query.text(), "New York");
    }

    #[test]
    fn mode_switch_keeps_stored_text() {
        let mut query = Query::new(QueryMode::PostalCode);
        query.set_text("new york");
        assert_eq!(query.text(), "new york");

        // Switching to city mode must not re-normalize what is already stored.
        query.set_mode(QueryMode::City);
        assert_eq!(query.text(), "new york");

        // Only the next edit picks up the new mode.
        query.set_text("new york");
        assert_eq!(query.text(), "New York");
    }

    #[test]
    fn blank_detection_trims_whitespace() {
        let mut query = Query::new(QueryMode::City);
        assert!(query.is_blank());

        query.set_text("   ");
        assert!(query.is_blank());

        query.set_text(" oslo ");
        assert!(!query.is_blank());
    }

    #[test]
    fn icon_url_uses_fixed_pattern() {
        let conditions = Conditions {
            main: "Clouds".to_string(),
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
            temperature: Temperature { current: 20.0, feels_like: 19.0, min: 18.0, max: 23.0 },
            humidity: 45,
            wind: Wind { speed: 3.6 },
        };

        assert_eq!(
            conditions.icon_url(),
            "https://openweathermap.org/img/wn/03d@2x.png"
        );
    }

    #[test]
    fn report_deserializes_from_backend_shape() {
        let json = r#"{
            "location": { "name": "New York" },
            "weather": {
                "main": "Clear",
                "description": "clear sky",
                "icon": "01d",
                "temperature": { "current": 20.6, "feels_like": 21.2, "min": 18.0, "max": 23.4 },
                "humidity": 45,
                "wind": { "speed": 3.6 }
            }
        }"#;

        let report: WeatherReport = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(report.location.name, "New York");
        assert_eq!(report.weather.main, "Clear");
        assert_eq!(report.weather.humidity, 45);
        assert!((report.weather.temperature.current - 20.6).abs() < f64::EPSILON);
    }
}
