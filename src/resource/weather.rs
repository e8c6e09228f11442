use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Detail;

/// Dashboard weather for the farm's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    #[serde(default)]
    pub location: String,
    pub current: CurrentConditions,
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
    #[serde(default)]
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_chance: Option<f64>,
}

impl Detail for WeatherForecast {
    const PATH: &'static str = "weather";
    const NAME: &'static str = "weather";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_dashboard_payload() {
        let json = r#"{
            "location": "Nakuru",
            "current": { "temperature": 24.5, "humidity": 61, "condition": "Partly cloudy" },
            "daily": [
                { "date": "2026-10-17", "high": 27, "low": 14, "condition": "Rain", "precipitationChance": 80 }
            ]
        }"#;
        let forecast: WeatherForecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.current.temperature, 24.5);
        assert_eq!(forecast.daily.len(), 1);
        assert_eq!(forecast.daily[0].precipitation_chance, Some(80.0));
    }
}
