//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::filters;
use crate::middleware::{CartWarnings, Flash};
use crate::models::FlashMessage;

/// A mocked weather report for the home page sidebar.
///
/// Static data standing in for a weather API integration.
pub struct WeatherReport {
    pub name: &'static str,
    pub forecast_url: &'static str,
    pub weather: &'static str,
    pub temp: &'static str,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub flash: Option<FlashMessage>,
    pub warnings: CartWarnings,
    pub weather: Vec<WeatherReport>,
}

fn weather_data() -> Vec<WeatherReport> {
    vec![
        WeatherReport {
            name: "Portland",
            forecast_url: "https://www.wunderground.com/US/OR/Portland.html",
            weather: "Overcast",
            temp: "54.1 F (12.3 C)",
        },
        WeatherReport {
            name: "Bend",
            forecast_url: "https://www.wunderground.com/US/OR/Bend.html",
            weather: "Partly Cloudy",
            temp: "55.0 F (12.8 C)",
        },
        WeatherReport {
            name: "Manzanita",
            forecast_url: "https://www.wunderground.com/US/OR/Manzanita.html",
            weather: "Light Rain",
            temp: "55.0 F (12.8 C)",
        },
    ]
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(Flash(flash): Flash, warnings: CartWarnings) -> HomeTemplate {
    HomeTemplate {
        flash,
        warnings,
        weather: weather_data(),
    }
}
