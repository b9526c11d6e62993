//! Text rendering of session state: a pure function of the current state,
//! mirroring the error banner and result card of the lookup page.

use skycast_core::{Session, Unit, WeatherReport, format_temperature};

/// Render the whole session: the error banner, if any, then the current
/// (possibly stale) report.
pub fn session(session: &Session) -> String {
    let mut out = String::new();

    if let Some(message) = session.state().error() {
        out.push_str(&banner(message));
    }

    if let Some(report) = session.report() {
        out.push_str(&report_card(report, session.unit()));
    }

    out
}

fn banner(message: &str) -> String {
    format!("! {message}\n")
}

/// Render one weather report in the chosen display unit.
pub fn report_card(report: &WeatherReport, unit: Unit) -> String {
    let conditions = &report.weather;
    let temperature = &conditions.temperature;

    let mut out = String::new();
    out.push_str(&format!("{}\n", report.location.name));
    out.push_str(&format!("{} - {}\n", conditions.main, conditions.description));
    out.push_str(&format!(
        "Temperature: {} (feels like {})\n",
        format_temperature(temperature.current, unit),
        format_temperature(temperature.feels_like, unit),
    ));
    out.push_str(&format!("Humidity:    {}%\n", conditions.humidity));
    out.push_str(&format!(
        "Min/Max:     {} / {}\n",
        format_temperature(temperature.min, unit),
        format_temperature(temperature.max, unit),
    ));
    out.push_str(&format!("Wind speed:  {} m/s\n", conditions.wind.speed));
    out.push_str(&format!("Icon:        {}\n", conditions.icon_url()));
    out
}
