/// Temperature display unit chosen by the user.
///
/// Presentation only: stored and transmitted temperatures stay in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Unit {
    /// The other unit, for the toggle control.
    pub fn toggled(self) -> Self {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Celsius,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Format a Celsius temperature for display in the given unit.
///
/// Rounding to the nearest whole degree happens after unit conversion, with
/// halves rounded away from zero.
pub fn format_temperature(celsius: f64, unit: Unit) -> String {
    let value = match unit {
        Unit::Celsius => celsius,
        Unit::Fahrenheit => celsius_to_fahrenheit(celsius),
    };

    format!("{}{}", value.round() as i64, unit.suffix())
}
