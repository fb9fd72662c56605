//! Usufruct valuation by age of the usufructuary (CGI article 669)

/// Age-banded usufruct/bare-ownership valuation scale
///
/// For a dismembered clause the usufructuary's age fixes what fraction of the
/// capital the usufruct represents; the bare owner gets the complement.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsufructScale;

impl UsufructScale {
    /// Usufruct value as a 0-100 percentage for a given usufructuary age
    pub fn usufruct_percent(&self, age: u8) -> f64 {
        match age {
            0..=20 => 90.0,
            21..=30 => 80.0,
            31..=40 => 70.0,
            41..=50 => 60.0,
            51..=60 => 50.0,
            61..=70 => 40.0,
            71..=80 => 30.0,
            81..=90 => 20.0,
            _ => 10.0,
        }
    }

    /// Bare-ownership value as a 0-100 percentage (complement of the usufruct)
    pub fn bare_ownership_percent(&self, age: u8) -> f64 {
        100.0 - self.usufruct_percent(age)
    }
}
