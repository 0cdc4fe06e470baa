//! Physical lengths and the unit table.
//!
//! A [`Length`] is a value tagged with a [`LengthUnit`]. Conversions go
//! through each unit's factor to the meter, so converting is always
//! `value * factor(from) / factor(to)`.
//!
//! # Literal grammar
//!
//! ```text
//! [+-]? digits? ( "." digits )? whitespace* unit
//! ```
//!
//! `unit` is matched as the longest known suffix, so `"3dam"` is three
//! decameters and not three "d" attometers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{SceneError, SceneResult};

/// Meters in one astronomical unit.
pub const ASTRONOMICAL_UNIT: f64 = 149_597_870_700.0;

/// Length units ordered by increasing factor to the meter.
///
/// The astronomical unit sits between gigameters and terameters so that
/// [`LengthUnit::larger`] / [`LengthUnit::smaller`] always step monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LengthUnit {
    Attometer,
    Femtometer,
    Picometer,
    Nanometer,
    Micrometer,
    Millimeter,
    Centimeter,
    Decimeter,
    Meter,
    Decameter,
    Hectometer,
    Kilometer,
    Megameter,
    Gigameter,
    AstronomicalUnit,
    Terameter,
    Petameter,
    Exameter,
}

impl LengthUnit {
    /// Every unit, smallest first.
    pub const ALL: [LengthUnit; 18] = [
        LengthUnit::Attometer,
        LengthUnit::Femtometer,
        LengthUnit::Picometer,
        LengthUnit::Nanometer,
        LengthUnit::Micrometer,
        LengthUnit::Millimeter,
        LengthUnit::Centimeter,
        LengthUnit::Decimeter,
        LengthUnit::Meter,
        LengthUnit::Decameter,
        LengthUnit::Hectometer,
        LengthUnit::Kilometer,
        LengthUnit::Megameter,
        LengthUnit::Gigameter,
        LengthUnit::AstronomicalUnit,
        LengthUnit::Terameter,
        LengthUnit::Petameter,
        LengthUnit::Exameter,
    ];

    /// Multiplicative factor from this unit to meters.
    pub fn factor(self) -> f64 {
        match self {
            LengthUnit::Attometer => 1e-18,
            LengthUnit::Femtometer => 1e-15,
            LengthUnit::Picometer => 1e-12,
            LengthUnit::Nanometer => 1e-9,
            LengthUnit::Micrometer => 1e-6,
            LengthUnit::Millimeter => 1e-3,
            LengthUnit::Centimeter => 1e-2,
            LengthUnit::Decimeter => 1e-1,
            LengthUnit::Meter => 1.0,
            LengthUnit::Decameter => 1e1,
            LengthUnit::Hectometer => 1e2,
            LengthUnit::Kilometer => 1e3,
            LengthUnit::Megameter => 1e6,
            LengthUnit::Gigameter => 1e9,
            LengthUnit::AstronomicalUnit => ASTRONOMICAL_UNIT,
            LengthUnit::Terameter => 1e12,
            LengthUnit::Petameter => 1e15,
            LengthUnit::Exameter => 1e18,
        }
    }

    /// Suffix used in length literals.
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Attometer => "am",
            LengthUnit::Femtometer => "fm",
            LengthUnit::Picometer => "pm",
            LengthUnit::Nanometer => "nm",
            LengthUnit::Micrometer => "μm",
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Decimeter => "dm",
            LengthUnit::Meter => "m",
            LengthUnit::Decameter => "dam",
            LengthUnit::Hectometer => "hm",
            LengthUnit::Kilometer => "km",
            LengthUnit::Megameter => "Mm",
            LengthUnit::Gigameter => "Gm",
            LengthUnit::AstronomicalUnit => "ua",
            LengthUnit::Terameter => "Tm",
            LengthUnit::Petameter => "Pm",
            LengthUnit::Exameter => "Em",
        }
    }

    fn position(self) -> usize {
        self as usize
    }

    /// The next unit up the table, if any.
    pub fn larger(self) -> Option<LengthUnit> {
        Self::ALL.get(self.position() + 1).copied()
    }

    /// The next unit down the table, if any.
    pub fn smaller(self) -> Option<LengthUnit> {
        self.position().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Find the longest unit symbol that `text` ends with.
    fn longest_suffix_of(text: &str) -> Option<LengthUnit> {
        Self::ALL
            .iter()
            .copied()
            .filter(|unit| text.ends_with(unit.symbol()))
            .max_by_key(|unit| unit.symbol().len())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.symbol() == s)
            .ok_or_else(|| SceneError::InvalidUnit(s.to_string()))
    }
}

/// A value expressed in a specific unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Default for Length {
    fn default() -> Self {
        Self::meters(1.0)
    }
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, LengthUnit::Meter)
    }

    /// This length's magnitude when expressed in `target`.
    pub fn in_unit(&self, target: LengthUnit) -> f64 {
        if target == self.unit {
            return self.value;
        }
        self.value * (self.unit.factor() / target.factor())
    }

    /// Like [`Length::in_unit`], but the target is given by its symbol.
    pub fn in_symbol(&self, symbol: &str) -> SceneResult<f64> {
        let target = symbol.parse::<LengthUnit>()?;
        Ok(self.in_unit(target))
    }

    /// The same physical length re-expressed in `target`.
    pub fn convert(&self, target: LengthUnit) -> Length {
        Length::new(self.in_unit(target), target)
    }

    /// Re-express in the next larger unit, or return `self` at the top.
    pub fn to_larger(&self) -> Length {
        self.unit.larger().map_or(*self, |unit| self.convert(unit))
    }

    /// Re-express in the next smaller unit, or return `self` at the bottom.
    pub fn to_smaller(&self) -> Length {
        self.unit.smaller().map_or(*self, |unit| self.convert(unit))
    }

    /// Parse a length literal such as `"150cm"`, `"-.5 km"` or `"+3ua"`.
    pub fn parse(text: &str) -> SceneResult<Length> {
        let malformed = || SceneError::MalformedLength(text.to_string());
        let trimmed = text.trim();
        let unit = LengthUnit::longest_suffix_of(trimmed).ok_or_else(malformed)?;
        let number = trimmed[..trimmed.len() - unit.symbol().len()].trim_end();
        if !is_number_literal(number) {
            return Err(malformed());
        }
        let value = number.parse::<f64>().map_err(|_| malformed())?;
        Ok(Length::new(value, unit))
    }
}

/// `[+-]? digits? ("." digits)?` with at least one digit somewhere.
fn is_number_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer) {
        return false;
    }
    match fraction {
        Some(fraction) => !fraction.is_empty() && all_digits(fraction),
        None => !integer.is_empty(),
    }
}

impl FromStr for Length {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Length::parse(s)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.symbol())
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Length::parse(&text).map_err(serde::de::Error::custom)
    }
}
