//! Car record types
//!
//! Field names are a stable contract shared by the REST routes and the
//! car form. Renaming one breaks both.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Wire names of every CarRecord field, in schema order.
pub const FIELD_NAMES: [&str; 8] = [
    "brand",
    "model",
    "color",
    "year_manufacture",
    "imported",
    "plates",
    "selling_date",
    "selling_price",
];

/// Paint colors accepted by the dealership.
///
/// Matching is exact and case-sensitive: `"branco"` is not `BRANCO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Amarelo,
    Azul,
    Branco,
    Cinza,
    Dourado,
    Laranja,
    Marrom,
    Prata,
    Preto,
    Rosa,
    Roxo,
    Verde,
    Vermelho,
}

impl Color {
    /// All colors, in display order
    pub const ALL: [Color; 13] = [
        Color::Amarelo,
        Color::Azul,
        Color::Branco,
        Color::Cinza,
        Color::Dourado,
        Color::Laranja,
        Color::Marrom,
        Color::Prata,
        Color::Preto,
        Color::Rosa,
        Color::Roxo,
        Color::Verde,
        Color::Vermelho,
    ];

    /// Returns the wire value
    pub const fn as_str(&self) -> &'static str {
        match self {
            Color::Amarelo => "AMARELO",
            Color::Azul => "AZUL",
            Color::Branco => "BRANCO",
            Color::Cinza => "CINZA",
            Color::Dourado => "DOURADO",
            Color::Laranja => "LARANJA",
            Color::Marrom => "MARROM",
            Color::Prata => "PRATA",
            Color::Preto => "PRETO",
            Color::Rosa => "ROSA",
            Color::Roxo => "ROXO",
            Color::Verde => "VERDE",
            Color::Vermelho => "VERMELHO",
        }
    }

    /// Parses a wire value. No case folding.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated vehicle inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    pub brand: String,
    pub model: String,
    pub color: Color,
    pub year_manufacture: i32,
    pub imported: bool,
    pub plates: String,
    #[serde(default)]
    pub selling_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub selling_price: Option<f64>,
}

/// The instant a validation call treats as "now".
///
/// Bounds that move with time (current year, latest selling date) are
/// resolved from this value, never from the process clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    now: DateTime<Utc>,
}

impl TimeReference {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Reads the system clock once
    pub fn current() -> Self {
        Self::at(Utc::now())
    }

    /// Midnight UTC on January 1st of `year`, if representable
    pub fn start_of_year(year: i32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single().map(Self::at)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn year(&self) -> i32 {
        self.now.year()
    }
}

/// Source of time references for long-lived callers (server, form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Wall clock, read per call
    #[default]
    System,
    /// Pinned instant
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn reference(&self) -> TimeReference {
        match self {
            Clock::System => TimeReference::current(),
            Clock::Fixed(now) => TimeReference::at(*now),
        }
    }
}
