//! Closed vocabularies used by the BMKG feed and the resolver that maps raw
//! tokens onto them.
//!
//! Unknown tokens resolve to `None` so that new upstream wording never breaks
//! a forecast response.

use serde::Serialize;

/// A closed set of `{symbolic name, display value}` pairs.
pub trait Vocabulary: Copy + 'static {
    /// Members in declaration order.
    const MEMBERS: &'static [Self];

    fn name(self) -> &'static str;

    fn display(self) -> &'static str;
}

/// Return the first member whose symbolic name or display value equals `raw`.
///
/// Matching is exact and case-sensitive.
pub fn resolve<V: Vocabulary>(raw: Option<&str>) -> Option<V> {
    let raw = raw?;
    V::MEMBERS
        .iter()
        .copied()
        .find(|member| member.name() == raw || member.display() == raw)
}

/// Weather description in Indonesian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeatherDesc {
    #[serde(rename = "Berawan")]
    Berawan,
    #[serde(rename = "Cerah")]
    Cerah,
    #[serde(rename = "Cerah Berawan")]
    CerahBerawan,
    #[serde(rename = "Hujan Ringan")]
    HujanRingan,
}

impl Vocabulary for WeatherDesc {
    const MEMBERS: &'static [Self] = &[
        Self::Berawan,
        Self::Cerah,
        Self::CerahBerawan,
        Self::HujanRingan,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Berawan => "BERAWAN",
            Self::Cerah => "CERAH",
            Self::CerahBerawan => "CERAH_BERAWAN",
            Self::HujanRingan => "HUJAN_RINGAN",
        }
    }

    fn display(self) -> &'static str {
        match self {
            Self::Berawan => "Berawan",
            Self::Cerah => "Cerah",
            Self::CerahBerawan => "Cerah Berawan",
            Self::HujanRingan => "Hujan Ringan",
        }
    }
}

/// Weather description in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeatherDescEn {
    #[serde(rename = "Light Rain")]
    LightRain,
    #[serde(rename = "Mostly Cloudy")]
    MostlyCloudy,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    #[serde(rename = "Sunny")]
    Sunny,
}

impl Vocabulary for WeatherDescEn {
    const MEMBERS: &'static [Self] = &[
        Self::LightRain,
        Self::MostlyCloudy,
        Self::PartlyCloudy,
        Self::Sunny,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::LightRain => "LIGHT_RAIN",
            Self::MostlyCloudy => "MOSTLY_CLOUDY",
            Self::PartlyCloudy => "PARTLY_CLOUDY",
            Self::Sunny => "SUNNY",
        }
    }

    fn display(self) -> &'static str {
        match self {
            Self::LightRain => "Light Rain",
            Self::MostlyCloudy => "Mostly Cloudy",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Sunny => "Sunny",
        }
    }
}

/// Visibility label. BMKG currently only emits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VsText {
    #[serde(rename = "> 10 km")]
    The10Km,
}

impl Vocabulary for VsText {
    const MEMBERS: &'static [Self] = &[Self::The10Km];

    fn name(self) -> &'static str {
        "THE_10_KM"
    }

    fn display(self) -> &'static str {
        "> 10 km"
    }
}
