use serde::Serialize;

use crate::{
    timestamp::Timestamp,
    vocab::{VsText, WeatherDesc, WeatherDescEn},
};

/// One forecast entry. Every field is optional and absent fields are left out
/// of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cuaca {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuaca_datetime: Option<Timestamp>,
    /// Temperature, °C.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    /// Total cloud cover, %.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcc: Option<i64>,
    /// Precipitation, mm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_desc: Option<WeatherDesc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_desc_en: Option<WeatherDescEn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wd_deg: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wd_to: Option<String>,
    /// Wind speed, km/h.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws: Option<f64>,
    /// Relative humidity, %.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hu: Option<i64>,
    /// Visibility, m.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs_text: Option<VsText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_datetime: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_datetime: Option<Timestamp>,
}

/// Forecast entries grouped by day. A slot is `None` when upstream did not
/// send that day at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCuaca {
    pub now: Option<Vec<Cuaca>>,
    pub day1: Option<Vec<Cuaca>>,
    pub day2: Option<Vec<Cuaca>>,
}

/// Administrative location attached to a forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Lokasi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adm1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adm2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adm3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adm4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provinsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kotkab: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kecamatan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}
