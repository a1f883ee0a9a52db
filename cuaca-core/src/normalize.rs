//! Conversion of raw BMKG JSON into [`Cuaca`], [`ListCuaca`] and [`Lokasi`].
//!
//! Nothing in here fails. A field with the wrong shape becomes `None`, a
//! non-object entry is skipped and a malformed matrix yields empty slots.

use serde_json::{Map, Value};

use crate::{
    model::{Cuaca, ListCuaca, Lokasi},
    timestamp::Timestamp,
    vocab::{VsText, WeatherDesc, WeatherDescEn, resolve},
};

/// Candidate keys for the primary timestamp, highest precedence first.
const PRIMARY_DATETIME_KEYS: &[&str] = &["cuaca_datetime", "utc_datetime", "local_datetime"];

/// Normalize one raw forecast entry.
pub fn parse_cuaca_item(raw: &Map<String, Value>) -> Cuaca {
    Cuaca {
        cuaca_datetime: primary_datetime(raw),
        t: float_field(raw, "t"),
        tcc: int_field(raw, "tcc"),
        tp: float_field(raw, "tp"),
        weather: int_field(raw, "weather"),
        weather_desc: resolve::<WeatherDesc>(str_field(raw, "weather_desc")),
        weather_desc_en: resolve::<WeatherDescEn>(str_field(raw, "weather_desc_en")),
        wd_deg: int_field(raw, "wd_deg"),
        wd: string_field(raw, "wd"),
        wd_to: string_field(raw, "wd_to"),
        ws: float_field(raw, "ws"),
        hu: int_field(raw, "hu"),
        vs: int_field(raw, "vs"),
        vs_text: resolve::<VsText>(str_field(raw, "vs_text")),
        time_index: string_field(raw, "time_index"),
        analysis_date: Timestamp::parse(str_field(raw, "analysis_date")),
        image: string_field(raw, "image"),
        utc_datetime: Timestamp::parse(str_field(raw, "utc_datetime")),
        local_datetime: Timestamp::parse(str_field(raw, "local_datetime")),
    }
}

/// Normalize every object in `items`, dropping anything that is not one.
pub fn parse_cuaca_list(items: &[Value]) -> Vec<Cuaca> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(parse_cuaca_item)
        .collect()
}

/// Reshape the raw `cuaca` matrix into now/day1/day2.
///
/// Index 0 maps to `now`, 1 to `day1`, 2 to `day2`; later days are ignored.
/// A non-array input leaves all three slots absent. A day that is present but
/// not an array becomes an empty slot.
pub fn parse_cuaca_matrix(raw: &Value) -> ListCuaca {
    let Some(days) = raw.as_array() else {
        tracing::debug!(
            kind = value_kind(raw),
            "cuaca matrix is not an array, treating as empty"
        );
        return ListCuaca::default();
    };

    if days.len() > 3 {
        tracing::debug!(days = days.len(), "ignoring forecast days beyond day2");
    }

    let mut parsed = days.iter().take(3).map(|day| match day.as_array() {
        Some(items) => parse_cuaca_list(items),
        None => Vec::new(),
    });

    ListCuaca {
        now: parsed.next(),
        day1: parsed.next(),
        day2: parsed.next(),
    }
}

/// Extract the location block. Anything other than an object yields an empty
/// [`Lokasi`].
pub fn parse_lokasi(raw: &Value) -> Lokasi {
    let Some(raw) = raw.as_object() else {
        return Lokasi::default();
    };

    Lokasi {
        adm1: string_field(raw, "adm1"),
        adm2: string_field(raw, "adm2"),
        adm3: string_field(raw, "adm3"),
        adm4: string_field(raw, "adm4"),
        provinsi: string_field(raw, "provinsi"),
        kotkab: string_field(raw, "kotkab"),
        kecamatan: string_field(raw, "kecamatan"),
        desa: string_field(raw, "desa"),
        lon: float_field(raw, "lon"),
        lat: float_field(raw, "lat"),
        timezone: string_field(raw, "timezone"),
    }
}

fn primary_datetime(raw: &Map<String, Value>) -> Option<Timestamp> {
    let winner = PRIMARY_DATETIME_KEYS
        .iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| is_present(value))?;
    Timestamp::parse(winner.as_str())
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn str_field<'a>(raw: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str)
}

fn string_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    str_field(raw, key).map(str::to_owned)
}

fn float_field(raw: &Map<String, Value>, key: &str) -> Option<f64> {
    match raw.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn int_field(raw: &Map<String, Value>, key: &str) -> Option<i64> {
    match raw.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(v))
                .map(|v| v as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn full_entry() -> Value {
        json!({
            "t": 27,
            "tcc": 75,
            "tp": 0.4,
            "weather": 3,
            "weather_desc": "Berawan",
            "weather_desc_en": "Mostly Cloudy",
            "wd_deg": 225,
            "wd": "SW",
            "wd_to": "NE",
            "ws": 5.6,
            "hu": 81,
            "vs": 10500,
            "vs_text": "> 10 km",
            "time_index": "0-1",
            "analysis_date": "2024-11-12T12:00:00",
            "image": "https://api-apps.bmkg.go.id/storage/icon/cuaca/berawan-pm.svg",
            "utc_datetime": "2024-11-12 23:00:00",
            "local_datetime": "2024-11-13 07:00:00"
        })
    }

    #[test]
    fn normalizes_full_bmkg_entry() {
        let cuaca = parse_cuaca_item(&object(full_entry()));

        assert_eq!(cuaca.cuaca_datetime.unwrap().to_iso_string(), "2024-11-12T23:00:00");
        assert_eq!(cuaca.t, Some(27.0));
        assert_eq!(cuaca.tcc, Some(75));
        assert_eq!(cuaca.tp, Some(0.4));
        assert_eq!(cuaca.weather, Some(3));
        assert_eq!(cuaca.weather_desc, Some(WeatherDesc::Berawan));
        assert_eq!(cuaca.weather_desc_en, Some(WeatherDescEn::MostlyCloudy));
        assert_eq!(cuaca.wd_deg, Some(225));
        assert_eq!(cuaca.wd.as_deref(), Some("SW"));
        assert_eq!(cuaca.wd_to.as_deref(), Some("NE"));
        assert_eq!(cuaca.ws, Some(5.6));
        assert_eq!(cuaca.hu, Some(81));
        assert_eq!(cuaca.vs, Some(10500));
        assert_eq!(cuaca.vs_text, Some(VsText::The10Km));
        assert_eq!(cuaca.time_index.as_deref(), Some("0-1"));
        assert_eq!(cuaca.analysis_date.unwrap().to_iso_string(), "2024-11-12T12:00:00");
        assert!(cuaca.image.is_some());
        assert_eq!(cuaca.utc_datetime.unwrap().to_iso_string(), "2024-11-12T23:00:00");
        assert_eq!(cuaca.local_datetime.unwrap().to_iso_string(), "2024-11-13T07:00:00");
    }

    #[test]
    fn only_present_fields_are_populated() {
        let full = object(full_entry());
        let keys: Vec<String> = full.keys().cloned().collect();

        // Drop every other key, then the complementary half.
        for parity in 0..2 {
            let subset: Map<String, Value> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| i % 2 == parity)
                .map(|(_, (k, v))| (k.clone(), v.clone()))
                .collect();

            let cuaca = parse_cuaca_item(&subset);
            let out = serde_json::to_value(&cuaca).unwrap();
            let out = out.as_object().unwrap();

            for key in &keys {
                let present_in = subset.contains_key(key);
                assert_eq!(out.contains_key(key), present_in, "key {key}, parity {parity}");
            }
        }
    }

    #[test]
    fn empty_object_yields_empty_record() {
        let cuaca = parse_cuaca_item(&Map::new());
        assert_eq!(cuaca, Cuaca::default());
    }

    #[test]
    fn wrong_types_degrade_per_field() {
        let cuaca = parse_cuaca_item(&object(json!({
            "t": "hot",
            "tcc": 12.5,
            "tp": [1, 2],
            "weather": true,
            "weather_desc": 7,
            "wd": 180,
            "hu": "81",
            "vs": 10000.0,
            "analysis_date": "not a date",
            "image": null,
            "ws": "3.5"
        })));

        assert_eq!(cuaca.t, None);
        assert_eq!(cuaca.tcc, None);
        assert_eq!(cuaca.tp, None);
        assert_eq!(cuaca.weather, None);
        assert_eq!(cuaca.weather_desc, None);
        assert_eq!(cuaca.wd, None);
        assert_eq!(cuaca.analysis_date, None);
        assert_eq!(cuaca.image, None);
        // Coercible values survive.
        assert_eq!(cuaca.hu, Some(81));
        assert_eq!(cuaca.vs, Some(10000));
        assert_eq!(cuaca.ws, Some(3.5));
    }

    #[test]
    fn unknown_vocabulary_values_are_absent() {
        let cuaca = parse_cuaca_item(&object(json!({
            "weather_desc": "Hujan Petir",
            "weather_desc_en": "Thunderstorm",
            "vs_text": "< 1 km"
        })));

        assert_eq!(cuaca.weather_desc, None);
        assert_eq!(cuaca.weather_desc_en, None);
        assert_eq!(cuaca.vs_text, None);
    }

    #[test]
    fn primary_timestamp_precedence() {
        let cuaca = parse_cuaca_item(&object(json!({
            "utc_datetime": "2024-01-01 00:00:00",
            "local_datetime": "2024-01-01 07:00:00"
        })));
        assert_eq!(cuaca.cuaca_datetime.unwrap().to_iso_string(), "2024-01-01T00:00:00");

        let cuaca = parse_cuaca_item(&object(json!({
            "cuaca_datetime": "",
            "utc_datetime": null,
            "local_datetime": "2024-01-01 07:00:00"
        })));
        assert_eq!(cuaca.cuaca_datetime.unwrap().to_iso_string(), "2024-01-01T07:00:00");

        let cuaca = parse_cuaca_item(&object(json!({
            "cuaca_datetime": "2024-01-01T05:00:00",
            "utc_datetime": "2024-01-01 00:00:00"
        })));
        assert_eq!(cuaca.cuaca_datetime.unwrap().to_iso_string(), "2024-01-01T05:00:00");
    }

    #[test]
    fn feed_datetime_key_is_not_a_timestamp_source() {
        let cuaca = parse_cuaca_item(&object(json!({
            "datetime": "2024-11-12T23:00:00Z",
            "utc_datetime": "2024-11-12 23:00:00"
        })));
        assert_eq!(cuaca.cuaca_datetime.unwrap().to_iso_string(), "2024-11-12T23:00:00");

        let cuaca = parse_cuaca_item(&object(json!({"datetime": "2024-11-12T23:00:00Z"})));
        assert_eq!(cuaca.cuaca_datetime, None);
    }

    #[test]
    fn non_string_winner_does_not_fall_through() {
        let cuaca = parse_cuaca_item(&object(json!({
            "cuaca_datetime": 1704070800,
            "utc_datetime": "2024-01-01 00:00:00"
        })));
        assert_eq!(cuaca.cuaca_datetime, None);
        assert!(cuaca.utc_datetime.is_some());
    }

    #[test]
    fn end_to_end_single_entry() {
        let cuaca = parse_cuaca_item(&object(json!({
            "cuaca_datetime": "2024-01-01T07:00:00",
            "t": 27.5,
            "weather_desc": "Cerah",
            "vs_text": "> 10 km"
        })));

        assert_eq!(cuaca.cuaca_datetime.unwrap().to_iso_string(), "2024-01-01T07:00:00");
        assert_eq!(cuaca.t, Some(27.5));
        assert_eq!(cuaca.weather_desc, Some(WeatherDesc::Cerah));
        assert_eq!(cuaca.vs_text, Some(VsText::The10Km));

        let out = serde_json::to_value(&cuaca).unwrap();
        assert_eq!(
            out,
            json!({
                "cuaca_datetime": "2024-01-01T07:00:00",
                "t": 27.5,
                "weather_desc": "Cerah",
                "vs_text": "> 10 km"
            })
        );
    }

    #[test]
    fn list_skips_non_objects() {
        let items = vec![
            json!({"t": 1}),
            json!("noise"),
            json!(null),
            json!([1]),
            json!({"t": 2}),
        ];
        let parsed = parse_cuaca_list(&items);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].t, Some(1.0));
        assert_eq!(parsed[1].t, Some(2.0));
    }

    #[test]
    fn matrix_fills_slots_by_position() {
        let day = || json!([{"t": 1}]);

        let one = parse_cuaca_matrix(&json!([day()]));
        assert!(one.now.is_some() && one.day1.is_none() && one.day2.is_none());

        let two = parse_cuaca_matrix(&json!([day(), day()]));
        assert!(two.now.is_some() && two.day1.is_some() && two.day2.is_none());

        let three = parse_cuaca_matrix(&json!([day(), day(), day()]));
        assert!(three.now.is_some() && three.day1.is_some() && three.day2.is_some());

        let five = parse_cuaca_matrix(&json!([day(), day(), day(), day(), day()]));
        assert_eq!(five, three);
    }

    #[test]
    fn matrix_keeps_day_order() {
        let list = parse_cuaca_matrix(&json!([[{"t": 1}], [{"t": 2}, {"t": 3}], [{"t": 4}]]));
        let temps = |slot: Option<Vec<Cuaca>>| -> Vec<f64> {
            slot.unwrap().into_iter().filter_map(|c| c.t).collect()
        };
        assert_eq!(temps(list.now), vec![1.0]);
        assert_eq!(temps(list.day1), vec![2.0, 3.0]);
        assert_eq!(temps(list.day2), vec![4.0]);
    }

    #[test]
    fn non_array_matrix_leaves_all_slots_absent() {
        for raw in [json!(null), json!("cuaca"), json!(42), json!({"now": []})] {
            assert_eq!(parse_cuaca_matrix(&raw), ListCuaca::default(), "input {raw}");
        }
    }

    #[test]
    fn non_array_day_becomes_empty_slot() {
        let list = parse_cuaca_matrix(&json!([{"t": 1}, [{"t": 2}]]));
        assert_eq!(list.now, Some(Vec::new()));
        assert_eq!(list.day1.map(|d| d.len()), Some(1));
        assert_eq!(list.day2, None);
    }

    #[test]
    fn lokasi_passes_fields_through() {
        let lokasi = parse_lokasi(&json!({
            "adm1": "64",
            "adm2": "64.71",
            "adm3": "64.71.01",
            "adm4": "64.71.01.1001",
            "provinsi": "Kalimantan Timur",
            "kotkab": "Kota Balikpapan",
            "kecamatan": "Balikpapan Selatan",
            "desa": "Sepinggan",
            "lon": 116.8961,
            "lat": "-1.2563",
            "timezone": "Asia/Makassar",
            "type": "adm4"
        }));

        assert_eq!(lokasi.adm4.as_deref(), Some("64.71.01.1001"));
        assert_eq!(lokasi.desa.as_deref(), Some("Sepinggan"));
        assert_eq!(lokasi.lon, Some(116.8961));
        assert_eq!(lokasi.lat, Some(-1.2563));
        assert_eq!(lokasi.timezone.as_deref(), Some("Asia/Makassar"));
    }

    #[test]
    fn lokasi_tolerates_non_objects() {
        assert_eq!(parse_lokasi(&json!(null)), Lokasi::default());
        assert_eq!(parse_lokasi(&json!(["64"])), Lokasi::default());
    }
}
