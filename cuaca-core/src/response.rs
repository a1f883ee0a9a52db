//! The JSON document returned to clients.

use serde::Serialize;
use serde_json::Value;

use crate::{
    model::{Cuaca, ListCuaca, Lokasi},
    normalize::{parse_cuaca_matrix, parse_lokasi},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResponse {
    pub lokasi: Lokasi,
    pub cuaca: CuacaDays,
}

/// Serialized form of [`ListCuaca`]: absent days become empty arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CuacaDays {
    pub now: Vec<Cuaca>,
    pub day1: Vec<Cuaca>,
    pub day2: Vec<Cuaca>,
}

impl From<ListCuaca> for CuacaDays {
    fn from(list: ListCuaca) -> Self {
        Self {
            now: list.now.unwrap_or_default(),
            day1: list.day1.unwrap_or_default(),
            day2: list.day2.unwrap_or_default(),
        }
    }
}

pub fn assemble(lokasi: Lokasi, cuaca: ListCuaca) -> ForecastResponse {
    ForecastResponse {
        lokasi,
        cuaca: cuaca.into(),
    }
}

/// Build the response straight from an upstream BMKG document.
///
/// Reads `lokasi` and `data[0].cuaca`; missing pieces are treated as empty.
pub fn assemble_from_upstream(raw: &Value) -> ForecastResponse {
    let lokasi = parse_lokasi(raw.get("lokasi").unwrap_or(&Value::Null));
    let matrix = raw.pointer("/data/0/cuaca").unwrap_or(&Value::Null);
    let list = parse_cuaca_matrix(matrix);

    tracing::debug!(
        now = list.now.as_ref().map_or(0, Vec::len),
        day1 = list.day1.as_ref().map_or(0, Vec::len),
        day2 = list.day2.as_ref().map_or(0, Vec::len),
        "assembled forecast"
    );

    assemble(lokasi, list)
}
