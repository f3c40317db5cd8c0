//! Layered configuration record of one species.
//!
//! The record mirrors the layering of the property stack: the `specie` group is
//! read by the equation of state, `thermodynamics` by the NASA polynomial layer
//! and `transport` by the Sutherland layer. Field names are stable and
//! round-trip through `serde_json` unchanged.
//!
//! ```json
//! {
//!   "N2": {
//!     "specie": { "nMoles": 1.0, "molWeight": 28.0134 },
//!     "thermodynamics": {
//!       "Tlow": 200.0, "Thigh": 5000.0, "Tcommon": 1000.0,
//!       "highCpCoeffs": [2.9266, 0.0014879768, -5.68476e-7, 1.0097038e-10, -6.753351e-15, -922.7977, 5.980528],
//!       "lowCpCoeffs": [3.298677, 0.0014082404, -3.963222e-6, 5.641515e-9, -2.444854e-12, -1020.8999, 3.950372]
//!     },
//!     "transport": { "As": 1.407e-6, "Ts": 111.0 }
//!   }
//! }
//! ```
use super::props_api::{N_COEFFS, PropsError, PropsResult};
use nalgebra::SVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// fixed-length NASA coefficient array
pub type CoeffArray = SVector<f64, N_COEFFS>;

/// species name -> record, kept in name order
pub type SpeciesDictionary = BTreeMap<String, SpecieRecord>;

fn default_n_moles() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct SpecieDict {
    #[serde(default = "default_n_moles")]
    pub nMoles: f64,
    pub molWeight: f64,
}

impl Default for SpecieDict {
    fn default() -> Self {
        Self {
            nMoles: 1.0,
            molWeight: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct ThermoDict {
    pub Tlow: f64,
    pub Thigh: f64,
    pub Tcommon: f64,
    #[serde(alias = "highCoeffs")]
    pub highCpCoeffs: Vec<f64>,
    #[serde(alias = "lowCoeffs")]
    pub lowCpCoeffs: Vec<f64>,
}

/// Sutherland coefficients, given directly or as two calibration points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[allow(non_snake_case)]
pub enum TransportDict {
    Sutherland {
        As: f64,
        Ts: f64,
    },
    TwoPoint {
        mu1: f64,
        T1: f64,
        mu2: f64,
        T2: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct SpecieRecord {
    #[serde(alias = "equationOfState")]
    pub specie: SpecieDict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermodynamics: Option<ThermoDict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportDict>,
}

/// checks the length of a coefficient list read from a record
pub fn coeffs_from_slice(name: &str, field: &'static str, data: &[f64]) -> PropsResult<CoeffArray> {
    if data.len() != N_COEFFS {
        return Err(PropsError::InvalidCoefficients {
            name: name.to_owned(),
            field,
            expected: N_COEFFS,
            found: data.len(),
        });
    }
    Ok(CoeffArray::from_column_slice(data))
}

pub fn coeffs_to_vec(coeffs: &CoeffArray) -> Vec<f64> {
    coeffs.iter().copied().collect()
}

/// parse a species dictionary from JSON text
pub fn from_json(text: &str) -> PropsResult<SpeciesDictionary> {
    Ok(serde_json::from_str(text)?)
}

/// write a species dictionary as pretty JSON text
pub fn to_json(dictionary: &SpeciesDictionary) -> PropsResult<String> {
    Ok(serde_json::to_string_pretty(dictionary)?)
}
