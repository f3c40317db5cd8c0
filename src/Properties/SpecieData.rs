//! Species constants: name, mole count and molecular weight.
//!
//! Mixing rules conserve mass and moles:
//! - `a + b`: `n = max(n_a + n_b, SMALL)`, `W = n_a/n W_a + n_b/n W_b`
//! - `a - b`: `n = n_a - n_b` (`SMALL` when it vanishes), `W = n_a/n W_a - n_b/n W_b`
//! - `f * a`: `n = f n_a`, `W` unchanged
use super::SpecieRecord::{SpecieDict, SpecieRecord};
use super::props_api::{MixAlgebra, PropsError, PropsResult, RecordIO, SMALL, SpecieProps};
use std::ops::{Add, Mul, MulAssign, Sub};

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct SpecieData {
    name: String,
    nMoles: f64,
    molWeight: f64,
}

impl SpecieData {
    #[allow(non_snake_case)]
    pub fn new(name: &str, nMoles: f64, molWeight: f64) -> PropsResult<Self> {
        if !(molWeight.is_finite() && molWeight > 0.0) {
            return Err(PropsError::InvalidSpecie {
                name: name.to_owned(),
                reason: format!("molWeight must be positive, got {}", molWeight),
            });
        }
        // mixing deltas carry zero or negative mole counts
        if !nMoles.is_finite() {
            return Err(PropsError::InvalidSpecie {
                name: name.to_owned(),
                reason: format!("nMoles must be finite, got {}", nMoles),
            });
        }
        Ok(Self {
            name: name.to_owned(),
            nMoles,
            molWeight,
        })
    }

    /// mixing results skip validation: deltas may carry any sign
    #[allow(non_snake_case)]
    fn unchecked(nMoles: f64, molWeight: f64) -> Self {
        Self {
            name: String::new(),
            nMoles,
            molWeight,
        }
    }
}

impl SpecieProps for SpecieData {
    fn name(&self) -> &str {
        &self.name
    }
    fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }
    fn n_moles(&self) -> f64 {
        self.nMoles
    }
    fn W(&self) -> f64 {
        self.molWeight
    }
    fn type_name() -> String {
        "specie".to_owned()
    }
}

impl MixAlgebra for SpecieData {
    fn mix_add(&self, other: &Self) -> PropsResult<Self> {
        let sum = (self.nMoles + other.nMoles).max(SMALL);
        Ok(Self::unchecked(
            sum,
            self.nMoles / sum * self.molWeight + other.nMoles / sum * other.molWeight,
        ))
    }

    fn mix_sub(&self, other: &Self) -> PropsResult<Self> {
        let mut diff = self.nMoles - other.nMoles;
        if diff.abs() < SMALL {
            diff = SMALL;
        }
        Ok(Self::unchecked(
            diff,
            self.nMoles / diff * self.molWeight - other.nMoles / diff * other.molWeight,
        ))
    }

    fn scaled(&self, f: f64) -> Self {
        Self::unchecked(f * self.nMoles, self.molWeight)
    }
}

impl RecordIO for SpecieData {
    fn from_record(name: &str, record: &SpecieRecord) -> PropsResult<Self> {
        Self::new(name, record.specie.nMoles, record.specie.molWeight)
    }

    fn write_record(&self, record: &mut SpecieRecord) {
        record.specie = SpecieDict {
            nMoles: self.nMoles,
            molWeight: self.molWeight,
        };
    }
}

impl Add<&SpecieData> for &SpecieData {
    type Output = PropsResult<SpecieData>;
    fn add(self, other: &SpecieData) -> Self::Output {
        self.mix_add(other)
    }
}

impl Sub<&SpecieData> for &SpecieData {
    type Output = PropsResult<SpecieData>;
    fn sub(self, other: &SpecieData) -> Self::Output {
        self.mix_sub(other)
    }
}

impl Mul<&SpecieData> for f64 {
    type Output = SpecieData;
    fn mul(self, sp: &SpecieData) -> SpecieData {
        sp.scaled(self)
    }
}

impl MulAssign<f64> for SpecieData {
    fn mul_assign(&mut self, f: f64) {
        self.nMoles *= f;
    }
}
