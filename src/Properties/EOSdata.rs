//! Ideal gas equation of state: `rho = p / (R T)`.
//!
//! Leaf of the property stack. Holds the species constants and forwards the
//! mixing algebra to them.
use super::SpecieData::SpecieData;
use super::SpecieRecord::SpecieRecord;
use super::props_api::{EquationOfState, MixAlgebra, PropsResult, RR, RecordIO, SpecieProps};
use log::debug;
use std::ops::{Add, Mul, MulAssign, Sub};

#[derive(Debug, Clone, PartialEq)]
pub struct IdealGasEOS {
    specie: SpecieData,
}

impl IdealGasEOS {
    pub fn new(specie: SpecieData) -> Self {
        Self { specie }
    }

    /// shortcut for `IdealGasEOS::new(SpecieData::new(..)?)`
    #[allow(non_snake_case)]
    pub fn from_constants(name: &str, nMoles: f64, molWeight: f64) -> PropsResult<Self> {
        Ok(Self::new(SpecieData::new(name, nMoles, molWeight)?))
    }

    pub fn specie(&self) -> &SpecieData {
        &self.specie
    }
}

impl SpecieProps for IdealGasEOS {
    fn name(&self) -> &str {
        self.specie.name()
    }
    fn set_name(&mut self, name: &str) {
        self.specie.set_name(name)
    }
    fn n_moles(&self) -> f64 {
        self.specie.n_moles()
    }
    fn W(&self) -> f64 {
        self.specie.W()
    }
    fn type_name() -> String {
        format!("idealGas<{}>", SpecieData::type_name())
    }
}

#[allow(non_snake_case)]
impl EquationOfState for IdealGasEOS {
    const INCOMPRESSIBLE: bool = false;
    const ISOCHORIC: bool = false;

    fn density(&self, p: f64, T: f64) -> f64 {
        p / (self.R() * T)
    }

    fn compressibility(&self, _p: f64, T: f64) -> f64 {
        1.0 / (self.R() * T)
    }

    fn compression_factor(&self, _p: f64, _T: f64) -> f64 {
        1.0
    }

    fn cp_minus_cv(&self, _p: f64, _T: f64) -> f64 {
        RR
    }
}

impl MixAlgebra for IdealGasEOS {
    fn mix_add(&self, other: &Self) -> PropsResult<Self> {
        Ok(Self::new(self.specie.mix_add(&other.specie)?))
    }

    fn mix_sub(&self, other: &Self) -> PropsResult<Self> {
        Ok(Self::new(self.specie.mix_sub(&other.specie)?))
    }

    fn scaled(&self, f: f64) -> Self {
        Self::new(self.specie.scaled(f))
    }
}

impl RecordIO for IdealGasEOS {
    fn from_record(name: &str, record: &SpecieRecord) -> PropsResult<Self> {
        let specie = SpecieData::from_record(name, record)?;
        debug!("ideal gas EOS for '{}': W = {}", name, specie.W());
        Ok(Self::new(specie))
    }

    fn write_record(&self, record: &mut SpecieRecord) {
        self.specie.write_record(record);
    }
}

impl Add<&IdealGasEOS> for &IdealGasEOS {
    type Output = PropsResult<IdealGasEOS>;
    fn add(self, other: &IdealGasEOS) -> Self::Output {
        self.mix_add(other)
    }
}

impl Sub<&IdealGasEOS> for &IdealGasEOS {
    type Output = PropsResult<IdealGasEOS>;
    fn sub(self, other: &IdealGasEOS) -> Self::Output {
        self.mix_sub(other)
    }
}

impl Mul<&IdealGasEOS> for f64 {
    type Output = IdealGasEOS;
    fn mul(self, eos: &IdealGasEOS) -> IdealGasEOS {
        eos.scaled(self)
    }
}

impl MulAssign<f64> for IdealGasEOS {
    fn mul_assign(&mut self, f: f64) {
        self.specie *= f;
    }
}
