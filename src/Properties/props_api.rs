//! # Property model API
//!
//! ## Aim
//! Common vocabulary of the property stack: physical constants, the error type,
//! and the traits every layer implements. A layer wraps the layer beneath it and
//! forwards the lower traits, so the full stack
//! `SutherlandTransport<NASAThermo<IdealGasEOS>>` answers density, enthalpy and
//! viscosity questions alike.
//!
//! ## Traits
//! - `SpecieProps`: name, mole count, molecular weight, gas constant
//! - `EquationOfState`: density, compressibility, compression factor, cp - cv
//! - `ThermoModel`: heat capacity, enthalpies, entropy, temperature limits
//! - `TransportModel`: viscosity, thermal conductivity, thermal diffusivity
//! - `MixAlgebra`: mole-weighted `+`, `-`, scaling and the difference convention
//! - `RecordIO`: construction from and writing to a `SpecieRecord`
//!
//! All evaluators are pure functions of `(p, T)` and the instance fields.
use super::SpecieRecord::SpecieRecord;
use thiserror::Error;

/// universal gas constant, J/(kmol·K)
pub const RR: f64 = 8314.47;
/// standard temperature, K
#[allow(non_upper_case_globals)]
pub const Tstd: f64 = 298.15;
/// standard pressure, Pa
#[allow(non_upper_case_globals)]
pub const Pstd: f64 = 1.0e5;
/// smallest mole count a mixing result may carry
pub const SMALL: f64 = 1.0e-15;
/// number of coefficients in each NASA polynomial array
pub const N_COEFFS: usize = 7;

/// name used in diagnostics for unnamed (mixed) instances
pub fn display_name(name: &str) -> &str {
    if name.is_empty() { "others" } else { name }
}

pub type PropsResult<T> = Result<T, PropsError>;

/// errors of construction, mixing and persistence of property models
#[derive(Debug, Error)]
pub enum PropsError {
    #[error("invalid specie '{name}': {reason}")]
    InvalidSpecie { name: String, reason: String },
    #[error("invalid temperature range for '{name}': {reason}")]
    InvalidRange { name: String, reason: String },
    #[error("invalid transport coefficients for '{name}': {reason}")]
    InvalidTransport { name: String, reason: String },
    #[error("'{name}': {field} must contain {expected} coefficients, found {found}")]
    InvalidCoefficients {
        name: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("'{name}': missing required data: {field}")]
    MissingData { name: String, field: &'static str },
    #[error("cannot mix {first} with {second}: {reason}")]
    IncompatibleMix {
        first: String,
        second: String,
        reason: String,
    },
    #[error("invalid mixture: {0}")]
    InvalidMixture(String),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PropsError {
    /// true for errors raised while validating constructor input
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            PropsError::InvalidSpecie { .. }
                | PropsError::InvalidRange { .. }
                | PropsError::InvalidTransport { .. }
                | PropsError::InvalidCoefficients { .. }
                | PropsError::MissingData { .. }
        )
    }

    pub(crate) fn incompatible(first: &str, second: &str, reason: String) -> Self {
        PropsError::IncompatibleMix {
            first: display_name(first).to_owned(),
            second: display_name(second).to_owned(),
            reason,
        }
    }
}

/// Temperature fell outside `[Tlow, Thigh]`. Not fatal: evaluation clamps to
/// the nearest bound and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("attempt to use thermo out of temperature range {Tlow} -> {Thigh};  T = {T}")]
#[allow(non_snake_case)]
pub struct OutOfRangeWarning {
    pub T: f64,
    pub Tlow: f64,
    pub Thigh: f64,
}

impl OutOfRangeWarning {
    /// temperature moved to the nearest bound
    pub fn clamped(&self) -> f64 {
        self.T.max(self.Tlow).min(self.Thigh)
    }
}

/// Identity and fundamental constants of a species (or a mixture of species).
#[allow(non_snake_case)]
pub trait SpecieProps {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: &str);
    /// number of moles of this species in the mixture
    fn n_moles(&self) -> f64;
    /// molecular weight, kg/kmol
    fn W(&self) -> f64;
    /// specific gas constant, J/(kg·K)
    fn R(&self) -> f64 {
        RR / self.W()
    }
    /// model type as a nested layer name, e.g. `idealGas<specie>`
    fn type_name() -> String
    where
        Self: Sized;

    /// copy of this instance carrying another name
    fn clone_named(&self, name: &str) -> Self
    where
        Self: Clone,
    {
        let mut copy = self.clone();
        copy.set_name(name);
        copy
    }
}

/// Pressure-temperature-density relation of a species.
pub trait EquationOfState: SpecieProps {
    const INCOMPRESSIBLE: bool;
    const ISOCHORIC: bool;
    /// density, kg/m^3
    fn density(&self, p: f64, T: f64) -> f64;
    /// compressibility rho/p, s^2/m^2
    fn compressibility(&self, p: f64, T: f64) -> f64;
    /// compression factor, -
    fn compression_factor(&self, p: f64, T: f64) -> f64;
    /// cp - cv, J/(kmol·K)
    fn cp_minus_cv(&self, p: f64, T: f64) -> f64;
}

/// Caloric properties. Molar quantities are per kmol; `mass_*` variants are per kg.
#[allow(non_snake_case)]
pub trait ThermoModel: EquationOfState {
    fn T_low(&self) -> f64;
    fn T_high(&self) -> f64;
    /// clamp `T` into `[Tlow, Thigh]`, warning when it had to be moved
    fn limit(&self, T: f64) -> f64;
    /// heat capacity at constant pressure, J/(kmol·K)
    fn heat_capacity(&self, p: f64, T: f64) -> f64;
    /// absolute enthalpy, J/kmol
    fn absolute_enthalpy(&self, p: f64, T: f64) -> f64;
    /// chemical (formation) enthalpy, J/kmol
    fn chemical_enthalpy(&self) -> f64;
    /// entropy, J/(kmol·K)
    fn entropy(&self, p: f64, T: f64) -> f64;

    /// sensible enthalpy, J/kmol
    fn sensible_enthalpy(&self, p: f64, T: f64) -> f64 {
        self.absolute_enthalpy(p, T) - self.chemical_enthalpy()
    }
    /// heat capacity at constant volume, J/(kmol·K)
    fn heat_capacity_v(&self, p: f64, T: f64) -> f64 {
        self.heat_capacity(p, T) - self.cp_minus_cv(p, T)
    }
    /// ratio of specific heats
    fn gamma(&self, p: f64, T: f64) -> f64 {
        let cp = self.heat_capacity(p, T);
        cp / (cp - self.cp_minus_cv(p, T))
    }
    /// Cp, J/(kg·K)
    fn mass_heat_capacity(&self, p: f64, T: f64) -> f64 {
        self.heat_capacity(p, T) / self.W()
    }
    /// Cv, J/(kg·K)
    fn mass_heat_capacity_v(&self, p: f64, T: f64) -> f64 {
        self.heat_capacity_v(p, T) / self.W()
    }
    fn mass_absolute_enthalpy(&self, p: f64, T: f64) -> f64 {
        self.absolute_enthalpy(p, T) / self.W()
    }
    fn mass_sensible_enthalpy(&self, p: f64, T: f64) -> f64 {
        self.sensible_enthalpy(p, T) / self.W()
    }
    fn mass_entropy(&self, p: f64, T: f64) -> f64 {
        self.entropy(p, T) / self.W()
    }
}

/// Correlation-based transport properties.
pub trait TransportModel: ThermoModel {
    /// dynamic viscosity, kg/(m·s)
    fn viscosity(&self, p: f64, T: f64) -> f64;
    /// thermal conductivity, W/(m·K)
    fn thermal_conductivity(&self, p: f64, T: f64) -> f64;
    /// thermal diffusivity of enthalpy, kg/(m·s)
    fn thermal_diffusivity(&self, p: f64, T: f64) -> f64 {
        self.thermal_conductivity(p, T) / self.mass_heat_capacity(p, T)
    }
}

/// Mole-weighted mixing algebra shared by every layer.
///
/// Binary operations return new values; the in-place variants either replace
/// the receiver wholesale or leave it untouched on error. In-place results keep
/// the receiver's name, binary results are unnamed.
pub trait MixAlgebra: SpecieProps + Sized {
    /// `self + other`
    fn mix_add(&self, other: &Self) -> PropsResult<Self>;
    /// `self - other`
    fn mix_sub(&self, other: &Self) -> PropsResult<Self>;
    /// `f * self`: scales the mole count only
    fn scaled(&self, f: f64) -> Self;

    /// `self == other` in the mixing algebra: the delta `other - self`
    fn difference(&self, other: &Self) -> PropsResult<Self> {
        other.mix_sub(self)
    }

    fn mix_add_assign(&mut self, other: &Self) -> PropsResult<()> {
        let mut mixed = self.mix_add(other)?;
        mixed.set_name(self.name());
        *self = mixed;
        Ok(())
    }

    fn mix_sub_assign(&mut self, other: &Self) -> PropsResult<()> {
        let mut mixed = self.mix_sub(other)?;
        mixed.set_name(self.name());
        *self = mixed;
        Ok(())
    }

    fn scale_assign(&mut self, f: f64) {
        let mut scaled = self.scaled(f);
        scaled.set_name(self.name());
        *self = scaled;
    }
}

/// Construction from, and serialization into, the layered configuration record.
/// Each layer reads and writes its own group after delegating to the layer beneath.
pub trait RecordIO: Sized {
    fn from_record(name: &str, record: &SpecieRecord) -> PropsResult<Self>;
    fn write_record(&self, record: &mut SpecieRecord);

    fn to_record(&self) -> SpecieRecord {
        let mut record = SpecieRecord::default();
        self.write_record(&mut record);
        record
    }
}
