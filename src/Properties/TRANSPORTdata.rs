//! # Sutherland transport
//!
//! ## Aim
//! Viscosity, thermal conductivity and thermal diffusivity of a gas from the Sutherland
//! correlation, layered over a thermodynamic model.
//!
//! ## Main Data Structures and Logic
//! - `SutherlandTransport<Th>`: wraps a `ThermoModel` and owns the coefficients `As`, `Ts`
//! - `mu = As sqrt(T) / (1 + Ts/T)`
//! - `kappa = mu Cv (1.32 + 1.77 R/Cv)` (modified Eucken), mass-based `Cv` and specific `R`
//! - `alphah = kappa / Cp`, mass-based `Cp`
//! - coefficients are given directly or fitted through two calibration points `(mu1, T1)`,
//!   `(mu2, T2)`
//!
//! ## Usage
//! ```rust, ignore
//! let n2: GasProps = SutherlandTransport::new(thermo, 1.407e-6, 111.0)?;
//! let mu = n2.viscosity(1e5, 300.0);
//! let kappa = n2.thermal_conductivity(1e5, 300.0);
//! ```
use super::EOSdata::IdealGasEOS;
use super::NASAdata::NASAThermo;
use super::SpecieRecord::{SpecieRecord, TransportDict};
use super::props_api::{
    EquationOfState, MixAlgebra, PropsError, PropsResult, RecordIO, SpecieProps, ThermoModel,
    TransportModel, display_name,
};
use log::debug;
use prettytable::{Table, row};
use std::ops::{Add, Mul, MulAssign, Sub};

/// full property stack of an ideal gas
pub type GasProps = SutherlandTransport<NASAThermo<IdealGasEOS>>;

/// Sutherland coefficients through two viscosity points
#[allow(non_snake_case)]
fn calc_coeffs(mu1: f64, T1: f64, mu2: f64, T2: f64) -> (f64, f64) {
    let rootT1 = T1.sqrt();
    let mu1rootT2 = mu1 * T2.sqrt();
    let mu2rootT1 = mu2 * rootT1;
    let Ts = (mu2rootT1 - mu1rootT2) / (mu1rootT2 / T1 - mu2rootT1 / T2);
    let As = mu1 * (1.0 + Ts / T1) / rootT1;
    (As, Ts)
}

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct SutherlandTransport<Th> {
    thermo: Th,
    As: f64,
    Ts: f64,
}

#[allow(non_snake_case)]
impl<Th: ThermoModel> SutherlandTransport<Th> {
    /// Any finite coefficients are accepted: mixing deltas may carry negative `As` or `Ts`.
    pub fn new(thermo: Th, As: f64, Ts: f64) -> PropsResult<Self> {
        if !(As.is_finite() && Ts.is_finite()) {
            return Err(PropsError::InvalidTransport {
                name: thermo.name().to_owned(),
                reason: format!("As and Ts must be finite, got As = {}, Ts = {}", As, Ts),
            });
        }
        Ok(Self { thermo, As, Ts })
    }

    /// Fit `As`, `Ts` so that the correlation passes through `(mu1, T1)` and `(mu2, T2)`.
    /// A fit giving `As <= 0` or `Ts < 0` is rejected as degenerate.
    pub fn from_two_points(thermo: Th, mu1: f64, T1: f64, mu2: f64, T2: f64) -> PropsResult<Self> {
        let (As, Ts) = calc_coeffs(mu1, T1, mu2, T2);
        debug!("Sutherland fit for '{}': As = {:e}, Ts = {}", thermo.name(), As, Ts);
        if !(As.is_finite() && As > 0.0 && Ts.is_finite() && Ts >= 0.0) {
            return Err(PropsError::InvalidTransport {
                name: thermo.name().to_owned(),
                reason: format!(
                    "degenerate calibration points ({}, {}) and ({}, {}): As = {}, Ts = {}",
                    mu1, T1, mu2, T2, As, Ts
                ),
            });
        }
        Self::new(thermo, As, Ts)
    }

    pub fn thermo(&self) -> &Th {
        &self.thermo
    }
    pub fn A_s(&self) -> f64 {
        self.As
    }
    pub fn T_s(&self) -> f64 {
        self.Ts
    }

    /// Table of the full property set at pressure `p` for each temperature in `temperatures`
    pub fn properties_table(&self, p: f64, temperatures: &[f64]) -> Table {
        let mut table = Table::new();
        table.add_row(row![
            "T, K",
            "rho, kg/m3",
            "Cp, J/(kg K)",
            "ha, J/kg",
            "s, J/(kg K)",
            "mu, Pa s",
            "kappa, W/(m K)"
        ]);
        for &t in temperatures {
            table.add_row(row![
                t,
                format!("{:.5}", self.density(p, t)),
                format!("{:.3}", self.mass_heat_capacity(p, t)),
                format!("{:.5e}", self.mass_absolute_enthalpy(p, t)),
                format!("{:.3}", self.mass_entropy(p, t)),
                format!("{:.5e}", self.viscosity(p, t)),
                format!("{:.5e}", self.thermal_conductivity(p, t))
            ]);
        }
        table
    }
}

impl<E: EquationOfState> SutherlandTransport<NASAThermo<E>> {
    pub fn pretty_print_data(&self) {
        self.thermo.pretty_print_data();
        let mut table = Table::new();
        table.add_row(row!["As", "Ts"]);
        table.add_row(row![format!("{:.6e}", self.As), self.Ts]);
        table.printstd();
    }
}

impl<Th: ThermoModel> SpecieProps for SutherlandTransport<Th> {
    fn name(&self) -> &str {
        self.thermo.name()
    }
    fn set_name(&mut self, name: &str) {
        self.thermo.set_name(name)
    }
    fn n_moles(&self) -> f64 {
        self.thermo.n_moles()
    }
    fn W(&self) -> f64 {
        self.thermo.W()
    }
    fn R(&self) -> f64 {
        self.thermo.R()
    }
    fn type_name() -> String {
        format!("sutherland<{}>", Th::type_name())
    }
}

#[allow(non_snake_case)]
impl<Th: ThermoModel> EquationOfState for SutherlandTransport<Th> {
    const INCOMPRESSIBLE: bool = Th::INCOMPRESSIBLE;
    const ISOCHORIC: bool = Th::ISOCHORIC;

    fn density(&self, p: f64, T: f64) -> f64 {
        self.thermo.density(p, T)
    }
    fn compressibility(&self, p: f64, T: f64) -> f64 {
        self.thermo.compressibility(p, T)
    }
    fn compression_factor(&self, p: f64, T: f64) -> f64 {
        self.thermo.compression_factor(p, T)
    }
    fn cp_minus_cv(&self, p: f64, T: f64) -> f64 {
        self.thermo.cp_minus_cv(p, T)
    }
}

#[allow(non_snake_case)]
impl<Th: ThermoModel> ThermoModel for SutherlandTransport<Th> {
    fn T_low(&self) -> f64 {
        self.thermo.T_low()
    }
    fn T_high(&self) -> f64 {
        self.thermo.T_high()
    }
    fn limit(&self, T: f64) -> f64 {
        self.thermo.limit(T)
    }
    fn heat_capacity(&self, p: f64, T: f64) -> f64 {
        self.thermo.heat_capacity(p, T)
    }
    fn absolute_enthalpy(&self, p: f64, T: f64) -> f64 {
        self.thermo.absolute_enthalpy(p, T)
    }
    fn chemical_enthalpy(&self) -> f64 {
        self.thermo.chemical_enthalpy()
    }
    fn entropy(&self, p: f64, T: f64) -> f64 {
        self.thermo.entropy(p, T)
    }
}

#[allow(non_snake_case)]
impl<Th: ThermoModel> TransportModel for SutherlandTransport<Th> {
    fn viscosity(&self, _p: f64, T: f64) -> f64 {
        self.As * T.sqrt() / (1.0 + self.Ts / T)
    }

    fn thermal_conductivity(&self, p: f64, T: f64) -> f64 {
        let Cv = self.mass_heat_capacity_v(p, T);
        self.viscosity(p, T) * Cv * (1.32 + 1.77 * self.R() / Cv)
    }
}

impl<Th: ThermoModel + MixAlgebra> MixAlgebra for SutherlandTransport<Th> {
    fn mix_add(&self, other: &Self) -> PropsResult<Self> {
        let thermo = self.thermo.mix_add(&other.thermo)?;
        let molr1 = self.n_moles() / thermo.n_moles();
        let molr2 = other.n_moles() / thermo.n_moles();
        Ok(Self {
            As: molr1 * self.As + molr2 * other.As,
            Ts: molr1 * self.Ts + molr2 * other.Ts,
            thermo,
        })
    }

    fn mix_sub(&self, other: &Self) -> PropsResult<Self> {
        let thermo = self.thermo.mix_sub(&other.thermo)?;
        let molr1 = self.n_moles() / thermo.n_moles();
        let molr2 = other.n_moles() / thermo.n_moles();
        Ok(Self {
            As: molr1 * self.As - molr2 * other.As,
            Ts: molr1 * self.Ts - molr2 * other.Ts,
            thermo,
        })
    }

    fn scaled(&self, f: f64) -> Self {
        Self {
            thermo: self.thermo.scaled(f),
            As: self.As,
            Ts: self.Ts,
        }
    }
}

impl<Th: ThermoModel + RecordIO> RecordIO for SutherlandTransport<Th> {
    fn from_record(name: &str, record: &SpecieRecord) -> PropsResult<Self> {
        let thermo = Th::from_record(name, record)?;
        match record.transport {
            Some(TransportDict::Sutherland { As, Ts }) => Self::new(thermo, As, Ts),
            Some(TransportDict::TwoPoint { mu1, T1, mu2, T2 }) => {
                Self::from_two_points(thermo, mu1, T1, mu2, T2)
            }
            None => Err(PropsError::MissingData {
                name: name.to_owned(),
                field: "transport",
            }),
        }
    }

    fn write_record(&self, record: &mut SpecieRecord) {
        self.thermo.write_record(record);
        record.transport = Some(TransportDict::Sutherland {
            As: self.As,
            Ts: self.Ts,
        });
    }
}

impl<Th: ThermoModel + MixAlgebra> Add<&SutherlandTransport<Th>> for &SutherlandTransport<Th> {
    type Output = PropsResult<SutherlandTransport<Th>>;
    fn add(self, other: &SutherlandTransport<Th>) -> Self::Output {
        self.mix_add(other)
    }
}

impl<Th: ThermoModel + MixAlgebra> Sub<&SutherlandTransport<Th>> for &SutherlandTransport<Th> {
    type Output = PropsResult<SutherlandTransport<Th>>;
    fn sub(self, other: &SutherlandTransport<Th>) -> Self::Output {
        self.mix_sub(other)
    }
}

impl<Th: ThermoModel + MixAlgebra> Mul<&SutherlandTransport<Th>> for f64 {
    type Output = SutherlandTransport<Th>;
    fn mul(self, transport: &SutherlandTransport<Th>) -> SutherlandTransport<Th> {
        transport.scaled(self)
    }
}

impl<Th: MulAssign<f64>> MulAssign<f64> for SutherlandTransport<Th> {
    fn mul_assign(&mut self, f: f64) {
        self.thermo *= f;
    }
}

impl<Th: ThermoModel> std::fmt::Display for SutherlandTransport<Th> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: W = {}, nMoles = {}, As = {:e}, Ts = {}",
            display_name(self.name()),
            self.W(),
            self.n_moles(),
            self.As,
            self.Ts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calc_coeffs_recovers_known_values() {
        let (As, Ts) = (1.458e-6, 110.4);
        let mu = |t: f64| As * t.sqrt() / (1.0 + Ts / t);
        let (as_fit, ts_fit) = calc_coeffs(mu(300.0), 300.0, mu(1000.0), 1000.0);
        assert_relative_eq!(as_fit, As, max_relative = 1e-10);
        assert_relative_eq!(ts_fit, Ts, max_relative = 1e-10);
    }

    #[test]
    fn test_calc_coeffs_degenerate_points() {
        let (As, Ts) = calc_coeffs(1.8e-5, 300.0, 1.8e-5, 300.0);
        assert!(!As.is_finite() || !Ts.is_finite());
    }
}
