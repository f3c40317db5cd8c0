//! # NASA polynomial thermodynamics
//!
//! ## Aim
//! Heat capacity, enthalpy and entropy from the 7-coefficient NASA format with two
//! temperature ranges split at `Tcommon`, layered over an equation of state.
//!
//! ## Main Data Structures and Logic
//! - `NASAThermo<E>`: wraps an equation of state `E` and owns `Tlow`, `Thigh`, `Tcommon`
//!   and the `lowCpCoeffs` / `highCpCoeffs` arrays
//! - coefficients a0..a4 describe cp/R as a quartic in T, a5 and a6 are the enthalpy
//!   and entropy integration constants
//! - `lowCpCoeffs` are used for `T < Tcommon`, `highCpCoeffs` otherwise
//!
//! ## Mixing
//! The wrapped equation of state is mixed first, giving the combined mole count. Each
//! operand then contributes with its mole fraction; the validity range becomes the
//! intersection of both ranges and `Tcommon` has to match exactly.
//!
//! ## Usage
//! ```rust, ignore
//! let eos = IdealGasEOS::from_constants("N2", 1.0, 28.0134)?;
//! let n2 = NASAThermo::new(eos, 200.0, 5000.0, 1000.0, high, low)?;
//! let cp = n2.heat_capacity(1e5, 300.0);
//! ```
use super::SpecieRecord::{CoeffArray, SpecieRecord, ThermoDict, coeffs_from_slice, coeffs_to_vec};
use super::props_api::{
    EquationOfState, MixAlgebra, OutOfRangeWarning, PropsError, PropsResult, RR, RecordIO,
    SpecieProps, ThermoModel, Tstd, display_name,
};
use log::{debug, warn};
use prettytable::{Table, row};
use std::ops::{Add, Mul, MulAssign, Sub};

/// cp/R polynomial
#[allow(non_snake_case)]
fn Cp(t: f64, a: &CoeffArray) -> f64 {
    (((a[4] * t + a[3]) * t + a[2]) * t + a[1]) * t + a[0]
}
/// h/R integral of the cp/R polynomial plus a5
fn dh(t: f64, a: &CoeffArray) -> f64 {
    ((((a[4] / 5.0 * t + a[3] / 4.0) * t + a[2] / 3.0) * t + a[1] / 2.0) * t + a[0]) * t + a[5]
}
/// s/R integral of cp/(R T) plus a6
fn ds(t: f64, a: &CoeffArray) -> f64 {
    (((a[4] / 4.0 * t + a[3] / 3.0) * t + a[2] / 2.0) * t + a[1]) * t + a[0] * t.ln() + a[6]
}

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct NASAThermo<E> {
    eos: E,
    Tlow: f64,
    Thigh: f64,
    Tcommon: f64,
    highCpCoeffs: CoeffArray,
    lowCpCoeffs: CoeffArray,
}

#[allow(non_snake_case)]
impl<E: EquationOfState> NASAThermo<E> {
    /// construct from components; the temperature range is validated immediately
    pub fn new(
        eos: E,
        Tlow: f64,
        Thigh: f64,
        Tcommon: f64,
        highCpCoeffs: CoeffArray,
        lowCpCoeffs: CoeffArray,
    ) -> PropsResult<Self> {
        let thermo = Self {
            eos,
            Tlow,
            Thigh,
            Tcommon,
            highCpCoeffs,
            lowCpCoeffs,
        };
        thermo.check_input_data()?;
        Ok(thermo)
    }

    fn check_input_data(&self) -> PropsResult<()> {
        let fail = |reason: String| {
            Err(PropsError::InvalidRange {
                name: self.eos.name().to_owned(),
                reason,
            })
        };
        // negated comparisons so that NaN bounds are rejected too
        if !(self.Tlow > 0.0) {
            return fail(format!("Tlow({}) <= 0", self.Tlow));
        }
        if !(self.Tlow < self.Thigh) {
            return fail(format!("Tlow({}) >= Thigh({})", self.Tlow, self.Thigh));
        }
        if !(self.Tcommon > self.Tlow) {
            return fail(format!("Tcommon({}) <= Tlow({})", self.Tcommon, self.Tlow));
        }
        if !(self.Tcommon <= self.Thigh) {
            return fail(format!("Tcommon({}) > Thigh({})", self.Tcommon, self.Thigh));
        }
        Ok(())
    }

    /// coefficient array valid at `T`
    fn coeffs(&self, T: f64) -> &CoeffArray {
        if T < self.Tcommon {
            &self.lowCpCoeffs
        } else {
            &self.highCpCoeffs
        }
    }

    /// `Ok(T)` inside `[Tlow, Thigh]`, otherwise the warning describing the clamp
    pub fn check_limit(&self, T: f64) -> Result<f64, OutOfRangeWarning> {
        if T < self.Tlow || T > self.Thigh {
            Err(OutOfRangeWarning {
                T,
                Tlow: self.Tlow,
                Thigh: self.Thigh,
            })
        } else {
            Ok(T)
        }
    }

    pub fn eos(&self) -> &E {
        &self.eos
    }
    pub fn T_common(&self) -> f64 {
        self.Tcommon
    }
    pub fn high_cp_coeffs(&self) -> &CoeffArray {
        &self.highCpCoeffs
    }
    pub fn low_cp_coeffs(&self) -> &CoeffArray {
        &self.lowCpCoeffs
    }

    /// Mixed eos plus the mole fractions of both operands, with the `Tcommon` check done
    /// before anything is blended.
    fn mix_with(&self, other: &Self, eos: PropsResult<E>) -> PropsResult<(E, f64, f64, f64, f64)> {
        if self.Tcommon != other.Tcommon {
            return Err(PropsError::incompatible(
                self.name(),
                other.name(),
                format!("Tcommon {} != {}", self.Tcommon, other.Tcommon),
            ));
        }
        let Tlow = self.Tlow.max(other.Tlow);
        let Thigh = self.Thigh.min(other.Thigh);
        // Tlow_i < Tcommon <= Thigh_i holds for both operands
        debug_assert!(Tlow < self.Tcommon && self.Tcommon <= Thigh);
        let eos = eos?;
        let molr1 = self.n_moles() / eos.n_moles();
        let molr2 = other.n_moles() / eos.n_moles();
        debug!(
            "mixing {} and {}: mole fractions {} / {}",
            display_name(self.name()),
            display_name(other.name()),
            molr1,
            molr2
        );
        Ok((eos, molr1, molr2, Tlow, Thigh))
    }

    /// closures T -> (cp, ha, s) at fixed pressure
    #[allow(clippy::type_complexity)]
    pub fn create_closures_Cp_dH_dS(
        &self,
        p: f64,
    ) -> (
        Box<dyn Fn(f64) -> f64>,
        Box<dyn Fn(f64) -> f64>,
        Box<dyn Fn(f64) -> f64>,
    )
    where
        E: Clone + 'static,
    {
        let (cp, ha, s) = (self.clone(), self.clone(), self.clone());
        (
            Box::new(move |t: f64| cp.heat_capacity(p, t)),
            Box::new(move |t: f64| ha.absolute_enthalpy(p, t)),
            Box::new(move |t: f64| s.entropy(p, t)),
        )
    }

    /// temperature bounds and both coefficient arrays as a table
    pub fn coeffs_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Tlow", "Thigh", "Tcommon"]);
        table.add_row(row![self.Tlow, self.Thigh, self.Tcommon]);
        table.add_row(row!["range", "a0", "a1", "a2", "a3", "a4", "a5", "a6"]);
        for (range, a) in [("low", &self.lowCpCoeffs), ("high", &self.highCpCoeffs)] {
            table.add_row(row![
                range,
                format!("{:.6e}", a[0]),
                format!("{:.6e}", a[1]),
                format!("{:.6e}", a[2]),
                format!("{:.6e}", a[3]),
                format!("{:.6e}", a[4]),
                format!("{:.6e}", a[5]),
                format!("{:.6e}", a[6])
            ]);
        }
        table
    }

    pub fn pretty_print_data(&self) {
        println!("\n=== {} ({}) ===", display_name(self.name()), Self::type_name());
        println!("molWeight: {} kg/kmol, nMoles: {}", self.W(), self.n_moles());
        self.coeffs_table().printstd();
    }
}

impl<E: EquationOfState> SpecieProps for NASAThermo<E> {
    fn name(&self) -> &str {
        self.eos.name()
    }
    fn set_name(&mut self, name: &str) {
        self.eos.set_name(name)
    }
    fn n_moles(&self) -> f64 {
        self.eos.n_moles()
    }
    fn W(&self) -> f64 {
        self.eos.W()
    }
    fn R(&self) -> f64 {
        self.eos.R()
    }
    fn type_name() -> String {
        format!("nasaPolynomial<{}>", E::type_name())
    }
}

#[allow(non_snake_case)]
impl<E: EquationOfState> EquationOfState for NASAThermo<E> {
    const INCOMPRESSIBLE: bool = E::INCOMPRESSIBLE;
    const ISOCHORIC: bool = E::ISOCHORIC;

    fn density(&self, p: f64, T: f64) -> f64 {
        self.eos.density(p, T)
    }
    fn compressibility(&self, p: f64, T: f64) -> f64 {
        self.eos.compressibility(p, T)
    }
    fn compression_factor(&self, p: f64, T: f64) -> f64 {
        self.eos.compression_factor(p, T)
    }
    fn cp_minus_cv(&self, p: f64, T: f64) -> f64 {
        self.eos.cp_minus_cv(p, T)
    }
}

#[allow(non_snake_case)]
impl<E: EquationOfState> ThermoModel for NASAThermo<E> {
    fn T_low(&self) -> f64 {
        self.Tlow
    }
    fn T_high(&self) -> f64 {
        self.Thigh
    }

    fn limit(&self, T: f64) -> f64 {
        match self.check_limit(T) {
            Ok(T) => T,
            Err(warning) => {
                warn!("{}: {}", display_name(self.name()), warning);
                warning.clamped()
            }
        }
    }

    fn heat_capacity(&self, _p: f64, T: f64) -> f64 {
        let T = self.limit(T);
        RR * Cp(T, self.coeffs(T))
    }

    fn absolute_enthalpy(&self, _p: f64, T: f64) -> f64 {
        let T = self.limit(T);
        RR * dh(T, self.coeffs(T))
    }

    fn chemical_enthalpy(&self) -> f64 {
        RR * dh(Tstd, &self.lowCpCoeffs)
    }

    fn entropy(&self, _p: f64, T: f64) -> f64 {
        let T = self.limit(T);
        RR * ds(T, self.coeffs(T))
    }
}

#[allow(non_snake_case)]
impl<E: EquationOfState + MixAlgebra> MixAlgebra for NASAThermo<E> {
    fn mix_add(&self, other: &Self) -> PropsResult<Self> {
        let (eos, molr1, molr2, Tlow, Thigh) =
            self.mix_with(other, self.eos.mix_add(&other.eos))?;
        Ok(Self {
            eos,
            Tlow,
            Thigh,
            Tcommon: self.Tcommon,
            highCpCoeffs: molr1 * self.highCpCoeffs + molr2 * other.highCpCoeffs,
            lowCpCoeffs: molr1 * self.lowCpCoeffs + molr2 * other.lowCpCoeffs,
        })
    }

    fn mix_sub(&self, other: &Self) -> PropsResult<Self> {
        let (eos, molr1, molr2, Tlow, Thigh) =
            self.mix_with(other, self.eos.mix_sub(&other.eos))?;
        Ok(Self {
            eos,
            Tlow,
            Thigh,
            Tcommon: self.Tcommon,
            highCpCoeffs: molr1 * self.highCpCoeffs - molr2 * other.highCpCoeffs,
            lowCpCoeffs: molr1 * self.lowCpCoeffs - molr2 * other.lowCpCoeffs,
        })
    }

    fn scaled(&self, f: f64) -> Self {
        Self {
            eos: self.eos.scaled(f),
            Tlow: self.Tlow,
            Thigh: self.Thigh,
            Tcommon: self.Tcommon,
            highCpCoeffs: self.highCpCoeffs,
            lowCpCoeffs: self.lowCpCoeffs,
        }
    }
}

impl<E: EquationOfState + RecordIO> RecordIO for NASAThermo<E> {
    fn from_record(name: &str, record: &SpecieRecord) -> PropsResult<Self> {
        let eos = E::from_record(name, record)?;
        let dict = record
            .thermodynamics
            .as_ref()
            .ok_or_else(|| PropsError::MissingData {
                name: name.to_owned(),
                field: "thermodynamics",
            })?;
        let high = coeffs_from_slice(name, "highCpCoeffs", &dict.highCpCoeffs)?;
        let low = coeffs_from_slice(name, "lowCpCoeffs", &dict.lowCpCoeffs)?;
        let thermo = Self::new(eos, dict.Tlow, dict.Thigh, dict.Tcommon, high, low)?;
        debug!(
            "NASA thermo for '{}': {} -> {} K, Tcommon {} K",
            name, dict.Tlow, dict.Thigh, dict.Tcommon
        );
        Ok(thermo)
    }

    fn write_record(&self, record: &mut SpecieRecord) {
        self.eos.write_record(record);
        record.thermodynamics = Some(ThermoDict {
            Tlow: self.Tlow,
            Thigh: self.Thigh,
            Tcommon: self.Tcommon,
            highCpCoeffs: coeffs_to_vec(&self.highCpCoeffs),
            lowCpCoeffs: coeffs_to_vec(&self.lowCpCoeffs),
        });
    }
}

impl<E: EquationOfState + MixAlgebra> Add<&NASAThermo<E>> for &NASAThermo<E> {
    type Output = PropsResult<NASAThermo<E>>;
    fn add(self, other: &NASAThermo<E>) -> Self::Output {
        self.mix_add(other)
    }
}

impl<E: EquationOfState + MixAlgebra> Sub<&NASAThermo<E>> for &NASAThermo<E> {
    type Output = PropsResult<NASAThermo<E>>;
    fn sub(self, other: &NASAThermo<E>) -> Self::Output {
        self.mix_sub(other)
    }
}

impl<E: EquationOfState + MixAlgebra> Mul<&NASAThermo<E>> for f64 {
    type Output = NASAThermo<E>;
    fn mul(self, thermo: &NASAThermo<E>) -> NASAThermo<E> {
        thermo.scaled(self)
    }
}

impl<E: MulAssign<f64>> MulAssign<f64> for NASAThermo<E> {
    fn mul_assign(&mut self, f: f64) {
        self.eos *= f;
    }
}
