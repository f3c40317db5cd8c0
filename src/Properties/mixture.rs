//! Mixture assembly from species and their mole fractions.
//!
//! ```rust, ignore
//! let air = mix_by_mole_fractions(&[(n2, 0.79), (o2, 0.21)])?;
//! ```
use super::props_api::{MixAlgebra, PropsError, PropsResult, SpecieProps, display_name};
use log::info;

/// `sum(x_i * model_i)` over all entries with non-zero fraction. The result is unnamed.
pub fn mix_by_mole_fractions<M: MixAlgebra>(components: &[(M, f64)]) -> PropsResult<M> {
    if components.is_empty() {
        return Err(PropsError::InvalidMixture("no components given".to_owned()));
    }
    if let Some((model, x)) = components
        .iter()
        .find(|(_, x)| !(x.is_finite() && *x >= 0.0))
    {
        return Err(PropsError::InvalidMixture(format!(
            "mole fraction of {} must be non-negative, got {}",
            display_name(model.name()),
            x
        )));
    }
    let total: f64 = components.iter().map(|(_, x)| x).sum();
    if total <= 0.0 {
        return Err(PropsError::InvalidMixture("mole fractions sum to zero".to_owned()));
    }
    if (total - 1.0).abs() > 1e-6 {
        info!("mole fractions sum to {}, mixture carries {} moles", total, total);
    }

    let mut parts = components
        .iter()
        .filter(|(_, x)| *x > 0.0)
        .map(|(model, x)| model.scaled(*x));
    // total > 0 guarantees at least one entry survives the filter
    let first = parts.next().ok_or_else(|| {
        PropsError::InvalidMixture("no component with positive fraction".to_owned())
    })?;
    let mut mixture = parts.try_fold(first, |acc, part| acc.mix_add(&part))?;
    mixture.set_name("");
    Ok(mixture)
}
