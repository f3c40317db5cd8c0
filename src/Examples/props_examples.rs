use crate::Properties::EOSdata::IdealGasEOS;
use crate::Properties::NASAdata::NASAThermo;
use crate::Properties::SpecieRecord::{self, CoeffArray, SpeciesDictionary};
use crate::Properties::TRANSPORTdata::{GasProps, SutherlandTransport};
use crate::Properties::mixture::mix_by_mole_fractions;
use crate::Properties::props_api::{
    EquationOfState, MixAlgebra, PropsResult, RecordIO, SpecieProps, ThermoModel,
    TransportModel,
};
use crate::Utils::load_from_file::{models_from_dictionary, save_species_to_file};
use log::{error, info};

const AIR_SPECIES: &str = r#"{
  "N2": {
    "specie": { "nMoles": 1.0, "molWeight": 28.0134 },
    "thermodynamics": {
      "Tlow": 200.0, "Thigh": 3500.0, "Tcommon": 1000.0,
      "highCpCoeffs": [2.92664, 1.4879768e-3, -5.68476e-7, 1.0097038e-10, -6.753351e-15, -922.7977, 5.980528],
      "lowCpCoeffs": [3.298677, 1.4082404e-3, -3.963222e-6, 5.641515e-9, -2.444854e-12, -1020.8999, 3.950372]
    },
    "transport": { "As": 1.407e-6, "Ts": 111.0 }
  },
  "O2": {
    "specie": { "nMoles": 1.0, "molWeight": 31.9988 },
    "thermodynamics": {
      "Tlow": 200.0, "Thigh": 3500.0, "Tcommon": 1000.0,
      "highCpCoeffs": [3.28253784, 1.48308754e-3, -7.57966669e-7, 2.09470555e-10, -2.16717794e-14, -1088.45772, 5.45323129],
      "lowCpCoeffs": [3.78245636, -2.99673416e-3, 9.84730201e-6, -9.68129509e-9, 3.24372837e-12, -1063.94356, 3.65767573]
    },
    "transport": { "As": 1.693e-6, "Ts": 127.0 }
  }
}"#;

fn air_components() -> PropsResult<Vec<GasProps>> {
    let dictionary = SpecieRecord::from_json(AIR_SPECIES)?;
    models_from_dictionary(&dictionary, &["N2".to_string(), "O2".to_string()])
}

pub fn props_examples(task: usize) {
    let result = match task {
        // single species from components
        0 => single_species(),
        // air from a species dictionary
        1 => air_mixture(),
        // Sutherland fit through two measured viscosities
        2 => two_point_fit(),
        // the difference between two states of a mixture
        3 => mixture_difference(),
        // records written to disk
        4 => save_dictionary(),
        _ => {
            println!("Invalid task number");
            Ok(())
        }
    };
    if let Err(e) = result {
        error!("example {} failed: {}", task, e);
    }
}

fn single_species() -> PropsResult<()> {
    let eos = IdealGasEOS::from_constants("N2", 1.0, 28.0134)?;
    let thermo = NASAThermo::new(
        eos,
        200.0,
        3500.0,
        1000.0,
        CoeffArray::from_column_slice(&[
            2.92664,
            1.4879768e-3,
            -5.68476e-7,
            1.0097038e-10,
            -6.753351e-15,
            -922.7977,
            5.980528,
        ]),
        CoeffArray::from_column_slice(&[
            3.298677,
            1.4082404e-3,
            -3.963222e-6,
            5.641515e-9,
            -2.444854e-12,
            -1020.8999,
            3.950372,
        ]),
    )?;
    let n2: GasProps = SutherlandTransport::new(thermo, 1.407e-6, 111.0)?;
    n2.pretty_print_data();
    let (p, t) = (101325.0, 300.0);
    println!("{}", GasProps::type_name());
    println!(
        "rho = {:.5} kg/m3, Cp = {:.3} J/(kg K), gamma = {:.4}",
        n2.density(p, t),
        n2.mass_heat_capacity(p, t),
        n2.gamma(p, t)
    );
    println!(
        "mu = {:.4e} Pa s, kappa = {:.4e} W/(m K), alphah = {:.4e} kg/(m s)",
        n2.viscosity(p, t),
        n2.thermal_conductivity(p, t),
        n2.thermal_diffusivity(p, t)
    );
    // clamped to Thigh with a warning
    println!("Cp(4000 K) = {:.3}", n2.heat_capacity(p, 4000.0));
    Ok(())
}

fn air_mixture() -> PropsResult<()> {
    let species = air_components()?;
    let fractions = [0.79, 0.21];
    let components: Vec<(GasProps, f64)> = species.into_iter().zip(fractions).collect();
    let air = mix_by_mole_fractions(&components)?.clone_named("air");
    info!("{}", air);
    air.properties_table(101325.0, &[300.0, 600.0, 1000.0, 1500.0, 2000.0])
        .printstd();
    Ok(())
}

fn two_point_fit() -> PropsResult<()> {
    let species = air_components()?;
    let o2 = &species[1];
    let fitted = SutherlandTransport::from_two_points(
        o2.thermo().clone(),
        2.07e-5,
        300.0,
        4.9e-5,
        1200.0,
    )?;
    println!(
        "fitted As = {:.4e}, Ts = {:.2}; tabulated As = {:.4e}, Ts = {:.2}",
        fitted.A_s(),
        fitted.T_s(),
        o2.A_s(),
        o2.T_s()
    );
    for t in [300.0, 800.0, 1200.0] {
        println!(
            "T = {} K: mu fitted {:.4e}, tabulated {:.4e}",
            t,
            fitted.viscosity(1e5, t),
            o2.viscosity(1e5, t)
        );
    }
    Ok(())
}

fn mixture_difference() -> PropsResult<()> {
    let species = air_components()?;
    let air = (&(0.79 * &species[0]) + &(0.21 * &species[1]))?;
    // enrich with one extra mole of oxygen
    let enriched = air.mix_add(&species[1])?;
    let delta = air.difference(&enriched)?;
    println!(
        "delta: nMoles = {:.3}, W = {:.4}, cp(500 K) = {:.3}",
        delta.n_moles(),
        delta.W(),
        delta.heat_capacity(1e5, 500.0)
    );
    let mut in_place = air.clone_named("air");
    in_place.mix_add_assign(&species[1])?;
    println!("{}", in_place);
    Ok(())
}

fn save_dictionary() -> PropsResult<()> {
    let species = air_components()?;
    let air = (&species[0] + &species[1])?.clone_named("air_1_1");
    let mut dictionary = SpeciesDictionary::new();
    for gas in species.iter().chain(std::iter::once(&air)) {
        dictionary.insert(gas.name().to_owned(), gas.to_record());
    }
    let file_name = std::env::temp_dir().join("thermostack_species.json");
    let file_name = file_name.to_string_lossy();
    save_species_to_file(&file_name, &dictionary)?;
    println!("{}", SpecieRecord::to_json(&dictionary)?);
    Ok(())
}
