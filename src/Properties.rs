/// constants, error type and the traits shared by all property layers
pub mod props_api;
/// layered configuration records and their JSON form
pub mod SpecieRecord;
/// species constants: name, mole count, molecular weight
pub mod SpecieData;
/// ideal gas equation of state
pub mod EOSdata;
/// NASA 7-coefficient polynomial thermodynamics
pub mod NASAdata;
mod NASAdata_tests;
/// Sutherland viscosity and modified Eucken conductivity
pub mod TRANSPORTdata;
/// mixtures assembled from mole fractions
pub mod mixture;

pub use EOSdata::IdealGasEOS;
pub use NASAdata::NASAThermo;
pub use SpecieData::SpecieData as Specie;
pub use TRANSPORTdata::{GasProps, SutherlandTransport};
pub use mixture::mix_by_mole_fractions;
pub use props_api::{
    EquationOfState, MixAlgebra, OutOfRangeWarning, PropsError, PropsResult, RecordIO,
    SpecieProps, ThermoModel, TransportModel,
};
