///////////////////////////TESTING////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::Properties::EOSdata::IdealGasEOS;
    use crate::Properties::NASAdata::NASAThermo;
    use crate::Properties::SpecieRecord::{self, CoeffArray, SpeciesDictionary};
    use crate::Properties::props_api::{
        EquationOfState, MixAlgebra, PropsError, RR, RecordIO, SpecieProps, ThermoModel, Tstd,
    };
    use approx::assert_relative_eq;

    const N2_HIGH: [f64; 7] = [
        0.02926640e+02,
        0.14879768e-02,
        -0.05684760e-05,
        0.10097038e-09,
        -0.06753351e-13,
        -0.09227977e+04,
        0.05980528e+02,
    ];
    const N2_LOW: [f64; 7] = [
        0.03298677e+02,
        0.14082404e-02,
        -0.03963222e-04,
        0.05641515e-07,
        -0.02444854e-10,
        -0.10208999e+04,
        0.03950372e+02,
    ];
    const O2_HIGH: [f64; 7] = [
        3.28253784e+00,
        1.48308754e-03,
        -7.57966669e-07,
        2.09470555e-10,
        -2.16717794e-14,
        -1.08845772e+03,
        5.45323129e+00,
    ];
    const O2_LOW: [f64; 7] = [
        3.78245636e+00,
        -2.99673416e-03,
        9.84730201e-06,
        -9.68129509e-09,
        3.24372837e-12,
        -1.06394356e+03,
        3.65767573e+00,
    ];

    type Thermo = NASAThermo<IdealGasEOS>;

    fn coeffs(c: &[f64; 7]) -> CoeffArray {
        CoeffArray::from_column_slice(c)
    }

    #[allow(non_snake_case)]
    fn build(
        name: &str,
        n: f64,
        W: f64,
        (Tlow, Thigh, Tcommon): (f64, f64, f64),
        high: &[f64; 7],
        low: &[f64; 7],
    ) -> Result<Thermo, PropsError> {
        let eos = IdealGasEOS::from_constants(name, n, W)?;
        NASAThermo::new(eos, Tlow, Thigh, Tcommon, coeffs(high), coeffs(low))
    }

    fn n2() -> Thermo {
        build("N2", 1.0, 28.0134, (200.0, 5000.0, 1000.0), &N2_HIGH, &N2_LOW).unwrap()
    }

    fn o2() -> Thermo {
        build("O2", 1.0, 31.9988, (200.0, 3500.0, 1000.0), &O2_HIGH, &O2_LOW).unwrap()
    }

    #[test]
    fn test_absolute_enthalpy_against_hand_integration() {
        let air = build("air", 1.0, 28.96, (200.0, 2000.0, 1000.0), &N2_HIGH, &N2_LOW).unwrap();
        let t: f64 = 298.15;
        let a = N2_LOW;
        let expected = RR
            * (a[0] * t
                + a[1] * t.powi(2) / 2.0
                + a[2] * t.powi(3) / 3.0
                + a[3] * t.powi(4) / 4.0
                + a[4] * t.powi(5) / 5.0
                + a[5]);
        assert_relative_eq!(
            air.absolute_enthalpy(101325.0, t),
            expected,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_heat_capacity_and_entropy_values() {
        let n2 = n2();
        let t: f64 = 300.0;
        let a = N2_LOW;
        let cp = RR * (a[0] + a[1] * t + a[2] * t.powi(2) + a[3] * t.powi(3) + a[4] * t.powi(4));
        assert_relative_eq!(n2.heat_capacity(1e5, t), cp, max_relative = 1e-12);
        // about 29.1 kJ/(kmol K) for nitrogen at room temperature
        assert_relative_eq!(n2.heat_capacity(1e5, t), 29.1e3, max_relative = 5e-3);
        let s = RR
            * (a[0] * t.ln()
                + a[1] * t
                + a[2] * t.powi(2) / 2.0
                + a[3] * t.powi(3) / 3.0
                + a[4] * t.powi(4) / 4.0
                + a[6]);
        assert_relative_eq!(n2.entropy(1e5, t), s, max_relative = 1e-12);
        // standard entropy of N2 is 191.6 kJ/(kmol K)
        assert_relative_eq!(n2.entropy(1e5, Tstd), 191.6e3, max_relative = 5e-3);
    }

    #[test]
    fn test_coefficient_selection_at_tcommon() {
        let n2 = n2();
        let below = 999.999;
        let h = N2_HIGH;
        let l = N2_LOW;
        let cp_low = RR * ((((l[4] * below + l[3]) * below + l[2]) * below + l[1]) * below + l[0]);
        assert_relative_eq!(n2.heat_capacity(1e5, below), cp_low, max_relative = 1e-12);
        let t = 1000.0;
        let cp_high = RR * ((((h[4] * t + h[3]) * t + h[2]) * t + h[1]) * t + h[0]);
        assert_relative_eq!(n2.heat_capacity(1e5, t), cp_high, max_relative = 1e-12);
    }

    #[test]
    fn test_sensible_and_chemical_enthalpy() {
        let n2 = n2();
        let hc = n2.chemical_enthalpy();
        assert_relative_eq!(hc, n2.absolute_enthalpy(1e5, Tstd), max_relative = 1e-12);
        assert_relative_eq!(
            n2.sensible_enthalpy(1e5, 600.0),
            n2.absolute_enthalpy(1e5, 600.0) - hc,
            max_relative = 1e-12
        );
        assert!(n2.sensible_enthalpy(1e5, Tstd).abs() < 1e-6);
        // formation enthalpy of N2 is zero, up to the fit error
        assert!(hc.abs() < 1e4);
    }

    #[test]
    fn test_derived_properties() {
        let n2 = n2();
        let (p, t) = (1e5, 300.0);
        assert_relative_eq!(n2.gamma(p, t), 1.4, epsilon = 1e-2);
        assert_relative_eq!(
            n2.heat_capacity_v(p, t),
            n2.heat_capacity(p, t) - RR,
            max_relative = 1e-12
        );
        assert_relative_eq!(n2.mass_heat_capacity(p, t), 1040.0, max_relative = 5e-3);
        assert_relative_eq!(
            n2.mass_heat_capacity(p, t) - n2.mass_heat_capacity_v(p, t),
            n2.R(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            n2.mass_entropy(p, t),
            n2.entropy(p, t) / 28.0134,
            max_relative = 1e-12
        );
        // equation of state is forwarded
        assert_eq!(n2.density(p, t), n2.eos().density(p, t));
        assert!(!Thermo::INCOMPRESSIBLE);
    }

    #[test]
    fn test_construction_rejects_bad_ranges() {
        let cases = [
            (200.0, 5000.0, 200.0),  // Tcommon == Tlow
            (200.0, 5000.0, 150.0),  // Tcommon < Tlow
            (5000.0, 5000.0, 1000.0), // Tlow == Thigh
            (6000.0, 5000.0, 1000.0), // Tlow > Thigh
            (200.0, 900.0, 1000.0),  // Tcommon > Thigh
            (0.0, 5000.0, 1000.0),   // Tlow == 0
            (f64::NAN, 5000.0, 1000.0),
        ];
        for range in cases {
            let err = build("bad", 1.0, 28.0, range, &N2_HIGH, &N2_LOW).unwrap_err();
            assert!(
                matches!(err, PropsError::InvalidRange { .. }),
                "{:?} accepted",
                range
            );
            assert!(err.is_construction_error());
        }
        // Tcommon == Thigh is allowed
        assert!(build("ok", 1.0, 28.0, (200.0, 1000.0, 1000.0), &N2_HIGH, &N2_LOW).is_ok());
    }

    #[test]
    fn test_clamp_out_of_range_temperature() {
        let o2 = o2();
        let thigh = o2.T_high();
        assert_eq!(
            o2.heat_capacity(1e5, thigh + 50.0),
            o2.heat_capacity(1e5, thigh)
        );
        assert_eq!(o2.entropy(1e5, 100.0), o2.entropy(1e5, o2.T_low()));
        let warning = o2.check_limit(thigh + 50.0).unwrap_err();
        assert_eq!(warning.T, thigh + 50.0);
        assert_eq!(warning.clamped(), thigh);
        assert!(warning.to_string().contains("out of temperature range"));
        assert_eq!(o2.check_limit(500.0), Ok(500.0));
        assert_eq!(o2.limit(50.0), 200.0);
        assert_eq!(o2.limit(500.0), 500.0);
    }

    #[test]
    fn test_self_mix_keeps_coefficients() {
        let n2 = n2();
        let doubled = (&n2 + &n2).unwrap();
        assert_eq!(doubled.low_cp_coeffs(), n2.low_cp_coeffs());
        assert_eq!(doubled.high_cp_coeffs(), n2.high_cp_coeffs());
        assert_eq!(doubled.T_low(), n2.T_low());
        assert_eq!(doubled.T_high(), n2.T_high());
        assert_eq!(doubled.n_moles(), 2.0);
        assert_eq!(doubled, 2.0 * &n2);
        assert_relative_eq!(
            doubled.heat_capacity(1e5, 700.0),
            n2.heat_capacity(1e5, 700.0),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_mole_weighted_blend() {
        let air = (&(0.79 * &n2()) + &(0.21 * &o2())).unwrap();
        assert_relative_eq!(air.n_moles(), 1.0, epsilon = 1e-14);
        for i in 0..7 {
            assert_relative_eq!(
                air.low_cp_coeffs()[i],
                0.79 * N2_LOW[i] + 0.21 * O2_LOW[i],
                max_relative = 1e-12
            );
        }
        for t in [300.0, 800.0, 1500.0] {
            assert_relative_eq!(
                air.heat_capacity(1e5, t),
                0.79 * n2().heat_capacity(1e5, t) + 0.21 * o2().heat_capacity(1e5, t),
                max_relative = 1e-12
            );
        }
        // validity range is the intersection
        assert_eq!(air.T_high(), 3500.0);
        assert_eq!(air.name(), "");
    }

    #[test]
    fn test_range_intersection() {
        let a = build("a", 1.0, 28.0, (300.0, 1000.0, 600.0), &N2_HIGH, &N2_LOW).unwrap();
        let b = build("b", 1.0, 32.0, (250.0, 900.0, 600.0), &O2_HIGH, &O2_LOW).unwrap();
        let ab = (&a + &b).unwrap();
        assert_eq!((ab.T_low(), ab.T_high()), (300.0, 900.0));
        let ba = (&b - &a).unwrap();
        assert_eq!((ba.T_low(), ba.T_high()), (300.0, 900.0));
    }

    #[test]
    fn test_tcommon_mismatch_is_rejected() {
        let a = build("a", 1.0, 28.0, (200.0, 3000.0, 1000.0), &N2_HIGH, &N2_LOW).unwrap();
        let b = build("b", 1.0, 32.0, (200.0, 3000.0, 1200.0), &O2_HIGH, &O2_LOW).unwrap();
        let err = (&a + &b).unwrap_err();
        assert!(matches!(err, PropsError::IncompatibleMix { .. }));
        let message = err.to_string();
        assert!(message.contains("a") && message.contains("b") && message.contains("1200"));
        assert!(matches!(
            (&a - &b).unwrap_err(),
            PropsError::IncompatibleMix { .. }
        ));

        let mut receiver = a.clone();
        assert!(receiver.mix_add_assign(&b).is_err());
        assert_eq!(receiver, a);
        assert!(receiver.mix_sub_assign(&b).is_err());
        assert_eq!(receiver, a);
    }

    #[test]
    fn test_unnamed_operand_reported_as_others() {
        let mix = (&n2() + &n2()).unwrap();
        let other = build("Ar", 1.0, 39.95, (200.0, 3000.0, 1200.0), &N2_HIGH, &N2_LOW).unwrap();
        match mix.mix_add(&other).unwrap_err() {
            PropsError::IncompatibleMix { first, second, .. } => {
                assert_eq!(first, "others");
                assert_eq!(second, "Ar");
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn test_shared_tcommon_stays_inside_combined_range() {
        let a = build("a", 1.0, 28.0, (200.0, 600.0, 500.0), &N2_HIGH, &N2_LOW).unwrap();
        let b = build("b", 2.0, 32.0, (450.0, 3000.0, 500.0), &O2_HIGH, &O2_LOW).unwrap();
        let ab = (&a + &b).unwrap();
        assert_eq!((ab.T_low(), ab.T_high(), ab.T_common()), (450.0, 600.0, 500.0));
        assert!(ab.check_limit(500.0).is_ok());
        assert!(ab.check_limit(700.0).is_err());
        // matching Tcommon but narrower range on the other side
        let c = build("c", 1.0, 32.0, (100.0, 500.0, 500.0), &O2_HIGH, &O2_LOW).unwrap();
        let ac = (&a - &c).unwrap();
        assert_eq!((ac.T_low(), ac.T_high()), (200.0, 500.0));
    }

    #[test]
    fn test_difference_convention() {
        let a = build("a", 1.0, 28.0134, (200.0, 3500.0, 1000.0), &N2_HIGH, &N2_LOW).unwrap();
        let b = build("b", 3.0, 31.9988, (200.0, 3500.0, 1000.0), &O2_HIGH, &O2_LOW).unwrap();
        let delta = a.difference(&b).unwrap();
        let expected = (&b - &a).unwrap();
        assert_eq!(delta, expected);
        for t in [300.0, 1200.0] {
            assert_eq!(delta.heat_capacity(1e5, t), expected.heat_capacity(1e5, t));
            assert_eq!(delta.entropy(1e5, t), expected.entropy(1e5, t));
        }
        // x1 = 3/2, x2 = 1/2 against the combined 2 moles
        assert_relative_eq!(delta.n_moles(), 2.0);
        assert_relative_eq!(
            delta.low_cp_coeffs()[0],
            1.5 * O2_LOW[0] - 0.5 * N2_LOW[0],
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_scaling_passes_through_to_eos() {
        let mut n2 = n2();
        let tripled = 3.0 * &n2;
        assert_eq!(tripled.n_moles(), 3.0);
        assert_eq!(tripled.low_cp_coeffs(), n2.low_cp_coeffs());
        assert_eq!(tripled.T_common(), n2.T_common());
        n2 *= 2.0;
        assert_eq!(n2.n_moles(), 2.0);
        assert_eq!(n2.name(), "N2");
    }

    #[test]
    fn test_record_roundtrip() {
        let o2 = o2();
        let mut dict = SpeciesDictionary::new();
        dict.insert("O2".to_owned(), o2.to_record());
        let text = SpecieRecord::to_json(&dict).unwrap();
        let parsed = SpecieRecord::from_json(&text).unwrap();
        let back = Thermo::from_record("O2", parsed.get("O2").unwrap()).unwrap();
        assert_eq!(back, o2);
        for t in [250.0, 999.0, 1000.0, 3000.0] {
            assert_eq!(back.heat_capacity(1e5, t), o2.heat_capacity(1e5, t));
            assert_eq!(back.absolute_enthalpy(1e5, t), o2.absolute_enthalpy(1e5, t));
        }
    }

    #[test]
    fn test_record_errors() {
        let mut record = o2().to_record();
        record.thermodynamics.as_mut().unwrap().lowCpCoeffs.pop();
        assert!(matches!(
            Thermo::from_record("O2", &record).unwrap_err(),
            PropsError::InvalidCoefficients {
                field: "lowCpCoeffs",
                found: 6,
                ..
            }
        ));
        record.thermodynamics = None;
        assert!(matches!(
            Thermo::from_record("O2", &record).unwrap_err(),
            PropsError::MissingData {
                field: "thermodynamics",
                ..
            }
        ));
        let mut record = o2().to_record();
        record.thermodynamics.as_mut().unwrap().Tcommon = 100.0;
        assert!(
            Thermo::from_record("O2", &record)
                .unwrap_err()
                .is_construction_error()
        );
    }

    #[test]
    fn test_closures_match_evaluators() {
        let n2 = n2();
        let (cp, ha, s) = n2.create_closures_Cp_dH_dS(1e5);
        for t in [300.0, 1500.0] {
            assert_eq!(cp(t), n2.heat_capacity(1e5, t));
            assert_eq!(ha(t), n2.absolute_enthalpy(1e5, t));
            assert_eq!(s(t), n2.entropy(1e5, t));
        }
    }

    #[test]
    fn test_coeffs_table_and_names() {
        let n2 = n2();
        assert_eq!(n2.coeffs_table().len(), 5);
        assert_eq!(Thermo::type_name(), "nasaPolynomial<idealGas<specie>>");
        let copy = n2.clone_named("nitrogen");
        assert_eq!(copy.name(), "nitrogen");
        assert_eq!(copy.low_cp_coeffs(), n2.low_cp_coeffs());
    }
}
