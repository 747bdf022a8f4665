//! Unit tests for td-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeAddr, SubnetId};

    #[test]
    fn index_roundtrip() {
        let id = SubnetId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(SubnetId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn flat_index_is_row_major() {
        assert_eq!(NodeAddr::new(0, 3).flat_index(5), 3);
        assert_eq!(NodeAddr::new(2, 1).flat_index(5), 11);
    }

    #[test]
    fn ordering_is_subnet_then_local() {
        assert!(NodeAddr::new(0, 9) < NodeAddr::new(1, 0));
        assert!(NodeAddr::new(1, 0) < NodeAddr::new(1, 1));
    }

    #[test]
    fn display() {
        assert_eq!(SubnetId(7).to_string(), "SubnetId(7)");
        assert_eq!(NodeAddr::new(3, 4).to_string(), "(3, 4)");
    }
}

#[cfg(test)]
mod params {
    use crate::{ParameterSetting, TdError};

    #[test]
    fn valid_setting_passes() {
        assert!(ParameterSetting::new(5, 5, 0.05, 0.05, 0.1).validate().is_ok());
        assert!(ParameterSetting::new(1, 0, 0.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn zero_subnet_size_rejected() {
        let err = ParameterSetting::new(0, 5, 0.01, 0.02, 0.03).validate().unwrap_err();
        assert!(matches!(err, TdError::InvalidParameter { name: "s", .. }));
    }

    #[test]
    fn probability_of_one_rejected() {
        let err = ParameterSetting::new(5, 5, 0.01, 1.0, 0.03).validate().unwrap_err();
        assert!(matches!(err, TdError::InvalidParameter { name: "beta_w", .. }));
    }

    #[test]
    fn negative_and_nan_probabilities_rejected() {
        assert!(ParameterSetting::new(5, 5, -0.1, 0.02, 0.03).validate().is_err());
        assert!(ParameterSetting::new(5, 5, 0.01, 0.02, f64::NAN).validate().is_err());
    }

    #[test]
    fn ordering_check() {
        assert!(ParameterSetting::new(5, 5, 0.001, 0.01, 0.05).is_ordered());
        assert!(!ParameterSetting::new(5, 5, 0.05, 0.05, 0.1).is_ordered());
    }
}

#[cfg(test)]
mod grid {
    use crate::{Levels, ParameterGrid, TdError};

    #[test]
    fn linear_levels_include_both_ends() {
        let v = Levels::linear(0.01, 0.07, 3).values("beta_s").unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v[0], 0.01);
        assert!((v[1] - 0.04).abs() < 1e-12);
        assert_eq!(v[2], 0.07);
    }

    #[test]
    fn single_level_is_min() {
        assert_eq!(Levels::linear(3.0, 9.0, 1).values("x").unwrap(), vec![3.0]);
    }

    #[test]
    fn integer_levels_round() {
        assert_eq!(Levels::linear(5.0, 29.0, 3).integer_values("s").unwrap(), vec![5, 17, 29]);
        assert_eq!(Levels::linear(5.0, 10.0, 3).integer_values("s").unwrap(), vec![5, 8, 10]);
    }

    #[test]
    fn negative_integer_level_rejected() {
        let err = Levels::Explicit(vec![-2.0]).integer_values("w").unwrap_err();
        assert!(matches!(err, TdError::InvalidParameter { name: "w", .. }));
    }

    #[test]
    fn empty_levels_rejected() {
        assert!(Levels::Explicit(vec![]).values("alpha").is_err());
        assert!(Levels::linear(0.0, 1.0, 0).values("alpha").is_err());
    }

    #[test]
    fn default_grid_has_243_settings() {
        let grid = ParameterGrid::default();
        assert_eq!(grid.len(), 243);
        let settings = grid.settings().unwrap();
        assert_eq!(settings.len(), 243);
        // s outermost, beta_s innermost.
        assert_eq!(settings[0].s, 5);
        assert_eq!(settings[0].beta_s, 0.01);
        assert!((settings[1].beta_s - 0.04).abs() < 1e-12);
        assert_eq!(settings[242].s, 29);
        assert_eq!(settings[242].w, 29);
    }

    #[test]
    fn invalid_probability_level_rejects_whole_grid() {
        let grid = ParameterGrid {
            beta_s: Levels::Explicit(vec![0.05, 1.5]),
            ..ParameterGrid::default()
        };
        assert!(grid.settings().is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{FailurePolicy, SweepConfig};

    #[test]
    fn defaults() {
        let cfg = SweepConfig::default();
        assert_eq!(cfg.n_nodes, 3_000);
        assert_eq!(cfg.convergence_fraction, 0.95);
        assert_eq!(cfg.failure_policy, FailurePolicy::SkipSetting);
        assert!(cfg.validate().is_ok());
        assert!(cfg.wall_clock_budget().is_none());
    }

    #[test]
    fn bad_fraction_rejected() {
        let cfg = SweepConfig { convergence_fraction: 0.0, ..SweepConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SweepConfig { convergence_fraction: 1.01, ..SweepConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_max_steps_rejected() {
        let cfg = SweepConfig { max_steps: 0, ..SweepConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::RunRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = RunRng::new(12345);
        let mut r2 = RunRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn different_runs_differ() {
        let mut r0 = RunRng::for_run(1, 0);
        let mut r1 = RunRng::for_run(1, 1);
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent runs should diverge");
    }

    #[test]
    fn for_run_matches_mixed_seed() {
        let mut a = RunRng::for_run(7, 3);
        let mut b = RunRng::new(RunRng::mix(7, 3));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn unit_in_bounds() {
        let mut rng = RunRng::new(0);
        for _ in 0..1000 {
            let v = rng.unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = RunRng::new(9);
        let mut v: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }
}
