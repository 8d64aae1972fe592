//! Dispersion Model Validation Test Suite
//!
//! End-to-end validation of the Gaussian plume implementation against
//! independently computed reference values from the Turner workbook
//! formulation.
//!
//! # Test Categories
//! 1. Effective stack height (Holland formula) validation
//! 2. Dispersion coefficient (sigma) validation
//! 3. Single-point concentration validation
//! 4. Plume shape properties (symmetry, decay, centerline peak)
//! 5. Grid sweep structure and consistency
//! 6. Stability classification table validation
//!
//! # References
//! - Turner, D.B. (1967): Workbook of Atmospheric Dispersion Estimates
//! - Holland, J.Z. (1953): Oak Ridge micrometeorological survey
//! - Davis & Cornwell: Introduction to Environmental Engineering, Table 12-11
//!
//! Run tests with: `cargo test --test dispersion_validation`

use approx::assert_relative_eq;
use plume_sim_core::{
    classify, concentration_at, sigma_y, sigma_z, GridSpec, Scenario, SkyCondition,
    StabilityClass,
};

/// Reference effective height for the demo stack, computed by hand from the
/// Holland formula:
/// 120 + (10 * 1.2 / 4.5) * (1.5 + 2.68e-2 * 95 * (290 / 588.15) * 1.2)
const REFERENCE_EFFECTIVE_HEIGHT: f64 = 128.017152087053;

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 1: EFFECTIVE STACK HEIGHT
// ═══════════════════════════════════════════════════════════════════════════

/// Validate the Holland plume rise for the demo stack.
#[test]
fn test_effective_height_reference() {
    let height = Scenario::demo().effective_height().unwrap();
    assert_relative_eq!(height, REFERENCE_EFFECTIVE_HEIGHT, epsilon = 1e-9);
}

/// The effective height is a pure function: parameter changes flow through
/// on the next call with nothing cached.
#[test]
fn test_effective_height_tracks_parameters() {
    let mut scenario = Scenario::demo();
    let before = scenario.effective_height().unwrap();

    scenario.ambient.wind_speed_m_s = 9.0;
    let after = scenario.effective_height().unwrap();
    assert!(after < before, "stronger wind must lower the plume rise");

    scenario.ambient.wind_speed_m_s = 4.5;
    let restored = scenario.effective_height().unwrap();
    assert_relative_eq!(restored, before, epsilon = 1e-12);
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 2: DISPERSION COEFFICIENTS
// ═══════════════════════════════════════════════════════════════════════════

/// Validate sigma values for class D at 10 km against hand-computed
/// references (68 * 10^0.894 and 44.5 * 10^0.516 - 13).
#[test]
fn test_sigma_reference_values() {
    assert_relative_eq!(
        sigma_y(StabilityClass::D, 10.0),
        532.732157081024,
        epsilon = 1e-8
    );
    assert_relative_eq!(
        sigma_z(StabilityClass::D, 10.0),
        133.002405435338,
        epsilon = 1e-8
    );
}

/// Both sigmas stay strictly positive across classes and operating
/// distances.
#[test]
fn test_sigma_positivity() {
    for class in StabilityClass::ALL {
        for x in [0.1, 0.5, 1.0, 5.0, 10.0, 50.0] {
            assert!(sigma_y(class, x) > 0.0, "sigma_y({class}, {x})");
            assert!(sigma_z(class, x) > 0.0, "sigma_z({class}, {x})");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 3: SINGLE-POINT CONCENTRATION
// ═══════════════════════════════════════════════════════════════════════════

/// End-to-end reference scenario: class D, 10 km downwind, 1500 m lateral,
/// 20 m receptor, demo stack and weather. The expected value was computed
/// independently from the formulas with 10-decimal rounding.
#[test]
fn test_single_point_reference() {
    let c = Scenario::demo().single_point().unwrap();
    assert_relative_eq!(c, 0.0000197371, epsilon = 1e-10);
}

/// Concentration doubles exactly with emission rate (one rounding ulp of
/// slack).
#[test]
fn test_concentration_linear_in_rate() {
    let scenario = Scenario::demo();
    let single = scenario.single_point().unwrap();

    let mut doubled = scenario;
    doubled.emission.rate *= 2.0;
    let double = doubled.single_point().unwrap();

    assert!(
        (double - 2.0 * single).abs() <= 2e-10,
        "expected exact doubling: {double} vs {}",
        2.0 * single
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 4: PLUME SHAPE PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

/// The plume is symmetric about the centerline.
#[test]
fn test_lateral_symmetry() {
    let sy = sigma_y(StabilityClass::D, 10.0);
    let sz = sigma_z(StabilityClass::D, 10.0);
    for y in [50.0, 300.0, 750.0, 1500.0] {
        let left =
            concentration_at(-y, 20.0, REFERENCE_EFFECTIVE_HEIGHT, 1656.2, 4.5, sy, sz).unwrap();
        let right =
            concentration_at(y, 20.0, REFERENCE_EFFECTIVE_HEIGHT, 1656.2, 4.5, sy, sz).unwrap();
        assert_eq!(left, right, "mirror receptors at +/-{y} m");
    }
}

/// Concentration decays strictly with lateral distance from the
/// centerline (class D, receptor at plume height, 10 km downwind).
#[test]
fn test_lateral_monotonic_decay() {
    let sy = sigma_y(StabilityClass::D, 10.0);
    let sz = sigma_z(StabilityClass::D, 10.0);
    let h = REFERENCE_EFFECTIVE_HEIGHT;

    let mut previous = f64::INFINITY;
    for y in [0.0, 200.0, 400.0, 600.0, 800.0] {
        let c = concentration_at(y, h, h, 1656.2, 4.5, sy, sz).unwrap();
        assert!(
            c < previous,
            "concentration at {y} m ({c}) should be below the previous step ({previous})"
        );
        previous = c;
    }
}

/// At 1 km downwind the vertical spread (31.5 m) is well under the plume
/// height, so the vertical profile peaks at the plume centerline.
#[test]
fn test_vertical_peak_at_plume_centerline() {
    let sy = sigma_y(StabilityClass::D, 1.0);
    let sz = sigma_z(StabilityClass::D, 1.0);
    let h = REFERENCE_EFFECTIVE_HEIGHT;

    let at_centerline = concentration_at(0.0, h, h, 1656.2, 4.5, sy, sz).unwrap();
    for z in [0.0, 50.0, 100.0, 150.0, 200.0] {
        let c = concentration_at(0.0, z, h, 1656.2, 4.5, sy, sz).unwrap();
        assert!(
            c < at_centerline,
            "receptor at {z} m ({c}) should see less than the centerline ({at_centerline})"
        );
    }
}

/// Ground reflection: at ground level the mirrored term doubles the direct
/// term exactly.
#[test]
fn test_ground_reflection_doubles_at_surface() {
    let sy = sigma_y(StabilityClass::D, 10.0);
    let sz = sigma_z(StabilityClass::D, 10.0);
    let h = REFERENCE_EFFECTIVE_HEIGHT;

    let with_reflection = concentration_at(0.0, 0.0, h, 1656.2, 4.5, sy, sz).unwrap();

    // Hand-computed single (unreflected) term at ground level
    let prefactor = 1656.2 / (2.0 * std::f64::consts::PI * sy * sz * 4.5);
    let direct = prefactor * (-0.5 * (h / sz).powi(2)).exp();
    assert_relative_eq!(with_reflection, 2.0 * direct, epsilon = 1e-10);
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 5: GRID SWEEP
// ═══════════════════════════════════════════════════════════════════════════

/// Grid-mode scenario: 1 km x +/-100 m x 20 m at default resolutions must
/// produce a 3 x 11 x 3 grid whose mid-lateral ground cell equals the
/// single-point evaluation at those coordinates.
#[test]
fn test_grid_mode_small_scenario() {
    let mut scenario = Scenario::demo();
    scenario.grid = GridSpec::new(1, 100, 20);
    let grid = scenario.sweep().unwrap();

    assert_eq!(grid.dims(), (3, 11, 3));

    let spec = grid.spec();
    let effective = scenario.effective_height().unwrap();
    let mid_lateral = 1; // index of lateral 0
    let expected = concentration_at(
        spec.lateral_at(mid_lateral),
        spec.height_at(0),
        effective,
        scenario.emission.rate,
        scenario.ambient.wind_speed_m_s,
        sigma_y(scenario.stability, spec.downwind_at(0)),
        sigma_z(scenario.stability, spec.downwind_at(0)),
    )
    .unwrap();
    assert_eq!(grid.at(0, 0, mid_lateral), expected);
}

/// Every cell of a sweep must agree with the direct point evaluation.
#[test]
fn test_grid_cells_match_point_evaluations() {
    let mut scenario = Scenario::demo();
    scenario.grid = GridSpec::new(1, 200, 20);
    let grid = scenario.sweep().unwrap();
    let spec = grid.spec();
    let effective = scenario.effective_height().unwrap();

    let (heights, downwinds, laterals) = grid.dims();
    for i in 0..heights {
        for j in 0..downwinds {
            let sy = sigma_y(scenario.stability, spec.downwind_at(j));
            let sz = sigma_z(scenario.stability, spec.downwind_at(j));
            for k in 0..laterals {
                let expected = concentration_at(
                    spec.lateral_at(k),
                    spec.height_at(i),
                    effective,
                    scenario.emission.rate,
                    scenario.ambient.wind_speed_m_s,
                    sy,
                    sz,
                )
                .unwrap();
                assert_eq!(grid.at(i, j, k), expected, "cell ({i},{j},{k})");
            }
        }
    }
}

/// Axis labels line up one-to-one with physical coordinates.
#[test]
fn test_grid_labels_consistent_with_coordinates() {
    let spec = GridSpec::new(1, 100, 20);
    let heights = spec.height_labels();
    let downwinds = spec.downwind_labels();
    let laterals = spec.lateral_labels();

    assert_eq!(heights.len(), spec.height_count());
    assert_eq!(downwinds.len(), spec.downwind_count());
    assert_eq!(laterals.len(), spec.lateral_count());

    assert_eq!(heights[0], "H0m");
    assert_eq!(heights[2], "H20m");
    assert_eq!(downwinds[0], "D0.0km");
    assert_eq!(downwinds[10], "D1.0km");
    assert_eq!(laterals[0], "L-100m");
    assert_eq!(laterals[2], "L100m");
}

/// A lateral row read from the grid is symmetric about the centerline.
#[test]
fn test_grid_rows_symmetric() {
    let mut scenario = Scenario::demo();
    scenario.grid = GridSpec::new(2, 500, 20);
    let grid = scenario.sweep().unwrap();
    let (heights, downwinds, laterals) = grid.dims();

    for i in 0..heights {
        for j in 0..downwinds {
            let row = grid.lateral_row(i, j);
            for k in 0..laterals / 2 {
                assert_eq!(
                    row[k],
                    row[laterals - 1 - k],
                    "row ({i},{j}) should mirror at offset {k}"
                );
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 6: STABILITY CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════

/// Spot-check the classification table, including both ambiguous cells and
/// the undefined calm-night cells.
#[test]
fn test_classification_table() {
    // Clear summer day, light wind: strongly unstable
    assert_eq!(
        classify(1.5, SkyCondition::DayStrongInsolation).unwrap(),
        StabilityClass::A
    );
    // Ambiguous "B-C" cell resolves to the more unstable B
    assert_eq!(
        classify(4.0, SkyCondition::DayModerateInsolation).unwrap(),
        StabilityClass::B
    );
    // Windy night: neutral
    assert_eq!(
        classify(7.0, SkyCondition::NightLowCloud).unwrap(),
        StabilityClass::D
    );
    // Light-wind clear night: stable
    assert_eq!(
        classify(2.5, SkyCondition::NightModerateCloud).unwrap(),
        StabilityClass::F
    );
    // Calm night is undefined in the table
    assert!(classify(0.5, SkyCondition::NightLowCloud).is_err());
}

/// A scenario driven by classification matches one with the class picked
/// directly.
#[test]
fn test_classified_scenario_matches_direct() {
    let mut classified = Scenario::demo();
    classified.stability = classify(4.5, SkyCondition::NightLowCloud).unwrap();

    let mut direct = Scenario::demo();
    direct.stability = StabilityClass::D;

    assert_eq!(
        classified.single_point().unwrap(),
        direct.single_point().unwrap()
    );
}
