//! End-to-end checks through the public API against the course exercises.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use atmos_rad::{
    blackbody_radiance, brightness_temperature, build_hydrostatic_profile, column_optical_depth,
    heating_rate, multi_layer_radiance, two_stream_radiances, ColumnConfig, LayerStack,
};

/// Convert W/m²/m/sr to W/m²/µm/sr.
const PER_MICRON: f64 = 1e-6;

#[test]
fn planck_table() {
    let expected = [
        [0.4521, 0.8954, 1.1955],
        [2.7324, 3.7835, 3.9883],
        [21.4495, 19.8525, 16.0931],
    ];
    for (temperature, row) in [200., 250., 350.].into_iter().zip(expected) {
        for (wavelength, want) in [8e-6, 10e-6, 12e-6].into_iter().zip(row) {
            assert_abs_diff_eq!(
                blackbody_radiance(wavelength, temperature) * PER_MICRON,
                want,
                epsilon = 1.5e-4
            );
        }
    }
}

#[test]
fn layer_stacks_and_brightness_temperature() {
    let temperatures = [300.0, 280.0, 270.0, 260.0];
    let level_tau = [0.0, 0.2, 0.35, 0.5, 0.6];
    let radiance = multi_layer_radiance(305.0, &temperatures, &level_tau, 10e-6).unwrap();
    assert_abs_diff_eq!(radiance * PER_MICRON, 9.045, epsilon = 1.5e-3);

    // The scene is colder than the surface but warmer than the top layer
    let stack = LayerStack::new(305.0, &temperatures, &level_tau).unwrap();
    let tb = stack.brightness_temperature(10e-6).unwrap();
    assert!(tb < 305.0 && tb > 260.0);
    assert_relative_eq!(
        tb,
        brightness_temperature(10e-6, radiance).unwrap(),
        max_relative = 1e-12
    );
}

/// The column pieces chained by hand agree with the configured run.
#[test]
fn column_by_hand_matches_config() {
    let config = ColumnConfig {
        layer_thickness: 50.0,
        num_levels: 300,
        ..Default::default()
    };
    let solution = config.solve().unwrap();

    let profile = build_hydrostatic_profile(300.0, 100e3, -7e-3, 50.0, 300).unwrap();
    let tau = column_optical_depth(0.01, 0.01, profile.density.view(), profile.height.view())
        .unwrap();
    let radiances =
        two_stream_radiances(tau.view(), profile.temperature.view(), profile.height.view(), 300.0)
            .unwrap();
    let rate = heating_rate(
        radiances.net_upward().view(),
        profile.height.view(),
        profile.density.view(),
    )
    .unwrap();

    assert_eq!(solution.profile, profile);
    assert_eq!(solution.tau, tau);
    assert_eq!(solution.radiances, radiances);
    assert_eq!(solution.heating_rate, rate);
    assert_eq!(solution.mid_height[0], 25.0);
}
