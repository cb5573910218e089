//! End-to-end scenarios for the analysis engine.

use resona_engine::{
    AnalysisOptions, CancelToken, MeasurementMode, QualityRating, SweepParams, analyze,
    deconvolve,
};
use resona_room::material::presets;
use resona_room::{AcousticMaterial, FrequencyBand, RoomModel, Surface, eyring_rt60, sabine_rt60};

fn reference_room() -> RoomModel {
    RoomModel::new("reference", 5.0, 7.0, 3.0).unwrap()
}

/// Impulse response whose energy decay curve falls 60 dB over `rt60`
/// seconds.
fn exponential_ir(rt60: f32, sample_rate: u32, secs: f32) -> Vec<f32> {
    let k = (10.0f32).powi(3).ln() / rt60;
    (0..(sample_rate as f32 * secs) as usize)
        .map(|i| (-k * i as f32 / sample_rate as f32).exp())
        .collect()
}

#[test]
fn sabine_basic_reference_value() {
    // 5x7x3 m with alpha = 0.1 everywhere: T ~ 0.161*105 / 14.2 ~ 1.19 s
    let room = reference_room();
    let t = sabine_rt60(&room, FrequencyBand::Khz1, false);
    assert!((t - 1.19).abs() < 0.01, "got {t}");
}

#[test]
fn eyring_vs_sabine_at_high_absorption() {
    let material = AcousticMaterial::new("absorber", [0.7; 6]).unwrap();
    let room = reference_room();
    let area = room.total_surface_area_m2();
    let room = room.with_surfaces(vec![Surface::new("all", area, material).unwrap()]);

    let sab = sabine_rt60(&room, FrequencyBand::Khz1, false);
    let eyr = eyring_rt60(&room, FrequencyBand::Khz1, false);
    assert!(eyr < sab);
    assert!(eyr > 0.0 && sab > 0.0);
    assert!(eyr.is_finite() && sab.is_finite());
}

#[test]
fn synthetic_exponential_broadband_recovery() {
    // 44.1 kHz, 2 s, decay curve hits -60 dB at 0.5 s
    let ir = exponential_ir(0.5, 44100, 2.0);
    let options = AnalysisOptions {
        filter_by_band: false,
        ..AnalysisOptions::default()
    };
    let analysis = analyze(
        &ir,
        44100,
        &MeasurementMode::Raw,
        &reference_room(),
        &options,
    )
    .unwrap();

    let rt60 = analysis.measured_rt60_seconds[&FrequencyBand::Khz1].unwrap();
    assert!((0.475..=0.525).contains(&rt60), "broadband RT60 {rt60}");

    let edt = analysis.edt_seconds[&FrequencyBand::Khz1].unwrap();
    let t20 = analysis.t20_seconds[&FrequencyBand::Khz1].unwrap();
    let t30 = analysis.t30_seconds[&FrequencyBand::Khz1].unwrap();
    let spread = edt.max(t20).max(t30) - edt.min(t20).min(t30);
    assert!(spread <= 0.5 * 0.05, "estimator spread {spread}");
}

#[test]
fn degenerate_short_buffer_keeps_predictions() {
    // 50 ms at 44.1 kHz
    let ir = exponential_ir(0.5, 44100, 0.05);
    let analysis = analyze(
        &ir,
        44100,
        &MeasurementMode::Raw,
        &reference_room(),
        &AnalysisOptions::default(),
    )
    .unwrap();

    assert!(analysis.measured_rt60_seconds.values().all(|v| v.is_none()));
    for band in FrequencyBand::ALL {
        assert!(analysis.sabine_rt60_seconds[&band] > 0.0);
        assert!(analysis.eyring_rt60_seconds[&band] > 0.0);
    }
}

#[test]
fn ess_sweep_self_test() {
    // Feed the sweep itself back through the deconvolver: the recovered
    // impulse peaks at the kernel tail with its energy tightly packed.
    let params = SweepParams::new(44100);
    let sweep = params.generate();
    let result = deconvolve(&sweep, &params, &CancelToken::new()).unwrap();

    let expected_peak = params.num_samples();
    assert!(
        (result.peak_index as i64 - expected_peak as i64).abs() <= 2,
        "peak at {} expected near {}",
        result.peak_index,
        expected_peak
    );

    // 95 % of the L2 energy within +-2.5 ms of the peak
    let ir = &result.impulse_response;
    let peak_in_window = ir
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .map(|(i, _)| i)
        .unwrap();
    let half_window = (0.0025 * 44100.0) as usize;
    let start = peak_in_window.saturating_sub(half_window);
    let end = (peak_in_window + half_window).min(ir.len());

    let total: f64 = ir.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    let windowed: f64 = ir[start..end]
        .iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum();
    assert!(
        windowed / total > 0.95,
        "only {:.1} % of energy near the peak",
        100.0 * windowed / total
    );
}

#[test]
fn ess_mode_end_to_end() {
    // Simulate a "room" that just attenuates and delays the sweep, then
    // analyze in ESS mode.
    let params = SweepParams::new(8000).with_range(50.0, 3500.0).with_duration(1.0);
    let sweep = params.generate();
    let delay = 400usize;
    let mut recording = vec![0.0f32; delay];
    recording.extend(sweep.iter().map(|x| x * 0.5));

    let analysis = analyze(
        &recording,
        8000,
        &MeasurementMode::Ess(params),
        &reference_room(),
        &AnalysisOptions::default(),
    )
    .unwrap();

    // an anechoic path has no reverberant tail to measure, but the run
    // must complete with predictions intact
    assert_eq!(analysis.sabine_rt60_seconds.len(), 6);
    assert_eq!(analysis.room.name, "reference");
}

#[test]
fn ess_mode_empty_recording_is_fatal() {
    let params = SweepParams::new(44100);
    let err = analyze(
        &[],
        44100,
        &MeasurementMode::Ess(params),
        &reference_room(),
        &AnalysisOptions::default(),
    )
    .unwrap_err();
    // empty input is rejected before deconvolution is even attempted
    assert_eq!(err, resona_engine::EngineError::InsufficientData);
}

#[test]
fn carpet_shortens_the_predicted_reverb() {
    let build = |floor: AcousticMaterial| {
        reference_room().with_surfaces(vec![
            Surface::new("floor", 35.0, floor).unwrap(),
            Surface::new("walls", 72.0, presets::plaster()).unwrap(),
            Surface::new("ceiling", 35.0, presets::plaster()).unwrap(),
        ])
    };
    let before = sabine_rt60(&build(presets::wood_floor()), FrequencyBand::Khz1, false);
    let after = sabine_rt60(&build(presets::carpet()), FrequencyBand::Khz1, false);
    assert!(after < before);
}

#[test]
fn analysis_serializes_with_band_keys_and_nulls() {
    let ir = exponential_ir(0.5, 44100, 0.05);
    let analysis = analyze(
        &ir,
        44100,
        &MeasurementMode::Raw,
        &reference_room(),
        &AnalysisOptions::default(),
    )
    .unwrap();

    let json = serde_json::to_value(&analysis).unwrap();

    let measured = json["measured_rt60_seconds"].as_object().unwrap();
    assert_eq!(measured.len(), 6);
    for key in ["125_hz", "250_hz", "500_hz", "1_khz", "2_khz", "4_khz"] {
        assert!(measured.contains_key(key), "missing band key {key}");
        // short-buffer run: absent measurements serialize as null, not 0
        assert!(measured[key].is_null());
    }

    assert!(json["sabine_rt60_seconds"]["1_khz"].as_f64().unwrap() > 0.0);
    assert!(json["average_measured_rt60_seconds"].is_null());
    assert!(json["room"]["room_volume_m3"].as_f64().unwrap() > 100.0);
    assert!(json["quality"].is_string());

    // and back in
    let back: resona_engine::Analysis = serde_json::from_value(json).unwrap();
    assert_eq!(back, analysis);
}

#[test]
fn quality_text_matches_rating() {
    let ir = exponential_ir(0.5, 44100, 0.05);
    let analysis = analyze(
        &ir,
        44100,
        &MeasurementMode::Raw,
        &reference_room(),
        &AnalysisOptions::default(),
    )
    .unwrap();
    assert_eq!(analysis.quality_text, analysis.quality.description());
    // 5x7x3 at alpha 0.1 with air absorption averages near one second
    assert!(matches!(
        analysis.quality,
        QualityRating::Balanced | QualityRating::Live
    ));
}
