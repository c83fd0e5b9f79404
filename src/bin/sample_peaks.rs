use anyhow::{Context, Result};
use log::info;

use spectral_peaks::{Band, Peak, SimplePeak, Spectrum, SpectrumStore};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Noise-free sum of gaussian bands `(centre, sigma, amplitude)`.
fn band_profile(wavenumbers: &[f64], bands: &[(f64, f64, f64)]) -> Vec<f64> {
    wavenumbers
        .iter()
        .map(|&wn| bands.iter().map(|&(mu, sigma, amp)| gaussian(wn, mu, sigma, amp)).sum::<f64>())
        .collect()
}

/// Full width at half maximum of a gaussian with the given sigma.
fn fwhm(sigma: f64) -> f64 {
    2.0 * (2.0 * std::f64::consts::LN_2).sqrt() * sigma
}

/// Builds synthetic IR spectra whose band positions are known up front,
/// attaches those bands as peaks and prints their debug strings.
///
/// Usage: `sample-peaks [calibration-shift]`. The optional shift (in
/// wavenumbers) is applied to every peak with `translate`.
fn main() -> Result<()> {
    env_logger::init();

    let shift: f64 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("calibration shift '{arg}' is not a number"))?,
        None => 0.0,
    };

    // Wavenumbers: 4000 → 2002, step 2
    let wavenumbers: Vec<f64> = (0..1000).map(|i| 4000.0 - i as f64 * 2.0).collect();

    let samples: Vec<(&str, Vec<(f64, f64, f64)>)> = vec![
        ("Sample_A", vec![(3400.0, 80.0, 0.8), (2900.0, 40.0, 0.5), (2350.0, 30.0, 0.3)]),
        ("Sample_B", vec![(3200.0, 60.0, 0.6), (2800.0, 50.0, 0.7), (2500.0, 35.0, 0.4)]),
        ("Sample_C", vec![(3600.0, 70.0, 0.9), (3000.0, 45.0, 0.4), (2200.0, 25.0, 0.5)]),
    ];

    let mut store = SpectrumStore::new();

    for (name, bands) in &samples {
        let y = band_profile(&wavenumbers, bands);
        let id = store
            .insert(Spectrum::new(*name, wavenumbers.clone(), y).context("building spectrum")?);

        for (i, &(mu, sigma, amp)) in bands.iter().enumerate() {
            let band = Band::new(format!("{name} band {}", i + 1), fwhm(sigma));
            store.attach_peak(id, Peak::new(id, &[mu, amp], amp, band))?;
        }

        // The strongest component also gets a plain marker peak.
        if let Some(&(mu, _, amp)) = bands.iter().max_by(|a, b| a.2.total_cmp(&b.2)) {
            let marker = Peak::new(id, &[mu, amp], amp, SimplePeak::new(format!("{name} max")));
            store.attach_peak(id, marker)?;
        }
    }

    for id in store.ids().collect::<Vec<_>>() {
        let spectrum = store.get_mut(id)?;
        for peak in spectrum.peaks_mut() {
            peak.translate(&[shift])?;
        }
        info!("spectrum {id}: {} peaks, shift {shift}", spectrum.peak_count());

        println!("{}", spectrum.title);
        for peak in spectrum.peaks() {
            println!("  {peak}");
        }
    }

    Ok(())
}
