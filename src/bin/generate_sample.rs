use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};

use specview::data::format::Format;
use specview::data::model::Dataset;
use specview::data::writer::write;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Small deterministic noise source (xorshift64*).
struct Noise(u64);

impl Noise {
    fn next_unit(&mut self) -> f64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        let bits = self.0.wrapping_mul(0x2545_F491_4F6C_DD1D);
        (bits >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform noise in `[-amplitude, amplitude)`.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_unit() * 2.0 - 1.0) * amplitude
    }
}

fn main() -> Result<()> {
    let mut noise = Noise(0x5EED_1234_ABCD_0001);

    // UV-Vis absorption bands: (centre nm, width nm, absorbance)
    let bands = [(280.0, 12.0, 0.9), (350.0, 25.0, 0.35), (520.0, 40.0, 0.6)];

    let mut dataset = Dataset::named(Some("sample_spectrum".to_string()), "xy");
    for i in 0..=600 {
        let wavelength = 200.0 + i as f64;
        let absorbance: f64 = bands
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(wavelength, mu, sigma, amp))
            .sum();
        dataset.push(wavelength, absorbance + noise.jitter(0.004));
    }

    let output_path = "sample_spectrum.xy";
    let file = File::create(output_path).context("creating output file")?;
    let mut out = BufWriter::new(file);
    write(&dataset, Format::Xy, "generate_sample", &mut out).context("writing spectrum")?;

    println!("Wrote {} points to {output_path}", dataset.len());
    Ok(())
}
