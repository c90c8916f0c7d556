// SPDX-License-Identifier: MPL-2.0

//! Apply a frequency-domain filter to an image file.
//!
//! ```bash
//! cargo run --release --example filter_image -- input.png out.png --kind gaussian_low --cutoff 20
//! cargo run --release --example filter_image -- input.png out.png --kind butterworth_band_stop --inner 20 --outer 40 --order 3
//! cargo run --release --example filter_image -- input.png out.png --config homomorphic.json
//! ```
//!
//! A configuration file holds one serialized filter, for example
//! `{"kind": "homomorphic", "cutoff": 30, "low_gain": 0.5, "high_gain": 2.0, "sharpness": 1}`.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use freqfilter::{apply_frequency_filter, forward_transform, raster, Filter, FilterKind};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image to filter
    input: PathBuf,

    /// Where to write the filtered grayscale image
    output: PathBuf,

    /// Filter family (low_pass_ideal, butterworth_low, gaussian_high, homomorphic, ...)
    #[arg(short, long, default_value = "low_pass_ideal")]
    kind: FilterKind,

    /// JSON file with a complete filter description, overrides --kind
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cutoff radius d0
    #[arg(long)]
    cutoff: Option<f64>,

    /// Butterworth order
    #[arg(long)]
    order: Option<u32>,

    /// Inner radius of band filters
    #[arg(long)]
    inner: Option<f64>,

    /// Outer radius of band filters
    #[arg(long)]
    outer: Option<f64>,

    /// Homomorphic low frequency gain
    #[arg(long)]
    low_gain: Option<f64>,

    /// Homomorphic high frequency gain
    #[arg(long)]
    high_gain: Option<f64>,

    /// Homomorphic sharpness constant
    #[arg(long)]
    sharpness: Option<f64>,

    /// Also save the log magnitude spectrum of the input
    #[arg(long)]
    spectrum: Option<PathBuf>,
}

impl Cli {
    fn filter(&self) -> Result<Filter, Box<dyn std::error::Error>> {
        if let Some(path) = &self.config {
            let text = std::fs::read_to_string(path)?;
            return Ok(serde_json::from_str(&text)?);
        }
        let mut filter = Filter::with_defaults(self.kind);
        match &mut filter {
            Filter::IdealLowPass { cutoff }
            | Filter::IdealHighPass { cutoff }
            | Filter::GaussianLowPass { cutoff }
            | Filter::GaussianHighPass { cutoff } => override_with(cutoff, self.cutoff),
            Filter::ButterworthLowPass { cutoff, order }
            | Filter::ButterworthHighPass { cutoff, order } => {
                override_with(cutoff, self.cutoff);
                override_with(order, self.order);
            }
            Filter::IdealBandPass { inner, outer } | Filter::IdealBandStop { inner, outer } => {
                override_with(inner, self.inner);
                override_with(outer, self.outer);
            }
            Filter::ButterworthBandPass {
                inner,
                outer,
                order,
            }
            | Filter::ButterworthBandStop {
                inner,
                outer,
                order,
            } => {
                override_with(inner, self.inner);
                override_with(outer, self.outer);
                override_with(order, self.order);
            }
            Filter::Homomorphic(params) => {
                override_with(&mut params.cutoff, self.cutoff);
                override_with(&mut params.low_gain, self.low_gain);
                override_with(&mut params.high_gain, self.high_gain);
                override_with(&mut params.sharpness, self.sharpness);
            }
        }
        Ok(filter)
    }
}

fn override_with<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let filter = cli.filter()?;
    filter.validate()?;
    info!("filter: {:?}", filter);

    let img = image::open(&cli.input)?;
    info!("loaded {} ({}x{})", cli.input.display(), img.width(), img.height());

    if let Some(path) = &cli.spectrum {
        let spectrum = forward_transform(&raster::to_gray(&img))?;
        spectrum.magnitude_image().save(path)?;
        info!("spectrum written to {}", path.display());
    }

    let now = Instant::now();
    let out = apply_frequency_filter(&img, &filter)?;
    info!("{} applied in {}ms", filter.kind(), now.elapsed().as_millis());

    out.save(&cli.output)?;
    info!("result written to {}", cli.output.display());
    Ok(())
}
