use clap::Parser;
use cli::Settings;
use color_eyre::eyre::{Result, bail};
use edgefinder::{
    GridClassifier, Pipeline, RgbThresholdClassifier, SimplificationMethod,
    io::{render_classification, render_regions},
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "edgefinder", author, version, about = "Trace black/white boundaries of an image into plottable SVG lines", long_about = None)]
struct Cli {
    /// Path to input image
    image: PathBuf,
    /// Settings file (.toml or .json); flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Tolerance for line simplification
    #[arg(long)]
    epsilon: Option<f64>,
    /// Threshold for small area deletion
    #[arg(long)]
    area_size_threshold: Option<usize>,
    /// Threshold for deciding between black and white (every RGB component > threshold => white)
    #[arg(long)]
    colour_threshold: Option<u8>,
    /// Lines passing closer than this to an already kept line are dropped
    #[arg(long)]
    deduplication_epsilon: Option<f64>,
    /// Simplification algorithm (douglas_peucker, visvalingam_whyatt)
    #[arg(long)]
    simplification: Option<SimplificationMethod>,
    /// Path of the SVG output
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write the lines as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,
    /// Write classification and region images into this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,
    /// Page width in millimetres
    #[arg(long)]
    target_width: Option<f64>,
    /// Page height in millimetres
    #[arg(long)]
    target_height: Option<f64>,
}

impl Cli {
    /// Merge command-line overrides into the loaded settings
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(epsilon) = self.epsilon {
            settings.trace.epsilon = epsilon;
        }
        if let Some(threshold) = self.area_size_threshold {
            settings.trace.area_size_threshold = threshold;
        }
        if let Some(threshold) = self.colour_threshold {
            settings.colour_threshold = threshold;
        }
        if let Some(epsilon) = self.deduplication_epsilon {
            settings.trace.deduplication_epsilon = epsilon;
        }
        if let Some(method) = self.simplification {
            settings.trace.simplification = method;
        }
        if let Some(output) = &self.output {
            settings.output.svg = output.clone();
        }
        if let Some(geojson) = &self.geojson {
            settings.output.geojson = Some(geojson.clone());
        }
        if let Some(dir) = &self.debug_dir {
            settings.output.debug_dir = Some(dir.clone());
        }
        if let Some(width) = self.target_width {
            settings.output.target_width_mm = width;
        }
        if let Some(height) = self.target_height {
            settings.output.target_height_mm = height;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    run(&cli.image, &settings)
}

fn run(image_path: &Path, settings: &Settings) -> Result<()> {
    if !image_path.exists() {
        bail!("Input image '{}' does not exist!", image_path.display());
    }
    info!("Using epsilon = {} for {}", settings.trace.epsilon, settings.trace.simplification);
    info!("Using threshold = {} for small area deletion", settings.trace.area_size_threshold);
    info!(
        "Using threshold = {} for black/white decision (every RGB component > threshold => white)",
        settings.colour_threshold
    );

    let image = image::open(image_path)?;
    info!("Input image has dimensions {} x {}", image.width(), image.height());

    let classifier = RgbThresholdClassifier { threshold: settings.colour_threshold };
    let grid = classifier.classify(&image)?;

    let pipeline = Pipeline::builder()
        .with_config(settings.trace.clone())
        .set_classifier(classifier)
        .build()?;
    info!("{}", pipeline.info());

    let segmentation = pipeline.segment(&grid)?;
    if let Some(dir) = &settings.output.debug_dir {
        std::fs::create_dir_all(dir)?;
        render_classification(&grid).save(dir.join("imageBw.png"))?;
        render_regions(&segmentation.regions)?.save(dir.join("imageArea.png"))?;
        info!("Wrote debug images to {}", dir.display());
    }

    let result = pipeline.trace(&segmentation)?;
    result.save_svg(
        &settings.output.svg,
        settings.output.target_width_mm,
        settings.output.target_height_mm,
    )?;
    info!("Wrote SVG file to {}", settings.output.svg.display());

    if let Some(path) = &settings.output.geojson {
        result.save_geojson(path)?;
        info!("Wrote GeoJSON file to {}", path.display());
    }

    info!("✅ Traced {} lines with {} points", result.lines.len(), result.point_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "edgefinder",
            "input.png",
            "--epsilon",
            "0.5",
            "--area-size-threshold",
            "20",
            "--simplification",
            "visvalingam_whyatt",
            "-o",
            "out.svg",
        ])
        .expect("Should parse arguments");

        let settings = cli.settings().expect("Should build settings");
        assert_eq!(settings.trace.epsilon, 0.5);
        assert_eq!(settings.trace.area_size_threshold, 20);
        assert_eq!(settings.trace.simplification, SimplificationMethod::VisvalingamWhyatt);
        assert_eq!(settings.colour_threshold, 64);
        assert_eq!(settings.output.svg, PathBuf::from("out.svg"));
    }

    #[test]
    fn test_rejects_unparsable_number() {
        assert!(Cli::try_parse_from(["edgefinder", "input.png", "--epsilon", "abc"]).is_err());
        assert!(Cli::try_parse_from(["edgefinder"]).is_err());
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut img = GrayImage::new(32, 32);
        for y in 8..24 {
            for x in 8..24 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        let input = dir.path().join("square.png");
        img.save(&input).expect("Should save input");

        let mut settings = Settings::default();
        settings.trace.area_size_threshold = 10;
        settings.output.svg = dir.path().join("square.svg");
        settings.output.geojson = Some(dir.path().join("square.geojson"));
        settings.output.debug_dir = Some(dir.path().join("debug"));

        run(&input, &settings).expect("Should run");
        let svg = std::fs::read_to_string(&settings.output.svg).expect("Should read SVG");
        assert!(svg.contains("<path"));
        assert!(dir.path().join("square.geojson").exists());
        assert!(dir.path().join("debug").join("imageArea.png").exists());
    }

    #[test]
    fn test_missing_input_fails() {
        let settings = Settings::default();
        assert!(run(Path::new("does/not/exist.png"), &settings).is_err());
    }
}
