use asset_squeeze::config::OptimizeConfig;
use asset_squeeze::imaging::MagickConverter;
use asset_squeeze::{output, walk};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asset-squeeze")]
#[command(about = "Downscale, reorient and recompress project image assets as JPEG")]
#[command(long_about = "\
Downscale, reorient and recompress project image assets as JPEG

Walks src/assets (relative to the working directory) recursively and rewrites every JPG, JPEG, PNG, HEIC and CR3
file as a baseline JPEG (quality 85) whose longer edge is at most 1920px.
EXIF rotation is applied, transparency is flattened onto white.

  src/assets/
  ├── hero.png              → hero.jpg           + hero.png.original
  ├── photo.jpg             → photo.jpg          + photo.jpg.original
  ├── trip/IMG_0042.HEIC    → trip/IMG_0042.jpg  + trip/IMG_0042.HEIC.original
  ├── audio/                  skipped
  └── optimized/              skipped

HEIC and CR3 files are converted with ImageMagick ('magick' on PATH) first.
Existing backups are never overwritten.

Set RUST_LOG=debug for per-stage diagnostics on stderr.")]
#[command(version)]
struct Cli {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Cli::parse();
    init_tracing();

    let config = OptimizeConfig::default();
    config.validate()?;

    let converter = MagickConverter::new(config.converter.program.clone());
    if !converter.is_available() {
        tracing::warn!(
            "'{}' not found; HEIC and CR3 files will fail to convert",
            converter.program()
        );
    }

    output::print_banner(&config);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = walk::walk(&config, &converter, Some(tx));
    printer.join().unwrap();
    let totals = result?;

    output::print_summary(&totals, &config.backup_suffix);
    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
