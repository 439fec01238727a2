//! pngpix CLI - PNG to PPM / ASCII-art converter
//!
//! A command-line interface for the pngpix decoding library. Decodes a
//! truecolor PNG, applies optional pixmap transforms, and writes the
//! result as binary PPM (P6) or ASCII art.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use pngpix::color::Rgb;
use pngpix::decode::PngFile;
use pngpix::pixmap::ScaleMethod;

/// Decode a PNG and render it as PPM or ASCII art.
#[derive(Parser, Debug)]
#[command(name = "pngpix")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    pngpix photo.png -o photo.ppm              Decode to binary PPM
    pngpix photo.png --format ascii            Render as ASCII art
    pngpix photo.png --scale 80x40 --format ascii
    pngpix photo.png --rotate cw -o turned.ppm
    pngpix photo.png --grayscale --bg 0,0,0    Grayscale over black
    pngpix photo.png -v                        Verbose output with timing")]
struct Args {
    /// Input PNG file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (format detected from extension)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output format (overrides extension detection)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Scale to WIDTHxHEIGHT before other transforms
    #[arg(long, value_name = "WxH", value_parser = parse_dimensions)]
    scale: Option<(u32, u32)>,

    /// Interpolation used by --scale
    #[arg(long, value_enum, default_value = "nearest")]
    scale_method: ScaleMethodArg,

    /// Rotate by a quarter or half turn
    #[arg(long, value_enum)]
    rotate: Option<RotateArg>,

    /// Convert to the darkness-in-alpha grayscale form
    #[arg(long)]
    grayscale: bool,

    /// Convert to conventional luma grayscale (R=G=B)
    #[arg(long, conflicts_with = "grayscale")]
    luma: bool,

    /// Threshold to black and white at the given luma (0.0-1.0)
    #[arg(long, value_name = "THRESHOLD")]
    monochrome: Option<f32>,

    /// Background color for alpha blending in PPM output
    #[arg(long, value_name = "R,G,B", default_value = "255,255,255", value_parser = parse_rgb)]
    bg: Rgb,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Binary PPM (P6)
    Ppm,
    /// ASCII art text
    Ascii,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RotateArg {
    /// 90 degrees clockwise
    Cw,
    /// 90 degrees counter-clockwise
    Ccw,
    /// 180 degrees
    Half,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScaleMethodArg {
    /// Nearest neighbor (fastest)
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic interpolation (not yet implemented)
    Bicubic,
}

impl From<ScaleMethodArg> for ScaleMethod {
    fn from(arg: ScaleMethodArg) -> Self {
        match arg {
            ScaleMethodArg::Nearest => ScaleMethod::Nearest,
            ScaleMethodArg::Bilinear => ScaleMethod::Bilinear,
            ScaleMethodArg::Bicubic => ScaleMethod::Bicubic,
        }
    }
}

/// Parse "WxH" into a dimension pair.
fn parse_dimensions(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: u32 = w.parse().map_err(|_| format!("invalid width '{w}'"))?;
    let height: u32 = h.parse().map_err(|_| format!("invalid height '{h}'"))?;
    Ok((width, height))
}

/// Parse "R,G,B" into a color.
fn parse_rgb(s: &str) -> Result<Rgb, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{s}'"));
    }
    let channel = |p: &str| -> Result<u8, String> {
        p.trim().parse().map_err(|_| format!("invalid channel '{p}'"))
    };
    Ok(Rgb::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}

fn main() {
    env_logger::init();

    // Show concise help if no arguments provided
    if std::env::args().len() == 1 {
        print_concise_help();
        std::process::exit(0);
    }

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn print_concise_help() {
    eprintln!("pngpix - decode a PNG and render it as PPM or ASCII art");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    pngpix <INPUT> [OPTIONS]");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    pngpix photo.png -o photo.ppm        Decode to binary PPM");
    eprintln!("    pngpix photo.png --format ascii      Render as ASCII art");
    eprintln!("    pngpix photo.png --rotate cw -v      Rotate with timing output");
    eprintln!();
    eprintln!("For more options, run: pngpix --help");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load and decode
    let start = Instant::now();
    let png = PngFile::open(&args.input).map_err(|e| {
        if args.input.exists() {
            format!("Can't read '{}': {e}", args.input.display())
        } else {
            format!(
                "File not found: '{}'. Check that the path is correct.",
                args.input.display()
            )
        }
    })?;
    let mut pixmap = png.decode()?;
    let decode_time = start.elapsed();

    if args.verbose {
        let input = &args.input;
        let ct = pixmap.color_type();
        eprintln!("Decoded: {input:?}");
        eprintln!("  File size: {}", format_size(png.bytes().len() as u64));
        eprintln!("  Dimensions: {}x{}", pixmap.width(), pixmap.height());
        eprintln!("  Color type: {ct:?}");
        eprintln!("  Decode time: {decode_time:.2?}");
    }

    // Transforms, in a fixed order: geometry first, color last.
    let transform_start = Instant::now();
    let mut applied = String::new();

    if let Some((w, h)) = args.scale {
        pixmap.scale(w, h, args.scale_method.into())?;
        let _ = write!(applied, " scale={w}x{h}");
    }
    match args.rotate {
        Some(RotateArg::Cw) => {
            pixmap.rotate_cw();
            applied.push_str(" rotate=cw");
        }
        Some(RotateArg::Ccw) => {
            pixmap.rotate_ccw();
            applied.push_str(" rotate=ccw");
        }
        Some(RotateArg::Half) => {
            pixmap.rotate_cw();
            pixmap.rotate_cw();
            applied.push_str(" rotate=half");
        }
        None => {}
    }
    if args.grayscale {
        pixmap.to_grayscale()?;
        applied.push_str(" grayscale");
    }
    if args.luma {
        pixmap.to_luma()?;
        applied.push_str(" luma");
    }
    if let Some(threshold) = args.monochrome {
        pixmap.to_monochrome(threshold)?;
        let _ = write!(applied, " monochrome={threshold}");
    }
    let transform_time = transform_start.elapsed();

    if args.verbose && !applied.is_empty() {
        eprintln!("Transforms:{applied}");
        eprintln!("  Transform time: {transform_time:.2?}");
    }

    // Determine output format and path
    let format = args.format.unwrap_or_else(|| {
        args.output
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(|e| match e.to_lowercase().as_str() {
                "ppm" => Some(OutputFormat::Ppm),
                "txt" | "asc" => Some(OutputFormat::Ascii),
                _ => None,
            })
            .unwrap_or(OutputFormat::Ppm)
    });

    let output_path = args.output.clone().unwrap_or_else(|| {
        let mut path = args.input.clone();
        path.set_extension(match format {
            OutputFormat::Ppm => "ppm",
            OutputFormat::Ascii => "txt",
        });
        path
    });

    // Write output
    let write_start = Instant::now();
    match format {
        OutputFormat::Ppm => pixmap.write_ppm_file(&output_path, args.bg)?,
        OutputFormat::Ascii => pixmap.write_ascii_file(&output_path)?,
    }
    let write_time = write_start.elapsed();

    let output_size = std::fs::metadata(&output_path)?.len();

    if args.verbose {
        eprintln!("Output: {}", output_path.display());
        eprintln!("  Format: {format:?}");
        eprintln!("  Write time: {write_time:.2?}");
        eprintln!("  Size: {}", format_size(output_size));
    } else if !args.quiet {
        println!(
            "{} -> {} ({})",
            args.input.display(),
            output_path.display(),
            format_size(output_size)
        );
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        let mb = bytes as f64 / MB as f64;
        format!("{mb:.2} MB")
    } else if bytes >= KB {
        let kb = bytes as f64 / KB as f64;
        format!("{kb:.2} KB")
    } else {
        format!("{bytes} B")
    }
}
