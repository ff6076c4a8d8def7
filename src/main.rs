//! qrcraft command-line front end
//!
//! ```bash
//! # Print a QR to the terminal
//! qrcraft "Hello, world!"
//!
//! # Write a PNG with level Q or stronger
//! qrcraft --ec-level Q --output hello.png "Hello, world!"
//!
//! # Persist the symbol as JSON
//! qrcraft --output hello.json "Hello, world!"
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::info;

use qrcraft::{ECLevel, HexColor, QRBuilder, RenderOptions};

/// Generate QR codes from text
#[derive(Parser, Debug)]
#[command(name = "qrcraft")]
#[command(version = "0.1.0")]
#[command(about = "Encode text as a QR code", long_about = None)]
struct Args {
    /// Text to encode
    #[arg(value_name = "CONTENT")]
    content: String,

    /// Minimum error correction level (L, M, Q or H)
    #[arg(short, long, default_value = "M")]
    ec_level: ECLevel,

    /// Output file, .png for an image or .json for the persisted symbol.
    /// Prints to the terminal when absent.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Target image width in pixels
    #[arg(long, default_value_t = 300)]
    width: u32,

    /// Quiet zone in modules
    #[arg(long, default_value_t = 2)]
    margin: u32,

    /// Light module color, RRGGBB or RRGGBBAA
    #[arg(long, default_value = "FFFFFFFF")]
    light: HexColor,

    /// Dark module color, RRGGBB or RRGGBBAA
    #[arg(long, default_value = "000000FF")]
    dark: HexColor,

    /// Enable verbose logging. Ignored when RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let qr = QRBuilder::new(&args.content).ec_level(args.ec_level).build()?;
    info!("Generated QR {}", qr.metadata());

    let Some(path) = args.output else {
        println!("{}", qr.to_str(1));
        return Ok(());
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => fs::write(&path, qr.to_json()?)?,
        Some("png") => {
            let opts = RenderOptions {
                width: args.width,
                margin: args.margin,
                light: args.light.0,
                dark: args.dark.0,
            };
            fs::write(&path, qr.to_png(&opts)?)?
        }
        _ => return Err(format!("Unsupported output format: {}", path.display()).into()),
    }
    info!("Wrote {}", path.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(verbose)))
        .format_timestamp(None)
        .format_module_path(false)
        .init();
}

// Used only when RUST_LOG is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "qrcraft=trace"
    } else {
        "qrcraft=info"
    }
}

#[cfg(test)]
mod cli_tests {
    use clap::Parser;
    use env_logger::Env;

    use super::{default_filter, Args};

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "qrcraft=info");
        assert_eq!(default_filter(true), "qrcraft=trace");
    }

    #[test]
    fn test_rust_log_overrides_default_filter() {
        let env = Env::new().filter("QRCRAFT_TEST_LOG");
        std::env::set_var("QRCRAFT_TEST_LOG", "trace");
        let logger = env_logger::Builder::from_env(env.default_filter_or(default_filter(false))).build();
        assert_eq!(logger.filter(), log::LevelFilter::Trace);

        let env = Env::new().filter("QRCRAFT_TEST_LOG_UNSET");
        let logger = env_logger::Builder::from_env(env.default_filter_or(default_filter(false))).build();
        assert_eq!(logger.filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["qrcraft", "-e", "H", "-v", "HELLO"]);
        assert_eq!(args.content, "HELLO");
        assert_eq!(args.ec_level, qrcraft::ECLevel::H);
        assert!(args.verbose);
        assert_eq!(args.width, 300);
    }
}
