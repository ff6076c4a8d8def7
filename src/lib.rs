//! # qrcraft
//!
//! A Rust library for generating standards-conformant QR codes with Reed-Solomon error
//! correction, automatic mode & version selection and penalty-driven mask selection.
//!
//! ## Features
//!
//! - **Mode Selection**: Numeric, alphanumeric, byte (ISO-8859-1) and kanji (Shift JIS) modes,
//!   picked automatically from the content
//! - **Version Selection**: Smallest of the 40 versions that fits, upgrading the error
//!   correction level whenever the stronger level still fits
//! - **Reed-Solomon Error Correction**: Levels L, M, Q and H with block interleaving
//! - **Mask Selection**: All 8 masks scored in parallel against the 4 penalty rules
//! - **Export**: PNG rendering, terminal rendering and JSON persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use qrcraft::{ECLevel, QRBuilder, RenderOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, World!")
//!     .ec_level(ECLevel::Q) // Minimum error correction level, defaults to ECLevel::M
//!     .build()?;
//!
//! println!("{}", qr.metadata());
//! let png = qr.to_png(&RenderOptions::default())?;
//! std::fs::write("qr.png", png)?;
//! # std::fs::remove_file("qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Persistence
//!
//! ```rust
//! use qrcraft::{QRBuilder, QR};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("HELLO WORLD").build()?;
//! let json = qr.to_json()?;
//! assert_eq!(QR::from_json(&json)?, qr);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod persist;
pub mod render;

pub use builder::{QRBuilder, QR};
pub use common::codec::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::matrix::BitMatrix;
pub use common::metadata::{Color, ECLevel, Version};
pub use persist::QRRecord;
pub use render::{HexColor, RenderOptions};
