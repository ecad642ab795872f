//! # Mizan CLI
//!
//! Command-line front end for the barcode, fiscal QR and receipt codecs.
//!
//! ## Usage
//!
//! ```bash
//! # Decode a scanned code
//! mizan decode 2212345015005
//!
//! # Build a weight label with a real check digit
//! mizan encode weight 12345 1.5 --check-digit
//!
//! # Fiscal QR payload, and back
//! mizan qr --seller ACME --tax-id 123 --timestamp 2024-01-15T10:30:00Z --total 1.150 --tax 0.150
//! mizan qr-decode AQRBQ01F...
//!
//! # Render a sale to ESC/POS bytes
//! mizan render sale.json --out receipt.bin
//!
//! # Print over Bluetooth LE
//! RUST_LOG=mizan=debug mizan print sale.json --config mizan.json
//! ```
//!
//! `sale.json` holds `{"store": {...}, "sale": {...}}`.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use mizan::{
    MizanConfig, MizanError, PrinterProfile,
    barcode,
    fiscal::{self, FiscalQrFields},
    receipt::{PrintableReceipt, ReceiptFormatter, Sale, StoreInfo, escpos},
};

/// Mizan - scale barcodes, fiscal QR payloads and BLE receipt printing
#[derive(Parser, Debug)]
#[command(name = "mizan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LabelKind {
    /// Prefix 22, value in kilograms
    Weight,
    /// Prefix 20, value in major currency units
    Price,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a scanned barcode and print it as JSON
    Decode { code: String },

    /// Build a weight or price label barcode
    Encode {
        kind: LabelKind,
        product: String,
        value: Decimal,

        /// Replace the placeholder with a computed EAN-13 check digit
        #[arg(long)]
        check_digit: bool,
    },

    /// Build a Base64 fiscal QR payload
    Qr {
        #[arg(long)]
        seller: String,
        #[arg(long)]
        tax_id: String,
        /// ISO 8601 timestamp
        #[arg(long)]
        timestamp: String,
        #[arg(long)]
        total: String,
        #[arg(long)]
        tax: String,
    },

    /// Decode a Base64 fiscal QR payload back to its fields
    QrDecode { payload: String },

    /// Render a sale to ESC/POS bytes
    Render {
        sale: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Paper profile (58mm or 80mm); overrides the config file
        #[arg(long)]
        profile: Option<String>,

        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print a sale on a Bluetooth LE printer
    Print {
        sale: PathBuf,

        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Printer address; first matching printer if omitted
        #[arg(long)]
        address: Option<String>,
    },
}

/// Input document for `render` and `print`.
#[derive(Deserialize)]
struct SaleFile {
    store: StoreInfo,
    sale: Sale,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), MizanError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { code } => {
            let scanned = barcode::decode(&code)?;
            println!("{}", serde_json::to_string_pretty(&scanned)?);
        }

        Commands::Encode {
            kind,
            product,
            value,
            check_digit,
        } => {
            let code = match kind {
                LabelKind::Weight => barcode::encode_weight_barcode(&product, value)?,
                LabelKind::Price => barcode::encode_price_barcode(&product, value)?,
            };
            let code = if check_digit {
                barcode::with_check_digit(&code)?
            } else {
                code
            };
            println!("{code}");
        }

        Commands::QrDecode { payload } => {
            let fields = fiscal::decode(&payload)?;
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }

        Commands::Qr {
            seller,
            tax_id,
            timestamp,
            total,
            tax,
        } => {
            let payload = fiscal::encode(&FiscalQrFields {
                seller_name: seller,
                tax_id,
                timestamp_iso8601: timestamp,
                total_with_tax: total,
                tax_amount: tax,
            })?;
            println!("{payload}");
        }

        Commands::Render {
            sale,
            out,
            profile,
            config,
        } => {
            let mut cfg = load_config(config)?;
            if let Some(name) = profile {
                cfg.profile = PrinterProfile::parse(&name)?;
            }
            let receipt = load_receipt(&sale)?;
            let bytes = escpos::render(&receipt, &cfg.profile);

            match out {
                Some(path) => {
                    fs::write(&path, &bytes)?;
                    eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
                }
                None => io::stdout().write_all(&bytes)?,
            }
        }

        Commands::Print {
            sale,
            config,
            address,
        } => {
            let cfg = load_config(config)?;
            let receipt = load_receipt(&sale)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(print(cfg, &receipt, address))?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<MizanConfig, MizanError> {
    match path {
        Some(path) => MizanConfig::load(path),
        None => Ok(MizanConfig::default()),
    }
}

fn load_receipt(path: &PathBuf) -> Result<PrintableReceipt, MizanError> {
    let text = fs::read_to_string(path)?;
    let SaleFile { store, sale } = serde_json::from_str(&text)?;
    Ok(ReceiptFormatter::format_with_fiscal_qr(&store, &sale))
}

#[cfg(feature = "ble")]
async fn print(
    cfg: MizanConfig,
    receipt: &PrintableReceipt,
    address: Option<String>,
) -> Result<(), MizanError> {
    use std::sync::Arc;

    use mizan::transport::{ByAddress, DeviceChooser, FirstMatch, PrinterSession, ble::BtleCentral};

    let central = Arc::new(BtleCentral::first_adapter().await?);
    let chooser: Box<dyn DeviceChooser> = match address {
        Some(addr) => Box::new(ByAddress(addr)),
        None => Box::new(FirstMatch),
    };

    let mut session = PrinterSession::new(central, chooser, cfg.transport, cfg.profile);
    let report = session.print(receipt).await?;
    println!(
        "Printed {} bytes in {} chunks on {}",
        report.bytes,
        report.chunks,
        report.device.label()
    );
    Ok(())
}

#[cfg(not(feature = "ble"))]
async fn print(
    _cfg: MizanConfig,
    _receipt: &PrintableReceipt,
    _address: Option<String>,
) -> Result<(), MizanError> {
    Err(MizanError::Bluetooth(
        "built without the `ble` feature".into(),
    ))
}
