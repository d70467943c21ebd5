//! Bao1x Firmware Signer
//!
//! Wraps a bare metal firmware binary in the Bao1x signature block and signs
//! it with the development key. The result still has to be packed with
//! `bao-uf2ify` before it can be copied to the bootloader.
//!
//! Usage:
//!   bao-signer <firmware.bin> <signed-blob.img>
//!
//! Signing an image that already has a signature block replaces the old
//! block instead of nesting a second one.

use anyhow::{Context, Result};
use bao_image::{devkey, ed25519ph, output, Ed25519ph, ImageOptions};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw firmware binary, or a previously signed image
    input: PathBuf,

    /// Where to write the signed image
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Refuse to touch key material with a signer that fails the known answer.
    ed25519ph::self_test(&Ed25519ph).context("Ed25519ph self test failed")?;

    let input = output::read(&args.input).context("Failed to read firmware")?;
    log::info!("input file size is {} bytes", input.len());

    let secret_key = devkey::dev_secret_key()?;
    let signed =
        bao_image::seal_firmware(&Ed25519ph, &secret_key, &input, &ImageOptions::release())
            .context("Failed to sign firmware")?;

    output::write_atomic(&args.output, &signed).context("Failed to write signed image")?;
    println!("Signed firmware blob written to {}", args.output.display());

    Ok(())
}
