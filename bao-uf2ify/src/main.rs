//! Bao1x UF2 Packer
//!
//! Packs a signed Bao1x image into a UF2 file addressed at the bare metal
//! load address.
//!
//! Usage:
//!   bao-uf2ify <signed-blob.img> <firmware.uf2>

use anyhow::{Context, Result};
use bao_image::{output, reseal, uf2, BAOCHIP_1X_UF2_FAMILY, BAREMETAL_START};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Signed image produced by bao-signer
    input: PathBuf,

    /// Where to write the UF2 file
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let signed_blob = output::read(&args.input).context("Failed to read signed image")?;
    log::info!("signed blob file size is {} bytes", signed_blob.len());
    if !reseal::is_wrapped(&signed_blob) {
        log::warn!("{} does not look like a signed image", args.input.display());
    }

    let stream = uf2::pack(&signed_blob, BAOCHIP_1X_UF2_FAMILY, BAREMETAL_START);
    log::info!("packed {} UF2 blocks", stream.len() / uf2::UF2_BLOCK_LEN);

    output::write_atomic(&args.output, &stream).context("Failed to write UF2 file")?;
    println!("UF2 image written to {}", args.output.display());

    Ok(())
}
