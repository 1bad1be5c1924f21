use std::fs;
use std::path::PathBuf;

use clap::Parser;
use md5::{Digest, Md5};

use hashquine::decode::rendered_images;
use hashquine::{GlyphSet, HEX_DIGITS};

/// Check that a generated GIF really renders its own MD5 digest.
#[derive(Parser)]
struct Args {
    /// The GIF to verify
    input: PathBuf,
    /// Directory containing the glyph templates the file was built from
    #[arg(long, default_value = "template")]
    glyphs: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let bytes = fs::read(&args.input)?;
    let glyphs = GlyphSet::load(&args.glyphs)?;

    let digest = hex::encode(Md5::digest(&bytes));

    // First rendered image is the background; the rest are digit glyphs,
    // ordered left to right by construction.
    let mut digits = rendered_images(&bytes)?;
    if digits.is_empty() {
        return Err("file renders no images at all".into());
    }
    digits.remove(0);
    let rendered: String = digits
        .iter()
        .map(|img| match glyphs.match_pixels(&img.data) {
            Some(symbol) => HEX_DIGITS[symbol] as char,
            None => '?',
        })
        .collect();

    println!("file digest:  {digest}");
    println!("rendered:     {rendered}");
    if rendered == digest {
        println!("ok: the file renders its own digest");
        Ok(())
    } else {
        Err("rendered digits do not match the file digest".into())
    }
}
