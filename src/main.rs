use std::fs;
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use hashquine::{
    assemble, patch, read_gif, CollisionOracle, FastcollOracle, GlyphSet, Layout, RandomOracle,
};

/// Generate a GIF that displays its own MD5 digest.
#[derive(Parser)]
struct Args {
    /// Background image the digit row is drawn over
    #[arg(long, default_value = "background.gif")]
    background: PathBuf,
    /// Directory containing char_0.gif .. char_f.gif glyph templates
    #[arg(long, default_value = "template")]
    glyphs: PathBuf,
    /// Output GIF path
    #[arg(short, long, default_value = "hashquine.gif")]
    output: PathBuf,
    /// Path to the fastcoll executable
    #[arg(long, default_value = "./fastcoll")]
    fastcoll: PathBuf,
    /// Use a seeded random oracle instead of fastcoll. Exercises the full
    /// pipeline but the emitted digest will not match the rendered digits.
    #[arg(long)]
    mock: bool,
    /// Seed for the mock oracle
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let background = read_gif(&args.background)?;
    let glyphs = GlyphSet::load(&args.glyphs)?;
    let layout = Layout::default();

    let mut oracle: Box<dyn CollisionOracle> = if args.mock {
        Box::new(RandomOracle::new(args.seed))
    } else {
        Box::new(FastcollOracle::new(args.fastcoll)?)
    };

    let progress = ProgressBar::new((layout.positions * glyphs.len()) as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .expect("progress template"),
    );

    let mut assembled = assemble(&background, &glyphs, &layout, oracle.as_mut(), &progress)?;
    progress.finish_with_message("assembly complete");

    let digest = patch(&mut assembled.bytes, &assembled.slots)?;
    println!("md5 = {}", hex::encode(digest));
    if args.mock {
        eprintln!("mock oracle in use: the rendered digits will not match the digest");
    }

    fs::write(&args.output, &assembled.bytes)?;
    println!(
        "wrote {} bytes to {}",
        assembled.bytes.len(),
        args.output.display()
    );
    Ok(())
}
