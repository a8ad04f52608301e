use anyhow::Context;
use clap::Parser;
use playcards::{card_grid, CardFonts, Compositor, Document, Font, Image, Info};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Assets expected in the working directory, matching what the print shop
/// templates were built around
const REGULAR_FONT: &str = "arial.ttf";
const HEAVY_FONT: &str = "ariblk.ttf";
const BACKGROUND: &str = "background_inverted.png";

#[derive(Parser, Debug)]
#[command(version, about = "Generate a printable PDF of QR play cards from a track list")]
struct Args {
    /// Path to the semicolon-separated input table
    input: PathBuf,
    /// Path of the PDF to write
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let records = playcards::read_records(&args.input)
        .with_context(|| format!("reading track list {}", args.input.display()))?;
    tracing::info!("loaded {} records from {}", records.len(), args.input.display());

    let mut doc = Document::default();
    let mut info = Info::new();
    info.title("Play Cards")
        .subject("QR play cards, codes on odd pages, text on even pages");
    doc.set_info(info);

    let regular = doc.add_font(
        Font::from_file(REGULAR_FONT)
            .with_context(|| format!("loading font {REGULAR_FONT}"))?,
    );
    let heavy = doc.add_font(
        Font::from_file(HEAVY_FONT).with_context(|| format!("loading font {HEAVY_FONT}"))?,
    );
    let background = doc.add_image(
        Image::from_file(BACKGROUND)
            .with_context(|| format!("loading background asset {BACKGROUND}"))?,
    );

    let compositor = Compositor::new(card_grid(), CardFonts::new(regular, heavy), background);
    compositor
        .compose(&mut doc, &records)
        .context("rendering cards")?;

    let out = std::fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    doc.write(out)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!("wrote {}", args.output.display());

    Ok(())
}
