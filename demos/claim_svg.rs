//! Draws the outline of a claim, the way a web map would.
//!
//! ```text
//! cargo run --example claim_svg --features generators -- demos/claims/claim.toml --output out.svg
//! ```

use std::path::PathBuf;

use clap::{Args, Parser};
use kurbo::Shape as _;
use svg::node::element::Path;
use tracing_subscriber::EnvFilter;

use gridsweeper::{generators, outline, CellSet, Multiplicity, Options};

const STROKE: &str = "#ef233c";
const STROKE_WEIGHT: f64 = 3.0;
const FILL_OPACITY: f64 = 0.2;

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum Example {
    Claim,
    HollowSquare,
    Concentric,
    Checkerboard,
    Islands,
}

#[derive(Parser)]
struct Cli {
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    input: Input,

    /// Overrides the scale from the claim file.
    #[arg(long)]
    scale: Option<i64>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    /// A TOML file with `cells = [[x, y], ...]` and optionally `scale = ...`.
    input: Option<PathBuf>,

    #[arg(long)]
    example: Option<Example>,
}

#[derive(serde::Deserialize)]
struct ClaimFile {
    #[serde(flatten)]
    options: Options,
    cells: CellSet,
}

fn get_claim(input: &Input) -> anyhow::Result<(CellSet, Options)> {
    match (&input.input, &input.example) {
        (Some(path), None) => {
            let text = std::fs::read_to_string(path)?;
            let claim: ClaimFile = toml::from_str(&text)?;
            Ok((claim.cells, claim.options))
        }
        (None, Some(example)) => {
            let cells = match example {
                Example::Claim => generators::claim_example(),
                Example::HollowSquare => generators::hollow_square(6),
                Example::Concentric => generators::concentric(4),
                Example::Checkerboard => generators::checkerboard(8),
                Example::Islands => generators::islands(3),
            };
            Ok((cells, Options::default()))
        }
        _ => anyhow::bail!("give either an input file or an example"),
    }
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Cli::parse();
    let (cells, mut options) = get_claim(&args.input)?;
    if let Some(scale) = args.scale {
        options.scale = scale;
    }

    let polygon = outline(&cells, &options)?;
    match polygon.multiplicity() {
        Multiplicity::Empty => println!("empty claim"),
        Multiplicity::Single => println!("one outline, {} holes", polygon.holes.len()),
        Multiplicity::Multiple(n) => {
            println!("{n} separate outlines, {} holes", polygon.holes.len())
        }
    }

    let (outer, holes) = polygon.to_bez_paths();
    let bbox = outer.bounding_box();
    let pad = STROKE_WEIGHT * 2.0;
    let document = svg::Document::new()
        .set(
            "viewBox",
            (
                bbox.min_x() - pad,
                bbox.min_y() - pad,
                bbox.width() + 2.0 * pad,
                bbox.height() + 2.0 * pad,
            ),
        )
        .add(
            Path::new()
                .set("stroke", STROKE)
                .set("stroke-width", STROKE_WEIGHT)
                .set("fill", STROKE)
                .set("fill-opacity", FILL_OPACITY)
                .set("fill-rule", "nonzero")
                .set("d", format!("{} {}", outer.to_svg(), holes.to_svg())),
        );

    svg::save(&args.output, &document)?;
    Ok(())
}
