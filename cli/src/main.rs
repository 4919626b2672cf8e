mod io;

use clap::Parser;
use eyre::Result;
use plotsift::{Codec as _, CsvCodec, JsonCodec, Point, Raster, TextCodec};
use std::num::NonZeroU32;
use tokio::io::AsyncWriteExt as _;

use crate::io::{Input, Output};

#[derive(Parser, Debug)]
#[command(
    name = "plotsift",
    version,
    about = "Print the minimal set of point coordinates needed to produce a chart \
             equivalent to the chart produced with all of them"
)]
struct Cli {
    /// Width of the target chart (in px)
    #[clap(long)]
    width: NonZeroU32,

    /// Height of the target chart (in px)
    #[clap(long)]
    height: NonZeroU32,

    /// Output file [use "stdout" for standard output]
    #[clap(long)]
    output: String,

    /// Point encoding (text, csv, json)
    #[clap(long, default_value = "text")]
    format: String,

    /// Input file [default: stdin]
    #[clap(default_value = "stdin")]
    input: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.format.as_str() {
        "text" | "csv" | "json" => {}
        other => eyre::bail!("unknown --format: {} (expected text, csv, json)", other),
    }

    let mut input = Input::from_filename(&cli.input)
        .await
        .map_err(|e| eyre::eyre!("error opening input file {}: {}", cli.input, e))?;
    let mut output = Output::from_filename(&cli.output)
        .await
        .map_err(|e| eyre::eyre!("error opening output file {}: {}", cli.output, e))?;

    // The extent pass and the fill pass share one buffered read, so the
    // input can be a pipe as well as a file.
    let mut points: Vec<Point> = Vec::new();
    loop {
        let result = match cli.format.as_str() {
            "csv" => CsvCodec.decode(&mut input).await,
            "json" => JsonCodec.decode(&mut input).await,
            _ => TextCodec.decode(&mut input).await,
        };
        match result {
            Ok(point) => points.push(point),
            // Anything that is not a well-formed pair ends the data,
            // the same as end of stream.
            Err(_) => break,
        }
    }

    let raster = Raster {
        width: cli.width,
        height: cli.height,
    };
    let set = plotsift::sift(&points, raster)?;

    for point in set.points() {
        match cli.format.as_str() {
            "csv" => CsvCodec.encode(&mut output, point).await?,
            "json" => JsonCodec.encode(&mut output, point).await?,
            _ => TextCodec.encode(&mut output, point).await?,
        }
    }
    output.flush().await?;

    Ok(())
}
