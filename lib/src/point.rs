use async_trait::async_trait;
use eyre::Result;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _};

// Point is a single chart sample. It has no identity beyond its
// coordinate values.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[async_trait]
pub trait Codec {
    async fn encode<W: AsyncWrite + Unpin + Send>(
        &self,
        writer: &mut W,
        point: &Point,
    ) -> Result<()>;
    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Point>;
}

/// Whitespace-separated number tokens consumed pairwise, the format
/// charts are typically dumped in. Pairs may span lines. The first
/// token that does not parse as a number ends the stream; so does a
/// dangling final token.
///
/// Encoding writes one `x y` pair per line. The default f64 formatting
/// is shortest round-trip, so every written value re-parses to the
/// identical bits.
pub struct TextCodec;

#[async_trait]
impl Codec for TextCodec {
    async fn encode<W: AsyncWrite + Unpin + Send>(
        &self,
        writer: &mut W,
        point: &Point,
    ) -> Result<()> {
        writer
            .write_all(format!("{} {}\n", point.x, point.y).as_bytes())
            .await?;
        Ok(())
    }

    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Point> {
        let x = read_number(reader).await?;
        let y = read_number(reader).await?;
        Ok(Point { x, y })
    }
}

async fn read_number<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<f64> {
    let token = read_token(reader)
        .await?
        .ok_or_else(|| eyre::eyre!("end of input"))?;
    token
        .parse()
        .map_err(|e| eyre::eyre!("bad number {:?}: {}", token, e))
}

/// Next whitespace-delimited token, or None at end of input.
async fn read_token<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<String>> {
    // Skip leading whitespace.
    loop {
        let (skip, at_token, at_end) = {
            let buf = reader.fill_buf().await?;
            if buf.is_empty() {
                (0, false, true)
            } else {
                match buf.iter().position(|b| !b.is_ascii_whitespace()) {
                    Some(i) => (i, true, false),
                    None => (buf.len(), false, false),
                }
            }
        };
        reader.consume(skip);
        if at_end {
            return Ok(None);
        }
        if at_token {
            break;
        }
    }

    // Collect bytes up to the next whitespace or end of input.
    let mut token = Vec::new();
    loop {
        let (take, done) = {
            let buf = reader.fill_buf().await?;
            if buf.is_empty() {
                (0, true)
            } else {
                match buf.iter().position(|b| b.is_ascii_whitespace()) {
                    Some(i) => {
                        token.extend_from_slice(&buf[..i]);
                        (i, true)
                    }
                    None => {
                        token.extend_from_slice(buf);
                        (buf.len(), false)
                    }
                }
            }
        };
        reader.consume(take);
        if done {
            break;
        }
    }

    Ok(Some(String::from_utf8(token)?))
}

/// One `x,y` record per line.
pub struct CsvCodec;

#[async_trait]
impl Codec for CsvCodec {
    async fn encode<W: AsyncWrite + Unpin + Send>(
        &self,
        writer: &mut W,
        point: &Point,
    ) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.serialize(point)?;
        let buf = wtr.into_inner().map_err(|e| eyre::eyre!("{}", e))?;
        writer.write_all(&buf).await?;
        Ok(())
    }

    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Point> {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            eyre::bail!("end of input");
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(line.trim().as_bytes());
        let record = match rdr.records().next() {
            Some(record) => record?,
            None => eyre::bail!("empty record"),
        };

        let x = record
            .get(0)
            .ok_or_else(|| eyre::eyre!("missing x field"))?
            .trim()
            .parse()?;
        let y = record
            .get(1)
            .ok_or_else(|| eyre::eyre!("missing y field"))?
            .trim()
            .parse()?;
        Ok(Point { x, y })
    }
}

/// One JSON object per line: `{"x":…,"y":…}`.
pub struct JsonCodec;

#[async_trait]
impl Codec for JsonCodec {
    async fn encode<W: AsyncWrite + Unpin + Send>(
        &self,
        writer: &mut W,
        point: &Point,
    ) -> Result<()> {
        writer.write_all(&serde_json::to_vec(point)?).await?;
        writer.write_all(b"\n").await?;
        Ok(())
    }

    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Point> {
        let mut buf = Vec::new();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            eyre::bail!("end of input");
        }
        serde_json::from_slice(&buf).map_err(|e| eyre::eyre!(e))
    }
}
