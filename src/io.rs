//! Catalog, batch, and result I/O for the driver.

use std::fs;
use std::io::{self, Read, Write};

use clearing::Catalog;
use common::{parse_batch, Auction, CatalogConfig, Error, WinningBid};

use crate::config::AppConfig;

/// Read, decode, and index the catalog at `path`.
pub fn load_catalog(path: &str) -> Result<Catalog, Error> {
    let contents = fs::read_to_string(path).map_err(|source| Error::ConfigUnreadable {
        path: path.to_string(),
        source,
    })?;
    Catalog::from_config(CatalogConfig::from_json(&contents)?)
}

/// Read the auction batch from the configured file or stdin.
pub fn read_batch(config: &AppConfig) -> Result<Vec<Auction>, Error> {
    match config.input_path.as_deref() {
        Some(path) if path != "-" => {
            let contents = fs::read_to_string(path).map_err(|source| Error::InputUnreadable {
                path: path.to_string(),
                source,
            })?;
            parse_batch(&contents)
        }
        _ => decode_batch(io::stdin().lock()),
    }
}

pub fn decode_batch<R: Read>(mut reader: R) -> Result<Vec<Auction>, Error> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|source| Error::InputUnreadable {
            path: "<stdin>".into(),
            source,
        })?;
    parse_batch(&contents)
}

pub fn encode_results(results: &[Vec<WinningBid>], pretty: bool) -> Result<String, Error> {
    let encoded = if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };
    Ok(encoded)
}

/// Write the encoded results to the configured file or stdout.
pub fn write_results(results: &[Vec<WinningBid>], config: &AppConfig) -> Result<(), Error> {
    let encoded = encode_results(results, config.pretty)?;
    match config.output_path.as_deref() {
        Some(path) => fs::write(path, format!("{}\n", encoded))
            .map_err(|e| Error::OutputWrite(format!("{}: {}", path, e))),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", encoded)
                .and_then(|_| stdout.flush())
                .map_err(|e| Error::OutputWrite(e.to_string()))
        }
    }
}
