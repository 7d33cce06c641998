use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use rayon::prelude::*;
use scanner_core::decode::{decode_path, QrDecoder};
use scanner_core::model::ScanResult;
use scanner_core::presenter::ResultView;
use serde::Serialize;

#[derive(Args)]
pub struct DecodeArgs {
    /// Image files to decode
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DecodeRow {
    file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ResultView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(args: &DecodeArgs) -> Result<()> {
    let rows: Vec<DecodeRow> = args
        .files
        .par_iter()
        .map(|file| {
            let mut decoder = QrDecoder::new();
            let (result, error) = match decode_path(file, &mut decoder) {
                Ok(Some(decoded)) => (
                    Some(ResultView::from(&ScanResult::from_decoded(decoded))),
                    None,
                ),
                Ok(None) => (None, Some("no barcode found".to_string())),
                Err(e) => (None, Some(e.to_string())),
            };
            DecodeRow {
                file: file.clone(),
                result,
                error,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            match (&row.result, &row.error) {
                (Some(view), _) => {
                    println!("{}:", row.file.display());
                    crate::summary::print_result(view);
                }
                (None, Some(error)) => println!("{}: {}", row.file.display(), error),
                (None, None) => {}
            }
        }
    }

    let decoded = rows.iter().filter(|r| r.result.is_some()).count();
    if decoded == 0 {
        bail!("No barcode decoded from {} file(s)", rows.len());
    }
    Ok(())
}
