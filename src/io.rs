use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sieve_core::{Label, Result, SieveError};

use crate::datasets::label_name;

/// Written in place of a label for unclassified inputs.
pub const UNCLASSIFIED: &str = "-";

/// Writes one `text\tlabel` line per input, in input order.
///
/// # Errors
///
/// - [`SieveError::ShapeMismatch`] if `texts` and `predictions` differ in length
/// - [`SieveError::Io`] if writing fails
pub fn write_predictions<W: Write, S: AsRef<str>>(
    mut writer: W,
    texts: &[S],
    predictions: &[Option<Label>],
) -> Result<()> {
    if texts.len() != predictions.len() {
        return Err(SieveError::ShapeMismatch {
            expected: format!("Expected {} predictions", texts.len()),
            got: format!("Got {} predictions", predictions.len()),
        });
    }

    for (text, prediction) in texts.iter().zip(predictions) {
        let label = prediction.map_or_else(|| UNCLASSIFIED.to_string(), label_name);
        writeln!(writer, "{}\t{}", text.as_ref(), label)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_predictions_to_path<S: AsRef<str>>(
    path: impl AsRef<Path>,
    texts: &[S],
    predictions: &[Option<Label>],
) -> Result<()> {
    let file = File::create(path)?;
    write_predictions(BufWriter::new(file), texts, predictions)
}
