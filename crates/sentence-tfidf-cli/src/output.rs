use std::{fmt::Write as _, io::Write};

use anyhow::Result;
use clap::ValueEnum;
use sentence_tfidf::{EncodedVector, VocabularyModel};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// One line per sentence, every weight separated by a space (default)
    Dense,
    /// A JSON array of vectors
    Json,
    /// One line per sentence, `index:weight` pairs for non-zero weights
    Sparse,
}

pub fn write_vectors<W: Write>(
    out: &mut W,
    vectors: &[EncodedVector],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(vectors)?)?;
        }
        OutputFormat::Dense => {
            for vector in vectors {
                let line = vector
                    .iter()
                    .map(|w| format!("{w:.6}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Sparse => {
            for vector in vectors {
                let mut line = String::new();
                for (idx, w) in vector.iter().enumerate().filter(|(_, w)| **w != 0.0) {
                    if !line.is_empty() {
                        line.push(' ');
                    }
                    write!(line, "{idx}:{w:.6}")?;
                }
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}

/// `index<TAB>token<TAB>idf`, in index order.
pub fn write_vocabulary<W: Write>(out: &mut W, model: &VocabularyModel) -> Result<()> {
    for (idx, (token, idf)) in model.feature_names().iter().zip(model.idf()).enumerate() {
        writeln!(out, "{idx}\t{token}\t{idf:.6}")?;
    }
    Ok(())
}
