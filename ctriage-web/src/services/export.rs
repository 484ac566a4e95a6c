//! CSV export of classification results

use csv::{QuoteStyle, WriterBuilder};
use ctriage_common::ClassificationResult;
use std::io::Write;

/// Header row of the exported file
pub const EXPORT_HEADER: [&str; 3] = ["Original Comment", "Category", "Reply Suggestion"];

/// Header row when replies are left out
pub const LABELS_HEADER: [&str; 2] = ["Original Comment", "Category"];

/// Write results as CSV with every field quoted
///
/// Embedded quotes are doubled. The header row is written unquoted.
pub fn write_csv<W: Write>(results: &[ClassificationResult], out: W) -> csv::Result<()> {
    write_records(results, out, true)
}

/// Write only comment and category columns
pub fn write_labels_csv<W: Write>(results: &[ClassificationResult], out: W) -> csv::Result<()> {
    write_records(results, out, false)
}

fn write_records<W: Write>(
    results: &[ClassificationResult],
    mut out: W,
    include_replies: bool,
) -> csv::Result<()> {
    let header: &[&str] = if include_replies {
        &EXPORT_HEADER
    } else {
        &LABELS_HEADER
    };
    writeln!(out, "{}", header.join(","))?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);
    for result in results {
        let text = result.original_text.as_str();
        let category = result.category.as_str();
        if include_replies {
            writer.write_record([text, category, result.reply.as_str()])?;
        } else {
            writer.write_record([text, category])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Render results as a CSV string
pub fn to_csv_string(results: &[ClassificationResult]) -> csv::Result<String> {
    let mut buf = Vec::new();
    write_csv(results, &mut buf)?;
    String::from_utf8(buf).map_err(|e| csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Download file name for an export, e.g. `classified_comments_praise.csv`
pub fn export_file_name(selector: &str) -> String {
    let safe: String = selector
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("classified_comments_{}.csv", safe)
}
