//! CSV parsing for binary-labelled datasets.
//!
//! Supported format:
//! - UTF-8, comma-separated
//! - Optional header row (auto-detected: first row is a header if it contains
//!   any non-numeric, non-empty cell)
//! - Double-quoted fields with embedded commas are handled correctly
//! - The last column is the class label and must be 0 or 1; every other
//!   column is a numeric feature.

/// Parses CSV text into per-example feature rows and their 0/1 labels.
///
/// Errors are plain messages; the loader attaches the file path.
pub fn parse_csv(text: &str) -> Result<(Vec<Vec<f64>>, Vec<f64>), String> {
    let mut lines = text.lines().peekable();

    // Auto-detect header: skip first line if any cell is non-numeric.
    if let Some(first) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }

    let mut inputs: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<f64> = Vec::new();

    for (row_idx, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells = parse_csv_row(line);
        let Some((label_cell, feature_cells)) = cells.split_last() else {
            continue;
        };
        if feature_cells.is_empty() {
            return Err(format!(
                "Row {}: expected at least 2 columns (features + label), got {}",
                row_idx + 1,
                cells.len()
            ));
        }

        let feats = parse_floats(feature_cells, row_idx + 1)?;
        let label = parse_label(label_cell, row_idx + 1)?;

        inputs.push(feats);
        labels.push(label);
    }

    if inputs.is_empty() {
        return Err("CSV contains no data rows after parsing".into());
    }

    // Verify all rows have the same feature width.
    let n_feats = inputs[0].len();
    for (i, row) in inputs.iter().enumerate() {
        if row.len() != n_feats {
            return Err(format!(
                "Row {}: feature count {} does not match first row's {}",
                i + 1, row.len(), n_feats
            ));
        }
    }

    Ok((inputs, labels))
}

/// Returns `true` if the row looks like a header (any cell non-numeric).
fn is_header(line: &str) -> bool {
    let cells = parse_csv_row(line);
    cells.iter().any(|c| {
        let t = c.trim();
        !t.is_empty() && t.parse::<f64>().is_err()
    })
}

/// Parses a single CSV row, handling double-quoted fields.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Escaped quote inside quoted field.
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn parse_floats(cells: &[String], row_num: usize) -> Result<Vec<f64>, String> {
    cells.iter()
        .map(|c| {
            let t = c.trim();
            match t.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(format!("Row {}: '{}' is not a valid number", row_num, t)),
            }
        })
        .collect()
}

fn parse_label(cell: &str, row_num: usize) -> Result<f64, String> {
    match cell.trim().parse::<f64>() {
        Ok(v) if v == 0.0 || v == 1.0 => Ok(v),
        _ => Err(format!("Row {}: label '{}' must be 0 or 1", row_num, cell.trim())),
    }
}
