//! FILENAME: pivot-engine/src/totals.rs
//! Row totals, the trend column, and footer totals.
//!
//! All arithmetic reads the rendered cell text: a cell that does not parse
//! as a number contributes nothing. Results are written back as text in the
//! general numeric format (`format_general`), which differs from the
//! two-decimal empty-cell text on purpose.

use crate::definition::TotalsMode;
use crate::view::{Footer, TableRow};

/// Parses a cell as a decimal number.
pub fn parse_cell(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Formats a number with the shortest digits that round-trip, switching to
/// exponent form when the decimal exponent is below -4 or at least 6:
/// `37171.02`, `100`, `0.0001`, `1e-05`, `1.234567e+06`.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value == 0.0 {
        return format!("{}0", sign);
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "3.717102e4".
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return format!("{}{}", sign, scientific),
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..6).contains(&exponent) {
        let mut out = String::from(sign);
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        let magnitude = exponent.unsigned_abs();
        if magnitude < 10 {
            out.push('0');
        }
        out.push_str(&magnitude.to_string());
        return out;
    }

    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        format!("{}{}{}", sign, digits, "0".repeat(int_len - digits.len()))
    } else {
        format!("{}{}.{}", sign, &digits[..int_len], &digits[int_len..])
    }
}

/// Numeric row total over the data columns.
///
/// `Sum` adds every parseable cell. `Average` divides the sum of the
/// parseable, non-zero cells by how many there are (zero when none).
pub fn row_total_value(row: &TableRow, data_labels: &[String], mode: TotalsMode) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;

    for label in data_labels {
        if let Some(value) = row.get(label).and_then(|text| parse_cell(text)) {
            if value != 0.0 {
                total += value;
                count += 1;
            }
        }
    }

    match mode {
        TotalsMode::Sum => total,
        TotalsMode::Average if count > 0 => total / count as f64,
        TotalsMode::Average => 0.0,
    }
}

/// Row total rendered for the total column.
pub fn row_total(row: &TableRow, data_labels: &[String], mode: TotalsMode) -> String {
    format_general(row_total_value(row, data_labels, mode))
}

/// Trend cell for a row.
///
/// Placeholder: trend semantics are not defined yet, so the column is always
/// blank. Callers that need a trend compute it themselves.
pub fn trend_value(_row: &TableRow) -> String {
    String::new()
}

/// Footer values for `sum_columns`, plus a blank entry per `extra_columns`.
///
/// `Sum` adds every parseable cell in the column. `Average` divides that sum
/// by the number of parseable cells (zero when none).
pub fn column_totals<'a, I>(
    rows: I,
    sum_columns: &[String],
    extra_columns: &[String],
    mode: TotalsMode,
) -> Footer
where
    I: IntoIterator<Item = &'a TableRow>,
{
    let mut sums = vec![0.0f64; sum_columns.len()];
    let mut counts = vec![0usize; sum_columns.len()];

    for row in rows {
        for (idx, column) in sum_columns.iter().enumerate() {
            if let Some(value) = row.get(column).and_then(|text| parse_cell(text)) {
                sums[idx] += value;
                counts[idx] += 1;
            }
        }
    }

    let mut footer = Footer::new();
    for (idx, column) in sum_columns.iter().enumerate() {
        let value = match mode {
            TotalsMode::Sum => sums[idx],
            TotalsMode::Average if counts[idx] > 0 => sums[idx] / counts[idx] as f64,
            TotalsMode::Average => 0.0,
        };
        footer.insert(column.clone(), format_general(value));
    }

    for column in extra_columns {
        footer.entry(column.clone()).or_default();
    }

    footer
}
