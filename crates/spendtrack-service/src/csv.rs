//! Minimal CSV writing helpers for the export endpoints.
//!
//! Exports are small, flat tables, so the fields are formatted by hand
//! with RFC 4180 quoting rules.

/// Escape a single CSV field.
///
/// Fields containing commas, double quotes, or line breaks are wrapped
/// in double quotes, with embedded quotes doubled.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Append a row of fields to `out`, terminated by CRLF.
pub fn write_row(out: &mut String, fields: &[&str]) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        out.push_str(&escape_field(field));
        first = false;
    }
    out.push_str("\r\n");
}
