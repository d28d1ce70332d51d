//! Quote-aware CSV tokenizer shared by the listing and quote providers.
//!
//! Both upstream payloads are loosely formatted CSV: values containing the
//! delimiter are wrapped in double quotes, but there is no escape sequence
//! for an embedded quote character. The scanner below reproduces that
//! dialect exactly rather than the RFC 4180 one.

/// Delimiter used when the caller does not specify one.
pub const DEFAULT_DELIMITER: char = ',';

/// Split raw CSV text into rows of trimmed cells.
///
/// Line endings are normalized first: carriage returns become line feeds,
/// doubled line feeds are collapsed in a single left-to-right pass, and one
/// trailing line feed is dropped. A `"` toggles the in-quote state without
/// being copied; the delimiter only ends a cell outside a quoted span.
///
/// The first empty line terminates row collection: anything after it is
/// not processed.
pub fn tokenize(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let normalized = text.replace('\r', "\n").replace("\n\n", "\n");
    let normalized = normalized.strip_suffix('\n').unwrap_or(&normalized);

    let mut rows = Vec::new();
    for line in normalized.split('\n') {
        if line.is_empty() {
            break;
        }

        let mut row = Vec::new();
        let mut buffer = String::new();
        let mut in_quotes = false;
        for c in line.chars() {
            if c == '"' {
                in_quotes = !in_quotes;
            } else if in_quotes || c != delimiter {
                buffer.push(c);
            } else {
                row.push(buffer.trim().to_string());
                buffer.clear();
            }
        }
        // Flush the last cell of the row.
        row.push(buffer.trim().to_string());
        rows.push(row);
    }

    rows
}
