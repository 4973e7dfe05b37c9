//! Quote-aware field splitting for a single CSV line
//!
//! A minimal grammar: unquoted commas separate fields, a double quote toggles
//! the quoted state, and `""` inside a quoted region is a literal quote.
//! Splitting never fails. An unterminated quote keeps the rest of the line in
//! the current field, which later shows up as a field-count or coercion
//! diagnostic.

/// Split one line into raw cells.
///
/// Always returns at least one field, and one field per unquoted comma plus
/// one, so a trailing comma yields a trailing empty field. Runs in a single
/// forward pass.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::with_capacity(line.len());
    let mut inside_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if inside_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}
