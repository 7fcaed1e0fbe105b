//! Parser for `key=value,key=value` directive strings.

/// Splits a directive into its `(key, value)` pairs.
///
/// Items are separated by `,` and split on the first `=`.  A backslash
/// takes the next character literally, so `\,` embeds a comma in a value.
/// Empty items are skipped.  An item without `=` is returned as `Err`.
pub fn parse_directive(s: &str) -> Result<Vec<(String, String)>, String> {
    let mut items = Vec::new();
    let mut current = String::new();
    // byte offset of the first unescaped `=` in `current`
    let mut eq = None;
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '=' if eq.is_none() => {
                eq = Some(current.len());
                current.push(c);
            }
            ',' => flush_item(&mut items, &mut current, &mut eq)?,
            c => current.push(c),
        }
    }
    flush_item(&mut items, &mut current, &mut eq)?;

    Ok(items)
}

fn flush_item(
    items: &mut Vec<(String, String)>,
    current: &mut String,
    eq: &mut Option<usize>,
) -> Result<(), String> {
    if current.is_empty() {
        return Ok(());
    }
    let item = std::mem::take(current);
    match eq.take() {
        Some(idx) => {
            items.push((item[..idx].to_string(), item[idx + 1..].to_string()));
            Ok(())
        }
        None => Err(item),
    }
}
