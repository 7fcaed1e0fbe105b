/// Splits `s` on `sep`, honoring quoting.
///
/// Single or double quotes group text (separators included) and are
/// stripped from the result.  A backslash takes the next character
/// literally.  Empty segments are dropped.
pub fn split_quoted(s: &str, sep: char) -> Vec<String> {
    let mut rv = Vec::new();
    let mut current = String::new();
    let mut quote = None;
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        match (c, quote) {
            ('\\', _) => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            (c, Some(q)) if c == q => quote = None,
            ('\'', None) | ('"', None) => quote = Some(c),
            (c, None) if c == sep => {
                if !current.is_empty() {
                    rv.push(std::mem::take(&mut current));
                }
            }
            (c, _) => current.push(c),
        }
    }

    if !current.is_empty() {
        rv.push(current);
    }
    rv
}

#[test]
fn test_split_quoted() {
    assert_eq!(split_quoted("a:1;b:2", ';'), vec!["a:1", "b:2"]);
    assert_eq!(split_quoted("a:'x;y';b:2", ';'), vec!["a:x;y", "b:2"]);
    assert_eq!(split_quoted("a:\"it's\";b", ';'), vec!["a:it's", "b"]);
    assert_eq!(split_quoted("a:x\\;y", ';'), vec!["a:x;y"]);
    assert_eq!(split_quoted(";;a:1;", ';'), vec!["a:1"]);
    assert!(split_quoted("", ';').is_empty());
}
