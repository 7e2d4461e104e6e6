//! JPQL tokens and small text helpers shared by the compilers.

pub const SPACE: &str = " ";
pub const PERIOD: &str = ".";
pub const AND: &str = "AND";
pub const IS: &str = "IS";
pub const IS_NOT: &str = "IS NOT";
pub const NULL: &str = "null";
pub const DESC: &str = "DESC";
pub const LIKE: &str = "LIKE";
pub const NOT_LIKE: &str = "NOT LIKE";

/// Separator between `ORDER BY` entries
pub const ORDER_SEPARATOR: &str = " , ";

/// Separator between `SELECT` entries
pub const SELECT_SEPARATOR: &str = ", ";

/// Prefix `name` with `alias.` when an alias is given
pub fn qualify(alias: Option<&str>, name: &str) -> String {
    match alias {
        Some(alias) => format!("{alias}{PERIOD}{name}"),
        None => name.to_string(),
    }
}

/// Strip one pair of surrounding single or double quotes
pub fn unquote(text: &str) -> &str {
    let quoted = text.len() >= 2
        && (text.starts_with('"') || text.starts_with('\''))
        && (text.ends_with('"') || text.ends_with('\''));
    if quoted {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Double embedded quotes and backslash-escape the LIKE wildcards
/// (`\`, `%`, `_`) so the value is safe inside a pattern with `ESCAPE '\'`
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify() {
        assert_eq!(qualify(Some("t"), "Age"), "t.Age");
        assert_eq!(qualify(None, "Age"), "Age");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'42'"), "42");
        assert_eq!(unquote("\"a;b\""), "a;b");
        assert_eq!(unquote("42"), "42");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote("''"), "");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("O'Neil"), "O''Neil");
        assert_eq!(escape_text("50%_off"), "50\\%\\_off");
        assert_eq!(escape_text("a\\b"), "a\\\\b");
    }
}
