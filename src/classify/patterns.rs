//! Text matching used at the classification boundary.

/// Boilerplate stripped from the front of a revert reason, in order.
/// Each entry is `(prefix, optional trailing char)`, matched case-insensitively.
const BOILERPLATE_PREFIXES: &[(&str, Option<char>)] = &[
    ("execution reverted:", Some(' ')),
    ("reverted with reason string", Some(' ')),
    ("reverted with custom error", Some(' ')),
];

const LATE_PREFIXES: &[(&str, Option<char>)] = &[
    ("Error:", Some(' ')),
    ("ContractFunctionExecutionError", Some(':')),
];

const CALL_REVERT_PREFIX: &str = "call revert exception";

/// Cleaned reasons outside `(MIN_REASON_LEN, MAX_REASON_LEN)` chars are discarded.
pub const MIN_REASON_LEN: usize = 3;
pub const MAX_REASON_LEN: usize = 200;

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `Code(` with a word boundary before the code and optional whitespace
/// before the parenthesis, as in `TokenNotSupported()` or `Foo (0x12)`.
pub fn has_call_syntax(haystack: &str, code: &str) -> bool {
    haystack.match_indices(code).any(|(start, _)| {
        let bounded = start == 0
            || haystack
                .as_bytes()
                .get(start - 1)
                .is_none_or(|b| !is_word_byte(*b));
        bounded
            && haystack
                .get(start + code.len()..)
                .is_some_and(|rest| rest.trim_start().starts_with('('))
    })
}

/// Structured revert signatures for `code`: call syntax, a quoted name,
/// the `reverted with custom error '..'` form, or `error Code`.
pub fn matches_strict(haystack: &str, code: &str) -> bool {
    has_call_syntax(haystack, code)
        || haystack.contains(&format!("\"{code}\""))
        || haystack.contains(&format!("reverted with custom error '{code}'"))
        || haystack.contains(&format!("error {code}"))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

fn strip_boilerplate<'a>(s: &'a str, prefix: &str, optional: Option<char>) -> &'a str {
    match strip_prefix_ignore_case(s, prefix) {
        Some(rest) => match optional {
            Some(c) => rest.strip_prefix(c).unwrap_or(rest),
            None => rest,
        },
        None => s,
    }
}

/// `call revert exception ... data="0x.."` up to and including the data
/// literal; left untouched when no data literal follows.
fn strip_call_revert(s: &str) -> &str {
    let Some(rest) = strip_prefix_ignore_case(s, CALL_REVERT_PREFIX) else {
        return s;
    };
    let Some(data_at) = rest.find("data=\"") else {
        return s;
    };
    let literal = &rest[data_at + "data=\"".len()..];
    match literal.find('"') {
        Some(close) => &literal[close + 1..],
        None => s,
    }
}

/// Drops a trailing `( .. )` argument list that contains no `)` of its own.
fn strip_trailing_args(s: &str) -> &str {
    let Some(body) = s.strip_suffix(')') else {
        return s;
    };
    let from = body.rfind(')').map_or(0, |p| p + 1);
    match body[from..].find('(') {
        Some(open) => &s[..from + open],
        None => s,
    }
}

fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['\'', '"']).unwrap_or(s);
    s.strip_suffix(['\'', '"']).unwrap_or(s)
}

/// Best-effort human reason from a raw revert string, or `None` when what is
/// left is too short or too long to show.
pub fn clean_reason(source: &str) -> Option<String> {
    let mut s = source;
    for (prefix, optional) in BOILERPLATE_PREFIXES {
        s = strip_boilerplate(s, prefix, *optional);
    }
    s = strip_call_revert(s);
    for (prefix, optional) in LATE_PREFIXES {
        s = strip_boilerplate(s, prefix, *optional);
    }
    let s = strip_quotes(strip_trailing_args(s.trim()).trim());

    let len = s.chars().count();
    (len > MIN_REASON_LEN && len < MAX_REASON_LEN).then(|| s.to_string())
}
