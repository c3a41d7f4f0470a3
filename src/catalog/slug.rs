/**
 * Slug & Read Time
 * URL-safe identifiers derived from titles, reading-time estimates for HTML bodies
 */
use regex::Regex;

/// Average adult reading speed used for estimates
pub const WORDS_PER_MINUTE: usize = 200;

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase word characters separated by single hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9_]+(?:-[a-z0-9_]+)*$").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-{2,}").unwrap();
    static ref TAGS: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref NUMERIC_ENTITY: Regex = Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));").unwrap();
}

/// Derive a slug from a title: "Hello, World!" becomes "hello-world".
pub fn slugify(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    let stripped = NON_WORD.replace_all(&lower, "");
    let hyphenated = WHITESPACE.replace_all(stripped.trim(), "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Plain text of an HTML fragment, whitespace collapsed.
pub fn strip_html(html: &str) -> String {
    let text = TAGS.replace_all(html, " ");
    let text = NUMERIC_ENTITY.replace_all(&text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };
        // invalid code points become U+FFFD
        code.and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string()
    });
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// Minutes needed to read `html`, rounded up, never less than one.
pub fn estimate_read_time(html: &str) -> u32 {
    let words = strip_html(html).split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}
