//! Text Sanitizer — ordered structural strips applied to free-text input
//! before it is embedded in a prompt.
//!
//! Every step is pure and total, and each operates on the output of the
//! previous one. Ordering is load-bearing: URLs and emails must go before
//! whitespace collapsing, control characters before the punctuation-run
//! collapse, so later steps cannot resurrect what earlier steps removed.
//! The whole pipeline is idempotent.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_BLOCKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").expect("invalid sanitizer pattern"));

static STYLE_BLOCKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").expect("invalid sanitizer pattern"));

/// Bounded tag match — the `{0,500}` cap keeps an unclosed `<` from scanning
/// the rest of the input.
static MARKUP_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]{0,500}>").expect("invalid sanitizer pattern"));

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("invalid sanitizer pattern"));

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("invalid sanitizer pattern"));

static URLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("invalid sanitizer pattern"));

static EMAILS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[\w.+-]+@[\w-]+\.[a-z]{2,}").expect("invalid sanitizer pattern")
});

static BRACE_TEMPLATES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").expect("invalid sanitizer pattern"));

static PERCENT_TEMPLATES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{%.*?%\}").expect("invalid sanitizer pattern"));

/// Control characters except `\n` (0x0A) and `\t` (0x09).
static CONTROL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("invalid sanitizer pattern")
});

/// Long unbroken base64-alphabet runs — heuristic against encoded-payload
/// smuggling. 60 chars is well past any natural word.
static BASE64_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9+/]{60,}={0,2}").expect("invalid sanitizer pattern"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid sanitizer pattern"));

static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("invalid sanitizer pattern"));

/// Characters whose runs of 4+ collapse to a single occurrence.
const COLLAPSIBLE: &[char] = &[
    '!', '?', '*', '#', '-', '_', '=', '~', '<', '>', '|', '\\',
];

/// Collapses runs of 4 or more identical collapsible characters to one.
/// Hand-rolled: the `regex` crate has no backreferences.
fn collapse_char_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let mut run = 1usize;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        if run >= 4 && COLLAPSIBLE.contains(&c) {
            out.push(c);
        } else {
            for _ in 0..run {
                out.push(c);
            }
        }
    }
    out
}

/// Applies the full strip sequence. Always returns a string, possibly empty.
pub fn sanitize_text(raw: &str) -> String {
    let text = SCRIPT_BLOCKS.replace_all(raw, "");
    let text = STYLE_BLOCKS.replace_all(&text, "");
    let text = MARKUP_TAGS.replace_all(&text, " ");
    let text = FENCED_CODE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = URLS.replace_all(&text, "");
    let text = EMAILS.replace_all(&text, "");
    let text = BRACE_TEMPLATES.replace_all(&text, "");
    let text = PERCENT_TEMPLATES.replace_all(&text, "");
    let text = CONTROL_CHARS.replace_all(&text, "");
    let text = BASE64_RUNS.replace_all(&text, "");
    let text = collapse_char_runs(&text);
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    let text = HORIZONTAL_WS.replace_all(&text, " ");
    text.trim().to_string()
}
