use std::sync::LazyLock;

use regex::Regex;

static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>").unwrap());
static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<strong>(.*?)</strong>").unwrap());
static LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?(?:ul|ol)>").unwrap());
static LI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<li>(.*?)</li>[^\S\n]*\n?").unwrap());
static HSPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());
static EDGE_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\n ?").unwrap());
static BLANKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Render an inner-markup fragment (`p`, `br`, `strong`, `ul`, `ol`, `li`
/// and text) as markdown. Text is expected with `<` and `&` escaped as
/// `&lt;` and `&amp;`; both are restored once the tags are gone.
///
/// Rendering its own output again yields the same string as long as that
/// output holds no literal tag or entity text.
pub fn fragment_to_markdown(html: &str) -> String {
    let s = BR_RE.replace_all(html, "\n");
    let s = s.replace("<p>", "").replace("</p>", "\n");
    let s = STRONG_RE.replace_all(&s, "**$1**");
    let s = LIST_RE.replace_all(&s, "");
    let s = LI_RE.replace_all(&s, "- $1\n");
    let s = s.replace("&lt;", "<").replace("&amp;", "&");

    let s = HSPACE_RE.replace_all(&s, " ");
    let s = EDGE_SPACE_RE.replace_all(&s, "\n");
    let s = BLANKS_RE.replace_all(&s, "\n\n");
    s.trim().to_string()
}
