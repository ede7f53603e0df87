use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::Html;

static MATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~(.*?)~").unwrap());
static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\([A-Za-z]+|[,;: !])").unwrap());
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());
static NON_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\W_]+").unwrap());

static CODE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<code[^>]*>(.*?)</code>").unwrap());
static SUP_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<sup[^>]*>(.*?)</sup>").unwrap());
static SUB_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<sub[^>]*>(.*?)</sub>").unwrap());
static BREAK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>").unwrap());

/// Normalize prose: trim every line, rewrite `~...~` math runs, then
/// greedy-wrap each non-empty line to `max_width` columns.
pub fn normalize(raw: &str, max_width: usize) -> String {
    raw.lines()
        .map(|line| {
            let line = MATH_RE.replace_all(line.trim(), |caps: &Captures| rewrite_math(&caps[1]));
            if line.is_empty() {
                String::new()
            } else {
                wrap(&line, max_width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn rewrite_math(content: &str) -> String {
    let substituted = COMMAND_RE.replace_all(content, |caps: &Captures| {
        let symbol = match &caps[1] {
            "le" | "leq" => "≤",
            "ge" | "geq" => "≥",
            "ne" | "neq" => "≠",
            "lt" => "<",
            "gt" => ">",
            "times" => "×",
            "cdot" => "·",
            "dots" | "ldots" => "…",
            "," | ";" | ":" | " " => " ",
            "!" => "",
            _ => return caps[0].to_string(),
        };
        symbol.to_string()
    });

    // Identifiers become inline code; bare numbers stay as they are.
    WORD_RE
        .replace_all(&substituted, |caps: &Captures| {
            let word = &caps[0];
            if word.starts_with(|c: char| c.is_ascii_alphabetic()) {
                format!("`{}`", word)
            } else {
                word.to_string()
            }
        })
        .into_owned()
}

/// Greedy word wrap. A single word longer than `width` gets a line to itself
/// and is never split.
pub fn wrap(line: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Lowercase underscore identifier from a human title. Empty when the title
/// has no word characters; callers must treat that as an error.
pub fn to_identifier(title: &str) -> String {
    NON_IDENT_RE
        .replace_all(&title.trim().to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}

/// Flatten inline HTML (LeetCode statement markup) to plain text.
/// Superscripts become `^x`, subscripts `_x`, and `<code>` spans are
/// backticked when `code_ticks` is set.
pub fn markup_to_text(markup: &str, code_ticks: bool) -> String {
    let mut text = markup.to_string();
    if code_ticks {
        text = CODE_TAG_RE.replace_all(&text, "`$1`").into_owned();
    }
    text = SUP_TAG_RE.replace_all(&text, "^$1").into_owned();
    text = SUB_TAG_RE.replace_all(&text, "_$1").into_owned();
    text = BREAK_TAG_RE.replace_all(&text, "\n").into_owned();

    let fragment = Html::parse_fragment(&text);
    let plain: String = fragment.root_element().text().collect();
    plain
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_comparison() {
        assert_eq!(normalize(r"~n \le 100~", 84), "`n` ≤ 100");
    }

    #[test]
    fn math_substitutions() {
        assert_eq!(
            normalize(r"~1 \le N \times M \ne 0~ and ~a_1, \dots, a_N~", 84),
            "1 ≤ `N` × `M` ≠ 0 and `a_1`, …, `a_N`"
        );
        assert_eq!(normalize(r"~10^9\,+\,7~", 84), "10^9 + 7");
    }

    #[test]
    fn longer_commands_not_split() {
        assert_eq!(normalize(r"~\leq x \geq~", 84), "≤ `x` ≥");
        assert_eq!(normalize(r"~\left( x \right)~", 84), r"\`left`( `x` \`right`)");
    }

    #[test]
    fn text_outside_math_untouched() {
        assert_eq!(normalize(r"print n \le 5", 84), r"print n \le 5");
        assert_eq!(normalize("a ~ lonely tilde", 84), "a ~ lonely tilde");
    }

    #[test]
    fn numbers_after_digits_not_wrapped() {
        assert_eq!(normalize("~2n + x1~", 84), "2n + `x1`");
    }

    #[test]
    fn lines_trimmed_and_blank_kept() {
        assert_eq!(normalize("  first  \n\n   second", 84), "first\n\nsecond");
    }

    #[test]
    fn wraps_to_width() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(6);
        let out = normalize(&text, 20);
        assert!(out.lines().count() > 1);
        for line in out.lines() {
            assert!(line.chars().count() <= 20, "too long: {:?}", line);
        }
    }

    #[test]
    fn long_token_left_whole() {
        let token = "x".repeat(30);
        let out = normalize(&format!("a {} b", token), 10);
        assert_eq!(out, format!("a\n{}\nb", token));
    }

    #[test]
    fn deterministic() {
        let input = "Given ~N~ integers ~a_i~ where ~1 \\le a_i \\le 10^9~, find the largest.";
        assert_eq!(normalize(input, 30), normalize(input, 30));
    }

    #[test]
    fn identifier_from_title() {
        assert_eq!(to_identifier("Two Sum Problem"), "two_sum_problem");
        assert_eq!(to_identifier("  CCC '15 S1 - Zero That Out "), "ccc_15_s1_zero_that_out");
        assert_eq!(to_identifier("a _ b__c"), "a_b_c");
        assert_eq!(to_identifier("_Leading and trailing!_"), "leading_and_trailing");
    }

    #[test]
    fn identifier_idempotent() {
        for title in ["Two Sum", "A -- B", "Ünïcode Títle", "x__y", "3Sum Closest", "(((paren)))"] {
            let once = to_identifier(title);
            assert_eq!(to_identifier(&once), once);
            assert!(!once.contains("__"));
            assert!(!once.starts_with('_') && !once.ends_with('_'));
        }
    }

    #[test]
    fn identifier_empty_without_word_chars() {
        assert_eq!(to_identifier("!!! ???"), "");
        assert_eq!(to_identifier("___"), "");
        assert_eq!(to_identifier(""), "");
    }

    #[test]
    fn markup_flattening() {
        let html = "Given an array <code>nums</code> of size 10<sup>4</sup> &amp; x<sub>i</sub>.";
        assert_eq!(markup_to_text(html, true), "Given an array `nums` of size 10^4 & x_i.");
        assert_eq!(markup_to_text(html, false), "Given an array nums of size 10^4 & x_i.");
    }

    #[test]
    fn markup_breaks_and_entities() {
        assert_eq!(markup_to_text("<code>1 &lt;= n</code>", false), "1 <= n");
        assert_eq!(markup_to_text("a<br/>b", false), "a\nb");
    }
}
