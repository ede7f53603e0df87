use std::sync::LazyLock;

use regex::Regex;

static COMPARISON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<=|>=|<|>|=|≤|≥|≠|\\le|\\ge|\\ne|\\lt|\\gt").unwrap());
// Alternation puts commands first so `\le` is never read as variable `le`.
static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\[A-Za-z]+|(?P<var>[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*|\[[^\]]*\])*)").unwrap()
});

/// The bounded variable of a comparison bullet: its first identifier,
/// including member and index suffixes (`nums[i]`, `s.length`).
fn bounded_variable(line: &str) -> Option<&str> {
    if !COMPARISON_RE.is_match(line) {
        return None;
    }
    VARIABLE_RE
        .captures_iter(line)
        .find_map(|caps| caps.name("var").map(|m| m.as_str()))
}

fn root_name(variable: &str) -> &str {
    variable
        .split(['.', '['])
        .next()
        .unwrap_or(variable)
}

/// Strip a `~...~` wrapper covering the whole line.
fn unwrap_math(line: &str) -> (&str, bool) {
    match line.strip_prefix('~').and_then(|l| l.strip_suffix('~')) {
        Some(inner) if !inner.contains('~') => (inner.trim(), true),
        _ => (line, false),
    }
}

fn merge(left: &str, right: &str) -> String {
    let (l, l_math) = unwrap_math(left);
    let (r, r_math) = unwrap_math(right);
    if l_math != r_math {
        return format!("{}, {}", left, right);
    }

    let chained = match (bounded_variable(l), bounded_variable(r)) {
        (Some(_), Some(var)) if l.ends_with(var) && r.starts_with(var) => {
            Some(format!("{}{}", l, &r[var.len()..]))
        }
        _ => None,
    };
    let joined = chained.unwrap_or_else(|| format!("{}, {}", l, r));
    if l_math {
        format!("~{}~", joined)
    } else {
        joined
    }
}

/// Coalesce adjacent constraint bullets that bound the same variable.
///
/// `["1 <= n", "n <= 100"]` becomes `["1 <= n <= 100"]`; bullets on
/// `nums.length` and `nums[i]` share the `nums` prefix and are joined with a
/// comma. Prose bullets without a comparison are never merged.
pub fn group_constraints(items: &[String]) -> Vec<String> {
    let mut grouped: Vec<(Option<String>, String)> = Vec::new();

    for item in items {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let root = bounded_variable(unwrap_math(item).0).map(|v| root_name(v).to_string());
        match grouped.last_mut() {
            Some((Some(prev_root), text)) if root.as_deref() == Some(prev_root.as_str()) => {
                *text = merge(text, item);
            }
            _ => grouped.push((root, item.to_string())),
        }
    }

    grouped.into_iter().map(|(_, text)| text).collect()
}
