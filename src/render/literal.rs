use serde_json::Value;

use crate::problem::Param;

/// Split an example's input line (`nums = [2,7,11,15], target = 9`) into
/// one raw value per parameter, in parameter order. A lone parameter may
/// also appear as a bare value.
pub fn split_arguments(input: &str, params: &[Param]) -> Option<Vec<String>> {
    let input = input.trim();
    let pieces = split_top_level(input);

    if params.len() == 1 && !pieces.iter().any(|p| p.contains('=')) {
        return Some(vec![input.to_string()]);
    }
    if pieces.len() != params.len() {
        return None;
    }

    pieces
        .iter()
        .zip(params)
        .map(|(piece, param)| {
            let (name, value) = piece.split_once('=')?;
            (name.trim() == param.name).then(|| value.trim().to_string())
        })
        .collect()
}

/// Commas outside brackets and string literals.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' | '(' => depth += 1,
            ']' | '}' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(s[start..].trim());
    parts
}

/// Translate one JSON-like sample value into a Rust expression of type `ty`.
pub fn to_literal(raw: &str, ty: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw.trim()).ok()?;
    literal(&value, ty.trim())
}

fn literal(value: &Value, ty: &str) -> Option<String> {
    if let Some(inner) = ty.strip_prefix("Vec<").and_then(|t| t.strip_suffix('>')) {
        let items = value
            .as_array()?
            .iter()
            .map(|v| literal(v, inner.trim()))
            .collect::<Option<Vec<_>>>()?;
        return Some(format!("vec![{}]", items.join(", ")));
    }

    match ty {
        "i8" => signed::<i8>(value),
        "i16" => signed::<i16>(value),
        "i32" => signed::<i32>(value),
        "i64" => signed::<i64>(value),
        "i128" => signed::<i128>(value),
        "isize" => signed::<isize>(value),
        "u8" => unsigned::<u8>(value),
        "u16" => unsigned::<u16>(value),
        "u32" => unsigned::<u32>(value),
        "u64" => unsigned::<u64>(value),
        "u128" => unsigned::<u128>(value),
        "usize" => unsigned::<usize>(value),
        "f32" | "f64" => value.as_f64().map(|n| format!("{:?}", n)),
        "bool" => value.as_bool().map(|b| b.to_string()),
        "String" => value.as_str().map(|s| format!("String::from({:?})", s)),
        "char" => {
            let s = value.as_str()?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(format!("{:?}", c)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// An integer literal, only when the value fits in `T`.
fn signed<T: TryFrom<i64> + ToString>(value: &Value) -> Option<String> {
    value.as_i64().and_then(|n| T::try_from(n).ok()).map(|n| n.to_string())
}

fn unsigned<T: TryFrom<u64> + ToString>(value: &Value) -> Option<String> {
    value.as_u64().and_then(|n| T::try_from(n).ok()).map(|n| n.to_string())
}
