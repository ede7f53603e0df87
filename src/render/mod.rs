pub mod literal;

use tracing::debug;

use crate::error::DaisyError;
use crate::problem::{ProblemRecord, Signature};
use literal::{split_arguments, to_literal};

const TODO_BODY: &str = "todo!(\"pending solution!\")";
const SAMPLE_INDENT: &str = "            ";

/// A generated Cargo project, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub manifest: String,
    pub lib: String,
}

/// Rust items and Cargo packages may not start with a digit.
pub fn rust_identifier(name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("problem_{}", name)
    } else {
        name.to_string()
    }
}

fn comment_lines(text: &str, indent: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                format!("{}//", indent)
            } else {
                format!("{}// {}", indent, line)
            }
        })
        .collect()
}

fn underlined(header: &str, body: &str) -> Vec<String> {
    let mut lines = vec![format!("// {}", header), format!("// {}", "-".repeat(header.chars().count()))];
    lines.extend(comment_lines(body, ""));
    lines
}

/// The annotated `//` header: title, description, then each section with an
/// underlined heading.
pub fn render_header(record: &ProblemRecord) -> String {
    let mut lines = vec![format!("// {}", record.title), "//".to_string()];
    lines.extend(comment_lines(&record.description, ""));
    lines.push("//".to_string());

    if let (Some(header), Some(constraints)) = (&record.constraints_header, &record.constraints) {
        lines.extend(underlined(header, constraints));
        lines.push("//".to_string());
    }

    lines.extend(underlined(&record.input_header, &record.input_spec));
    lines.push("//".to_string());
    lines.extend(underlined(&record.output_header, &record.output_spec));

    if let Some(follow_up) = &record.follow_up {
        lines.push("//".to_string());
        lines.extend(underlined("Follow-up", follow_up));
    }

    lines.push(String::new());
    lines.join("\n")
}

pub fn render_stub(record: &ProblemRecord) -> String {
    match &record.signature {
        Some(sig) => {
            let solution = format!(
                "pub struct Solution;\n\nimpl Solution {{\n    {} {{\n        {}\n    }}\n}}",
                sig, TODO_BODY
            );
            match &sig.prelude {
                Some(prelude) => format!("{}\n\n{}", prelude, solution),
                None => solution,
            }
        }
        None => format!(
            "pub fn {}(input: &str) -> String {{\n    {}\n}}",
            rust_identifier(&record.function_name),
            TODO_BODY
        ),
    }
}

fn test_name(index: usize, total: usize) -> String {
    if total == 1 {
        "example".to_string()
    } else {
        format!("example_{}", index + 1)
    }
}

/// Contents for an `indoc!` string: each line left-stripped, indented to
/// sit under the test body, with quotes and backslashes escaped.
fn indoc_body(sample: &str) -> String {
    sample
        .trim()
        .lines()
        .map(|line| {
            let line = line.trim_start().replace('\\', "\\\\").replace('"', "\\\"");
            if line.is_empty() {
                line
            } else {
                format!("{}{}", SAMPLE_INDENT, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn text_test(name: &str, function: &str, input: &str, output: &str) -> String {
    format!(
        "    #[test]
    fn {name}() {{
        let input = indoc! {{\"
{input}
        \"}};
        let expected = indoc! {{\"
{output}
        \"}};
        assert_eq!({function}(input), expected);
    }}",
        name = name,
        function = function,
        input = indoc_body(input),
        output = indoc_body(output),
    )
}

/// Body lines of a test calling `Solution::<fn>` with translated literals,
/// or `None` when any value cannot be translated.
fn typed_body(sig: &Signature, input: &str, output: &str) -> Option<Vec<String>> {
    let raw_args = split_arguments(input, &sig.params)?;
    let mut lets = Vec::new();
    let mut args = Vec::new();
    let mut mutated = Vec::new();

    for (param, raw) in sig.params.iter().zip(&raw_args) {
        if let Some(inner) = param.ty.strip_prefix("&mut ") {
            lets.push(format!("let mut {} = {};", param.name, to_literal(raw, inner)?));
            args.push(format!("&mut {}", param.name));
            mutated.push((param.name.as_str(), inner.trim()));
        } else {
            args.push(to_literal(raw, &param.ty)?);
        }
    }

    let call = format!("Solution::{}({})", sig.name, args.join(", "));
    let mut body = lets;
    match (&sig.ret, mutated.as_slice()) {
        (Some(ret), _) => body.push(format!("assert_eq!({}, {});", call, to_literal(output, ret)?)),
        (None, [(name, ty)]) => {
            body.push(format!("{};", call));
            body.push(format!("assert_eq!({}, {});", name, to_literal(output, ty)?));
        }
        (None, _) => return None,
    }
    Some(body)
}

fn typed_test(name: &str, sig: &Signature, input: &str, output: &str) -> String {
    let body = typed_body(sig, input, output).unwrap_or_else(|| {
        debug!("{}: sample not translatable for `{}`, leaving it for the user", name, sig);
        let mut body = comment_lines(&format!("Input: {}\nOutput: {}", input.trim(), output.trim()), "");
        body.push("todo!(\"translate this example\");".to_string());
        body
    });
    let body = body
        .iter()
        .map(|line| format!("        {}", line))
        .collect::<Vec<_>>()
        .join("\n");
    format!("    #[test]\n    fn {}() {{\n{}\n    }}", name, body)
}

/// The `#[cfg(test)]` module, one test per sample. `None` when there are no
/// samples. The flag reports whether `indoc` is used.
pub fn render_tests(record: &ProblemRecord) -> Option<(String, bool)> {
    let total = record.sample_inputs.len();
    if total == 0 {
        return None;
    }
    let function = rust_identifier(&record.function_name);

    let tests: Vec<String> = record
        .samples()
        .enumerate()
        .map(|(i, (input, output, explanation))| {
            let name = test_name(i, total);
            let test = match &record.signature {
                Some(sig) => typed_test(&name, sig, input, output),
                None => text_test(&name, &function, input, output),
            };
            match explanation {
                Some(text) => format!("{}\n{}", comment_lines(text, "    ").join("\n"), test),
                None => test,
            }
        })
        .collect();

    let uses_indoc = record.signature.is_none();
    let imports = if uses_indoc { "    use super::*;\n    use indoc::indoc;" } else { "    use super::*;" };
    let module = format!("#[cfg(test)]\nmod tests {{\n{}\n\n{}\n}}", imports, tests.join("\n\n"));
    Some((module, uses_indoc))
}

pub fn render_manifest(name: &str, indoc_version: Option<&str>) -> String {
    let mut manifest = format!(
        "[package]\nname = \"{}\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[dependencies]\n",
        name
    );
    if let Some(version) = indoc_version {
        manifest.push_str(&format!("\n[dev-dependencies]\nindoc = \"{}\"\n", version));
    }
    manifest
}

/// Assemble the whole project for one problem.
pub fn render_project(record: &ProblemRecord, indoc_version: &str) -> Result<Project, DaisyError> {
    if record.function_name.is_empty() {
        return Err(DaisyError::EmptyIdentifier(record.title.clone()));
    }
    let name = rust_identifier(&record.function_name);

    let mut lib = format!("{}\n{}\n", render_header(record), render_stub(record));
    let mut uses_indoc = false;
    if let Some((tests, indoc)) = render_tests(record) {
        lib.push('\n');
        lib.push_str(&tests);
        lib.push('\n');
        uses_indoc = indoc;
    }

    Ok(Project {
        manifest: render_manifest(&name, uses_indoc.then_some(indoc_version)),
        name,
        lib,
    })
}
