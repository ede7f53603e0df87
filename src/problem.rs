use std::fmt;

use tracing::warn;

use crate::error::DaisyError;
use crate::parser::text::to_identifier;

/// A parameter of an authoritative function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

/// A target-language function signature supplied by the judge site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub params: Vec<Param>,
    pub ret: Option<String>,
    /// Supporting items the signature refers to (`ListNode`, `use std::rc::Rc;`),
    /// emitted ahead of the stub.
    pub prelude: Option<String>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "pub fn {}({})", self.name, params)?;
        if let Some(ret) = &self.ret {
            write!(f, " -> {}", ret)?;
        }
        Ok(())
    }
}

/// The uniform record every source produces. Built once through
/// [`ProblemDraft::finish`], read once by the renderer.
#[derive(Debug, Clone)]
pub struct ProblemRecord {
    pub title: String,
    pub description: String,
    pub constraints_header: Option<String>,
    pub constraints: Option<String>,
    pub input_header: String,
    pub input_spec: String,
    pub output_header: String,
    pub output_spec: String,
    pub follow_up: Option<String>,
    pub sample_inputs: Vec<String>,
    pub sample_outputs: Vec<String>,
    pub sample_explanations: Vec<Option<String>>,
    pub function_name: String,
    pub signature: Option<Signature>,
}

impl ProblemRecord {
    pub fn samples(&self) -> impl Iterator<Item = (&str, &str, Option<&str>)> {
        self.sample_inputs
            .iter()
            .zip(&self.sample_outputs)
            .enumerate()
            .map(|(i, (input, output))| {
                let explanation = self.sample_explanations.get(i).and_then(|e| e.as_deref());
                (input.as_str(), output.as_str(), explanation)
            })
    }
}

/// Fields collected by a source before the record's invariants are checked.
#[derive(Debug, Clone, Default)]
pub struct ProblemDraft {
    pub title: String,
    pub description: String,
    pub constraints_header: Option<String>,
    pub constraints: Option<String>,
    pub input_header: String,
    pub input_spec: String,
    pub output_header: String,
    pub output_spec: String,
    pub follow_up: Option<String>,
    pub samples: Vec<(String, String)>,
    pub sample_explanations: Vec<Option<String>>,
    pub signature: Option<Signature>,
}

impl ProblemDraft {
    pub fn finish(self) -> Result<ProblemRecord, DaisyError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DaisyError::Malformed("empty problem title".into()));
        }

        let function_name = match &self.signature {
            Some(sig) => sig.name.clone(),
            None => to_identifier(&title),
        };
        if function_name.is_empty() {
            return Err(DaisyError::EmptyIdentifier(title));
        }

        let mut explanations = self.sample_explanations;
        if explanations.len() > self.samples.len() {
            warn!(
                "{} sample explanations for {} samples, dropping the extra ones",
                explanations.len(),
                self.samples.len()
            );
            explanations.truncate(self.samples.len());
        }
        while explanations.last().is_some_and(Option::is_none) {
            explanations.pop();
        }

        let (sample_inputs, sample_outputs) = self.samples.into_iter().unzip();
        let constraints = self.constraints.filter(|c| !c.trim().is_empty());
        let constraints_header = if constraints.is_some() { self.constraints_header } else { None };

        Ok(ProblemRecord {
            title,
            description: self.description,
            constraints_header,
            constraints,
            input_header: self.input_header,
            input_spec: self.input_spec,
            output_header: self.output_header,
            output_spec: self.output_spec,
            follow_up: self.follow_up,
            sample_inputs,
            sample_outputs,
            sample_explanations: explanations,
            function_name,
            signature: self.signature,
        })
    }
}
