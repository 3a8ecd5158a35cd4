//! JSON path navigation and field extraction
//!
//! The generic half of the pipeline: given a parsed JSON document, a list
//! of path steps, and a list of field keys, produce a flat sequence of
//! string values in `(element, key)` row-major order. Nothing in here knows
//! about games; the pipeline layers the record semantics on top.

use gamelog_common::{Error, Result};
use serde_json::Value;

/// Soft-miss sentinel: navigation and field lookup resolve missing keys to
/// null rather than failing, mirroring path-style JSON tree access.
static MISSING: Value = Value::Null;

/// Descend `root` one object field per step.
///
/// A step that does not exist (or is applied to a non-object) yields the
/// null sentinel, and every subsequent step keeps yielding it, so the
/// caller sees a single "not found" result instead of an error. Depth is
/// bounded by `steps.len()`, which comes from configuration.
pub fn navigate<'a>(root: &'a Value, steps: &[String]) -> &'a Value {
    let mut node = root;
    for step in steps {
        node = node.get(step).unwrap_or(&MISSING);
    }
    node
}

/// Flatten the requested fields of every element of `target` into one flat
/// sequence, `(element, key)` row-major: element 0's keys in order, then
/// element 1's, and so on. N elements with K keys produce exactly N*K
/// values.
///
/// A non-array target produces an empty sequence (the soft-miss case from
/// [`navigate`] lands here). A missing field, or a field holding a
/// container, becomes the empty string; scalars become their text form.
pub fn extract(target: &Value, keys: &[String]) -> Vec<String> {
    let Some(elements) = target.as_array() else {
        return Vec::new();
    };

    let mut flat = Vec::with_capacity(elements.len() * keys.len());
    for element in elements {
        for key in keys {
            flat.push(value_to_text(element.get(key).unwrap_or(&MISSING)));
        }
    }
    flat
}

/// Scalar-to-text conversion used by [`extract`]: strings pass through
/// without quotes, numbers and booleans render as text, null and
/// containers render as the empty string.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Rebuild records from the flat sequence by reading fixed-size chunks of
/// `arity` values.
///
/// The sequence length must be an exact multiple of the arity; anything
/// else means the extraction and the configured field keys disagree, and
/// silently misaligned records are far worse than a failed run.
pub fn chunk_fields(flat: &[String], arity: usize) -> Result<Vec<Vec<String>>> {
    if arity == 0 {
        return Err(Error::Config("field-key arity must be non-zero".into()));
    }
    if flat.len() % arity != 0 {
        return Err(Error::Config(format!(
            "extracted {} values, not a multiple of the field-key arity {}",
            flat.len(),
            arity
        )));
    }
    Ok(flat.chunks(arity).map(|chunk| chunk.to_vec()).collect())
}
