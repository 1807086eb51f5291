//! Input/output key resolution.
//!
//! Callers hand `save_context` raw field maps; these helpers pick which
//! field holds the human utterance and which holds the model reply.
//! One best-effort rule: after reserved fields are excluded, exactly
//! one candidate must remain. An explicit override in the
//! configuration always wins over detection.

use crate::MemoryConfig;
use dcore::{Error, Result};
use std::collections::BTreeMap;

/// Generation-control field never treated as the input.
const STOP_KEY: &str = "stop";

/// Resolve one turn from the caller's raw field maps.
///
/// Returns the human utterance and the model reply. An explicit
/// override that names an absent field is an error; detection does not
/// kick back in for it.
pub(crate) fn resolve_turn<'a>(
    inputs: &'a BTreeMap<String, String>,
    outputs: &'a BTreeMap<String, String>,
    config: &MemoryConfig,
) -> Result<(&'a str, &'a str)> {
    let human = match &config.input_key {
        Some(key) => inputs
            .get(key.as_str())
            .map(String::as_str)
            .ok_or_else(|| Error::MissingKey(key.to_string()))?,
        None => inputs[input_key(inputs, &config.memory_key)?].as_str(),
    };
    let ai = match &config.output_key {
        Some(key) => outputs
            .get(key.as_str())
            .map(String::as_str)
            .ok_or_else(|| Error::MissingKey(key.to_string()))?,
        None => outputs[output_key(outputs)?].as_str(),
    };
    Ok((human, ai))
}

/// Pick the field of `inputs` holding the human utterance.
///
/// The memory key and the reserved `stop` field are excluded; exactly
/// one key must remain.
fn input_key<'a>(inputs: &'a BTreeMap<String, String>, memory_key: &str) -> Result<&'a str> {
    let candidates: Vec<&str> = inputs
        .keys()
        .map(String::as_str)
        .filter(|key| *key != memory_key && *key != STOP_KEY)
        .collect();
    match candidates.as_slice() {
        [key] => Ok(key),
        _ => Err(Error::AmbiguousInputKey(
            candidates.iter().map(ToString::to_string).collect(),
        )),
    }
}

/// Pick the field of `outputs` holding the model reply.
///
/// Without an explicit override the outputs must have exactly one
/// entry.
fn output_key(outputs: &BTreeMap<String, String>) -> Result<&str> {
    let mut keys = outputs.keys();
    match (keys.next(), keys.next()) {
        (Some(key), None) => Ok(key),
        _ => Err(Error::AmbiguousOutputKey(
            outputs.keys().cloned().collect(),
        )),
    }
}
