//! Converting raw drill documents into the typed model and back
//!
//! Accepts strict JSON and JSON5 (comments, trailing commas, unquoted keys),
//! since drills arrive both from generators and from hand-edited files.
//! Only shape is checked here; geometry, references and possession are the
//! validator's job.

use crate::models::{Action, Drill};
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Pattern every declared player, gate and mannequin id must match.
pub const ID_PATTERN: &str = r"^[A-Z]+[0-9]*$";

/// Error type for schema failures.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// Input is not JSON/JSON5
    #[error("invalid syntax: {0}")]
    Syntax(String),
    /// Missing field, wrong type or unrecognized enum value
    #[error("invalid drill: {0}")]
    Shape(String),
    /// Declared id does not match [`ID_PATTERN`]
    #[error("invalid {entity} id \"{id}\": expected uppercase letters followed by digits (e.g. A1, GK)")]
    InvalidId { entity: &'static str, id: String },
    /// Drill file could not be read
    #[error("failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    /// Drill could not be converted back to JSON
    #[error("failed to serialize drill: {0}")]
    Serialize(String),
}

fn id_regex() -> Option<&'static Regex> {
    static ID: OnceLock<Option<Regex>> = OnceLock::new();
    ID.get_or_init(|| Regex::new(ID_PATTERN).ok()).as_ref()
}

/// True if `id` is a well-formed entity id.
pub fn is_valid_id(id: &str) -> bool {
    id_regex().is_some_and(|re| re.is_match(id))
}

/// Parse a drill from JSON or JSON5 text.
pub fn parse_str(input: &str) -> Result<Drill, SchemaError> {
    let value: Value = json5::from_str(input).map_err(|e| SchemaError::Syntax(e.to_string()))?;
    parse_value(value)
}

/// Read and parse a drill file.
pub fn parse_file(path: &Path) -> Result<Drill, SchemaError> {
    let input = std::fs::read_to_string(path).map_err(|e| SchemaError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_str(&input)
}

/// Parse a drill from an already-decoded JSON value.
pub fn parse_value(value: Value) -> Result<Drill, SchemaError> {
    if !value.is_object() {
        return Err(SchemaError::Shape("drill must be a JSON object".to_string()));
    }
    let mut drill: Drill =
        serde_json::from_value(value).map_err(|e| SchemaError::Shape(e.to_string()))?;
    uppercase_ids(&mut drill);
    check_ids(&drill)?;
    Ok(drill)
}

/// Ids are case-insensitive: declared ids and action references are stored
/// uppercase so `a1` and `A1` name the same player.
fn uppercase_ids(drill: &mut Drill) {
    let declared = drill
        .players
        .iter_mut()
        .map(|p| &mut p.id)
        .chain(drill.cone_gates.iter_mut().map(|g| &mut g.id))
        .chain(drill.mannequins.iter_mut().map(|m| &mut m.id));
    for id in declared {
        *id = id.to_uppercase();
    }

    for action in &mut drill.actions {
        match action {
            Action::Pass { from_player, to_player } => {
                *from_player = from_player.to_uppercase();
                *to_player = to_player.to_uppercase();
            }
            Action::Run { player, .. } | Action::Shot { player, .. } => {
                *player = player.to_uppercase();
            }
            Action::Dribble { player, through_gate, .. } => {
                *player = player.to_uppercase();
                if let Some(gate) = through_gate {
                    *gate = gate.to_uppercase();
                }
            }
        }
    }
}

fn check_ids(drill: &Drill) -> Result<(), SchemaError> {
    let declared = drill
        .players
        .iter()
        .map(|p| ("player", &p.id))
        .chain(drill.cone_gates.iter().map(|g| ("gate", &g.id)))
        .chain(drill.mannequins.iter().map(|m| ("mannequin", &m.id)));

    for (entity, id) in declared {
        if !is_valid_id(id) {
            return Err(SchemaError::InvalidId { entity, id: id.clone() });
        }
    }
    Ok(())
}

/// Serialize a drill to the JSON value shape accepted by [`parse_value`].
pub fn to_value(drill: &Drill) -> Result<Value, SchemaError> {
    serde_json::to_value(drill).map_err(|e| SchemaError::Serialize(e.to_string()))
}

/// Serialize a drill to pretty-printed JSON, newline terminated.
pub fn to_json(drill: &Drill) -> Result<String, SchemaError> {
    let mut json =
        serde_json::to_string_pretty(drill).map_err(|e| SchemaError::Serialize(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

/// JSON Schema describing the drill document, for generator prompting.
pub fn json_schema() -> Value {
    let schema = schemars::schema_for!(Drill);
    serde_json::to_value(&schema).unwrap_or(Value::Null)
}
