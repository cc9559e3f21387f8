//! Typed named tunables
//!
//! Gameplay balance lives outside the code as `name,type,value` rows (or a
//! flat JSON object). Names are case-insensitive. The store is read-only for
//! the simulation: every tunable is resolved once at construction and a
//! missing or mistyped name is a hard startup error, never a mid-game one.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells in one CSV row
const CSV_CELLS: usize = 3;

const TYPE_BOOL: &str = "boolean";
const TYPE_UINT: &str = "uint";
const TYPE_INT: &str = "int";
const TYPE_FLOAT: &str = "float";
const TYPE_DOUBLE: &str = "double";
const TYPE_STRING: &str = "string";

/// A typed variable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    UInt(u32),
    Int(i64),
    Float(f32),
    Str(String),
}

/// Errors raised while loading or resolving variables
#[derive(Debug)]
pub enum VarError {
    /// A CSV row does not have exactly `name,type,value`
    CellCount { line: usize, found: usize },
    /// A CSV row has an empty name, type, or value cell
    EmptyCell { line: usize, cell: &'static str },
    /// The same name was defined twice
    Duplicate { line: usize, name: String },
    /// The type cell is not one of the allowed type names
    UnknownType { line: usize, type_name: String },
    /// The value cell does not parse as the declared type
    BadValue { line: usize, name: String },
    /// The JSON text is not a flat object of scalar values
    Json(serde_json::Error),
    /// A required variable is absent from the store
    Missing(String),
    /// The variable exists but holds a different type
    WrongType { name: String, expected: &'static str },
}

impl fmt::Display for VarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarError::CellCount { line, found } => {
                write!(f, "variable at line {line} has {found} cells, expected {CSV_CELLS}")
            }
            VarError::EmptyCell { line, cell } => {
                write!(f, "variable at line {line} has an empty {cell}")
            }
            VarError::Duplicate { line, name } => {
                write!(f, "variable {name} at line {line} already exists")
            }
            VarError::UnknownType { line, type_name } => {
                write!(f, "variable at line {line} uses unknown type {type_name}")
            }
            VarError::BadValue { line, name } => {
                write!(f, "variable {name} at line {line} has an unparseable value")
            }
            VarError::Json(e) => write!(f, "variable JSON: {e}"),
            VarError::Missing(name) => write!(f, "required variable {name} is missing"),
            VarError::WrongType { name, expected } => {
                write!(f, "variable {name} is not of type {expected}")
            }
        }
    }
}

impl std::error::Error for VarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VarError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for VarError {
    fn from(e: serde_json::Error) -> Self {
        VarError::Json(e)
    }
}

/// Registry of named, typed configuration values
#[derive(Debug, Clone, Default)]
pub struct VarStore {
    vars: HashMap<String, Value>,
}

impl VarStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `name,type,value` rows. Blank lines are skipped. Types:
    /// `boolean`, `uint`, `int`, `float`, `double`, `string`.
    pub fn from_csv_str(text: &str) -> Result<Self, VarError> {
        let mut store = Self::new();

        for (line, row) in text.lines().enumerate() {
            if row.trim().is_empty() {
                continue;
            }

            let cells: Vec<&str> = row.split(',').map(str::trim).collect();
            if cells.len() != CSV_CELLS {
                return Err(VarError::CellCount { line, found: cells.len() });
            }

            let (name, type_name, value) = (cells[0], cells[1], cells[2]);
            if name.is_empty() {
                return Err(VarError::EmptyCell { line, cell: "name" });
            }
            if type_name.is_empty() {
                return Err(VarError::EmptyCell { line, cell: "type" });
            }
            if value.is_empty() {
                return Err(VarError::EmptyCell { line, cell: "value" });
            }

            let key = name.to_lowercase();
            if store.vars.contains_key(&key) {
                return Err(VarError::Duplicate { line, name: name.to_string() });
            }

            let bad = || VarError::BadValue { line, name: name.to_string() };
            let parsed = match type_name {
                TYPE_BOOL => Value::Bool(value.parse().map_err(|_| bad())?),
                TYPE_UINT => Value::UInt(value.parse().map_err(|_| bad())?),
                TYPE_INT => Value::Int(value.parse().map_err(|_| bad())?),
                TYPE_FLOAT | TYPE_DOUBLE => Value::Float(value.parse().map_err(|_| bad())?),
                TYPE_STRING => Value::Str(value.to_string()),
                _ => {
                    return Err(VarError::UnknownType {
                        line,
                        type_name: type_name.to_string(),
                    });
                }
            };
            store.vars.insert(key, parsed);
        }

        Ok(store)
    }

    /// Parse a flat JSON object of scalar values
    pub fn from_json_str(text: &str) -> Result<Self, VarError> {
        let raw: HashMap<String, Value> = serde_json::from_str(text)?;
        let mut store = Self::new();
        for (name, value) in raw {
            store.set(&name, value);
        }
        Ok(store)
    }

    /// Insert or replace a variable
    pub fn set(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_lowercase(), value);
    }

    /// Insert a default only if the name is not yet present
    pub fn register(&mut self, name: &str, default: Value) {
        self.vars.entry(name.to_lowercase()).or_insert(default);
    }

    /// Case-insensitive lookup
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.vars.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn resolve(&self, name: &str) -> Result<&Value, VarError> {
        self.variable(name).ok_or_else(|| VarError::Missing(name.to_string()))
    }

    /// Unsigned integer accessor; accepts non-negative `int` values too
    pub fn uint(&self, name: &str) -> Result<u32, VarError> {
        match self.resolve(name)? {
            Value::UInt(v) => Ok(*v),
            Value::Int(v) if *v >= 0 => Ok(*v as u32),
            _ => Err(VarError::WrongType { name: name.to_string(), expected: TYPE_UINT }),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64, VarError> {
        match self.resolve(name)? {
            Value::Int(v) => Ok(*v),
            Value::UInt(v) => Ok(i64::from(*v)),
            _ => Err(VarError::WrongType { name: name.to_string(), expected: TYPE_INT }),
        }
    }

    /// Float accessor; integer values coerce (JSON numbers and CSV `uint`
    /// rows are common sources for speeds)
    pub fn float(&self, name: &str) -> Result<f32, VarError> {
        match self.resolve(name)? {
            Value::Float(v) => Ok(*v),
            Value::UInt(v) => Ok(*v as f32),
            Value::Int(v) => Ok(*v as f32),
            _ => Err(VarError::WrongType { name: name.to_string(), expected: TYPE_FLOAT }),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, VarError> {
        match self.resolve(name)? {
            Value::Bool(v) => Ok(*v),
            _ => Err(VarError::WrongType { name: name.to_string(), expected: TYPE_BOOL }),
        }
    }

    pub fn string(&self, name: &str) -> Result<&str, VarError> {
        match self.resolve(name)? {
            Value::Str(v) => Ok(v),
            _ => Err(VarError::WrongType { name: name.to_string(), expected: TYPE_STRING }),
        }
    }
}
