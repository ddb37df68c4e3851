//! scopekit_options: language options and global environment presets.
//!
//! Parses the `languageOptions` block of a lint configuration (JSON) and
//! provides the registry of named global environments that the scope
//! analyzer merges into the global scope.

mod environments;

pub use environments::{EnvironmentPreset, Environments};
pub use scopekit_ast::SourceType;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid language options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{0}' is not a valid configuration for a global (use 'readonly', 'writable', or 'off')")]
    InvalidGlobalValue(String),
}

/// Per-file language options, matching the `languageOptions` schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageOptions {
    pub source_type: Option<SourceType>,
    /// Enabled environment presets, in priority order.
    pub env: Vec<String>,
    /// Per-name global overrides, in declaration order.
    pub globals: IndexMap<String, GlobalValue>,
    pub implied_strict: bool,
    /// Defaults to `true` for `commonjs` source and `false` otherwise.
    pub global_return: Option<bool>,
}

impl LanguageOptions {
    pub fn from_json(content: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(content)?)
    }

    /// The effective source type of a program parsed as `program`; the
    /// configured value takes precedence.
    pub fn source_type(&self, program: SourceType) -> SourceType {
        self.source_type.unwrap_or(program)
    }

    pub fn is_module(&self, program: SourceType) -> bool {
        self.source_type(program).is_module()
    }

    /// Whether the body of a program parsed as `program` is wrapped in a
    /// function scope.
    pub fn global_return(&self, program: SourceType) -> bool {
        self.global_return
            .unwrap_or(self.source_type(program) == SourceType::CommonJs)
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = Some(source_type);
        self
    }

    pub fn with_env(mut self, name: impl Into<String>) -> Self {
        self.env.push(name.into());
        self
    }

    pub fn with_global(mut self, name: impl Into<String>, value: GlobalValue) -> Self {
        self.globals.insert(name.into(), value);
        self
    }

    pub fn with_implied_strict(mut self, implied_strict: bool) -> Self {
        self.implied_strict = implied_strict;
        self
    }

    pub fn with_global_return(mut self, global_return: bool) -> Self {
        self.global_return = Some(global_return);
        self
    }
}

/// How a configured global may be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GlobalValue {
    #[default]
    Readonly,
    Writable,
    /// Disables the global, including one enabled by a preset.
    Off,
}

impl GlobalValue {
    pub fn as_str(self) -> &'static str {
        match self {
            GlobalValue::Readonly => "readonly",
            GlobalValue::Writable => "writable",
            GlobalValue::Off => "off",
        }
    }

    pub fn is_writable(self) -> bool {
        self == GlobalValue::Writable
    }

    pub fn is_off(self) -> bool {
        self == GlobalValue::Off
    }

    /// Normalize the value of a `/* global name:value */` entry. Unknown
    /// values mean readonly, unlike configuration values which are rejected.
    pub fn from_directive(value: Option<&str>) -> Self {
        match value {
            Some("off") => GlobalValue::Off,
            Some("true" | "writable" | "writeable") => GlobalValue::Writable,
            _ => GlobalValue::Readonly,
        }
    }

    fn from_bool(value: bool) -> Self {
        if value {
            GlobalValue::Writable
        } else {
            GlobalValue::Readonly
        }
    }
}

impl FromStr for GlobalValue {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(GlobalValue::Off),
            "true" | "writable" | "writeable" => Ok(GlobalValue::Writable),
            "false" | "readonly" | "readable" => Ok(GlobalValue::Readonly),
            other => Err(OptionsError::InvalidGlobalValue(other.to_string())),
        }
    }
}

impl fmt::Display for GlobalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GlobalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GlobalValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => Ok(GlobalValue::from_bool(value)),
            Raw::Str(value) => value.parse().map_err(serde::de::Error::custom),
        }
    }
}
