//! Named global environments.

use rustc_hash::FxHashMap;

/// The globals one environment contributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentPreset {
    pub readonly: Vec<String>,
    pub writable: Vec<String>,
}

impl EnvironmentPreset {
    pub fn new<R, W>(readonly: R, writable: W) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        Self {
            readonly: readonly.into_iter().map(Into::into).collect(),
            writable: writable.into_iter().map(Into::into).collect(),
        }
    }

    /// Every name with its writability; readonly names first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.readonly
            .iter()
            .map(|name| (name.as_str(), false))
            .chain(self.writable.iter().map(|name| (name.as_str(), true)))
    }

    pub fn len(&self) -> usize {
        self.readonly.len() + self.writable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readonly.is_empty() && self.writable.is_empty()
    }
}

/// Registry resolving environment names to presets.
#[derive(Debug, Clone, Default)]
pub struct Environments {
    presets: FxHashMap<String, EnvironmentPreset>,
}

const ECMASCRIPT_GLOBALS: &[&str] = &[
    "AggregateError",
    "Array",
    "ArrayBuffer",
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "DataView",
    "Date",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "Error",
    "escape",
    "eval",
    "EvalError",
    "FinalizationRegistry",
    "Float32Array",
    "Float64Array",
    "Function",
    "globalThis",
    "Infinity",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "isFinite",
    "isNaN",
    "JSON",
    "Map",
    "Math",
    "NaN",
    "Number",
    "Object",
    "parseFloat",
    "parseInt",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "undefined",
    "unescape",
    "URIError",
    "WeakMap",
    "WeakRef",
    "WeakSet",
];

const COMMONJS_READONLY: &[&str] = &["global", "module", "require"];
const COMMONJS_WRITABLE: &[&str] = &["exports"];

const NODE_READONLY: &[&str] = &[
    "__dirname",
    "__filename",
    "AbortController",
    "AbortSignal",
    "Buffer",
    "clearImmediate",
    "clearInterval",
    "clearTimeout",
    "console",
    "fetch",
    "global",
    "module",
    "process",
    "queueMicrotask",
    "require",
    "setImmediate",
    "setInterval",
    "setTimeout",
    "structuredClone",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
];
const NODE_WRITABLE: &[&str] = &["exports"];

fn preset(readonly: &[&str], writable: &[&str]) -> EnvironmentPreset {
    EnvironmentPreset::new(readonly.iter().copied(), writable.iter().copied())
}

impl Environments {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `builtin`, `commonjs` and `node` presets.
    pub fn builtin() -> Self {
        let mut envs = Self::new();
        envs.register("builtin", preset(ECMASCRIPT_GLOBALS, &[]));
        envs.register("commonjs", preset(COMMONJS_READONLY, COMMONJS_WRITABLE));
        envs.register("node", preset(NODE_READONLY, NODE_WRITABLE));
        envs
    }

    /// Add or replace a preset.
    pub fn register(&mut self, name: impl Into<String>, preset: EnvironmentPreset) {
        self.presets.insert(name.into(), preset);
    }

    pub fn get(&self, name: &str) -> Option<&EnvironmentPreset> {
        self.presets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
