//! Global binding finalization.
//!
//! Runs once after the walk. Merges environment presets, configured globals
//! and inline `global` directives into the global scope, applies `exported`
//! directives, then resolves the references that were deferred to the
//! global `through` pool and prunes implicit globals that turned out to be
//! declared.

use crate::directives::DirectiveComments;
use crate::manager::ScopeManager;
use crate::scope::ScopeId;
use crate::variable::VariableId;
use rustc_hash::FxHashSet;
use scopekit_core::InternedString;
use scopekit_options::{Environments, GlobalValue, LanguageOptions};
use tracing::{debug, trace};

pub(crate) fn finalize_globals(
    manager: &mut ScopeManager,
    options: &LanguageOptions,
    environments: &Environments,
    directives: &DirectiveComments,
) {
    let overridden: FxHashSet<InternedString> = options
        .globals
        .keys()
        .map(|name| manager.interner.intern(name))
        .collect();

    // Presets, in priority order; the first preset to name a global wins.
    for env in &options.env {
        let Some(preset) = environments.get(env) else {
            debug!(env = %env, "unknown environment preset ignored");
            continue;
        };
        for (name, writable) in preset.iter() {
            let name = manager.interner.intern(name);
            if overridden.contains(&name) || manager.global_scope().variable(name).is_some() {
                continue;
            }
            let value = if writable { GlobalValue::Writable } else { GlobalValue::Readonly };
            let variable = synthetic_global(manager, name);
            let variable = &mut manager.variables[variable.index()];
            variable.writeable = Some(writable);
            variable.implicit_global_setting = Some(value);
        }
    }

    // Configured globals. `off` only suppresses the presets above.
    for (name, &value) in &options.globals {
        if value.is_off() {
            continue;
        }
        let name = manager.interner.intern(name);
        let Some(variable) = configurable_global(manager, name) else {
            continue;
        };
        let variable = &mut manager.variables[variable.index()];
        variable.writeable = Some(value.is_writable());
        variable.implicit_global_setting = Some(value);
        variable.explicit_global = false;
        variable.explicit_global_comments.clear();
    }

    // Inline `global` directives.
    for (&name, global) in &directives.globals {
        if global.value.is_off() {
            continue;
        }
        let Some(variable) = configurable_global(manager, name) else {
            continue;
        };
        let variable = &mut manager.variables[variable.index()];
        variable.writeable = Some(global.value.is_writable());
        variable.explicit_global = true;
        variable.explicit_global_comments = global.comments.clone();
    }

    // Inline `exported` directives never create bindings.
    for name in directives.exported.keys() {
        if let Some(variable) = manager.global_scope().variable(*name) {
            let variable = &mut manager.variables[variable.index()];
            variable.used = true;
            variable.exported = true;
        }
    }

    resolve_through(manager);
    prune_implicit(manager);

    let global = manager.global_scope();
    debug!(
        globals = global.set.len(),
        through = global.through.len(),
        implicit = global.implicit.as_ref().map_or(0, |implicit| implicit.set.len()),
        "finalized globals"
    );
}

/// A fresh variable in the global table, without definitions.
fn synthetic_global(manager: &mut ScopeManager, name: InternedString) -> VariableId {
    let variable = manager.new_variable(ScopeId::GLOBAL, name);
    manager.scopes[ScopeId::GLOBAL.index()].set.insert(name, variable);
    variable
}

/// The global `name` may be configured unless the source declares it.
fn configurable_global(manager: &mut ScopeManager, name: InternedString) -> Option<VariableId> {
    match manager.global_scope().variable(name) {
        Some(variable) if manager.variable(variable).is_declared() => {
            trace!(name = %manager.interner.display(name), "declared in source, configuration skipped");
            None
        }
        Some(variable) => Some(variable),
        None => Some(synthetic_global(manager, name)),
    }
}

/// Resolve deferred references whose name now exists in the global table.
fn resolve_through(manager: &mut ScopeManager) {
    let through = std::mem::take(&mut manager.scopes[ScopeId::GLOBAL.index()].through);
    let mut unresolved = Vec::with_capacity(through.len());
    for reference in through {
        let name = manager.reference(reference).name;
        match manager.global_scope().variable(name) {
            Some(variable) => manager.link(reference, variable),
            None => unresolved.push(reference),
        }
    }
    manager.scopes[ScopeId::GLOBAL.index()].through = unresolved;
}

fn prune_implicit(manager: &mut ScopeManager) {
    let references = &manager.references;
    let global = &mut manager.scopes[ScopeId::GLOBAL.index()];
    let declared = &global.set;
    if let Some(implicit) = global.implicit.as_mut() {
        implicit.set.retain(|name, _| !declared.contains_key(name));
        implicit
            .left
            .retain(|reference| !declared.contains_key(&references[reference.index()].name));
    }
}
