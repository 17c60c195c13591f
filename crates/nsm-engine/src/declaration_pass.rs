//! First-pass rewriting of a single file's declarations.
//!
//! For every class-like declaration and name occurrence in a file, the pass
//! derives the canonical identity, renames the declaration to its canonical
//! simple name, injects the namespace, rewrites same-file references to
//! fully qualified form, plans the file move, and records the rename in the
//! map store for the second pass.
//!
//! Files under the HTML helper folder additionally get their staticness
//! normalized: abstract modifiers stripped, static methods converted to
//! instance methods, and local static self-calls rewritten.

use crate::map_store::RenameMapStore;
use crate::name_derivation::NamingFamily;
use crate::path_classifier::application_side;
use crate::relocation::plan_move;
use nsm_ast_api::{FileMover, SourceUnit};
use nsm_foundation::error::{MigrateError, MigrateResult};
use nsm_foundation::model::{ApplicationSide, CanonicalIdentity, LegacyPrefixRule};
use std::collections::BTreeSet;
use tracing::debug;

/// A successful derivation, remembering which rule produced it.
struct Derived<'r> {
    identity: CanonicalIdentity,
    rule: &'r LegacyPrefixRule,
}

/// Try every rule and family in order; the first derivation wins.
fn derive_name<'r>(
    rules: &'r [LegacyPrefixRule],
    name: &str,
    side: ApplicationSide,
    path: &str,
    first_pass: bool,
) -> Option<Derived<'r>> {
    for rule in rules {
        for family in NamingFamily::ALL {
            if !family.path_gate(path) {
                continue;
            }
            if !family.matches(name, &rule.prefix) {
                continue;
            }
            if let Some(identity) = family.derive(name, rule, side, path, first_pass) {
                return Some(Derived { identity, rule });
            }
        }
    }
    None
}

/// Drives the first traversal over one file at a time.
pub struct DeclarationRewritePass<'a> {
    rules: &'a [LegacyPrefixRule],
    store: &'a mut RenameMapStore,
}

impl<'a> DeclarationRewritePass<'a> {
    pub fn new(rules: &'a [LegacyPrefixRule], store: &'a mut RenameMapStore) -> Self {
        Self { rules, store }
    }

    /// Rewrite one file's declarations. Returns whether anything changed.
    ///
    /// Deriving two different non-empty namespaces within the file is the
    /// fatal [`MigrateError::AmbiguousNamespace`]; changes applied to the
    /// file before the conflict was discovered are not rolled back.
    pub fn run(
        &mut self,
        unit: &mut dyn SourceUnit,
        mover: &mut dyn FileMover,
    ) -> MigrateResult<bool> {
        let rules = self.rules;
        let path = unit.path().to_string();
        let first_pass = unit.namespace().is_none();
        let side = application_side(&path);
        let mut changed = false;

        // Staticness normalization applies to every class under the HTML
        // helper folder, renamed or not.
        if NamingFamily::HtmlHelper.path_gate(&path) {
            for class in unit.declared_classes() {
                changed |= normalize_staticness(unit, &class);
            }
        }

        // The namespace root (common prefix + side) every derivation in
        // this file must agree on, and the full namespace injected into
        // the file by its declarations.
        let mut file_root: Option<String> = None;
        let mut file_namespace: Option<String> = None;

        for class in unit.declared_classes() {
            let Some(derived) = derive_name(rules, &class, side, &path, first_pass) else {
                continue;
            };

            let root = format!("{}\\{}", derived.rule.target_namespace, side.label());
            note_namespace(&mut file_root, root, &path)?;
            let namespace = derived.identity.namespace_str();
            note_namespace(&mut file_namespace, namespace, &path)?;

            unit.rename_declaration(&class, &derived.identity.simple_name);
            self.store
                .add_identity(&class, &derived.identity, &derived.rule.target_namespace);

            if let Some(intent) = plan_move(
                &derived.identity.fqn(),
                &derived.rule.target_namespace,
                &path,
            ) {
                debug!(from = %intent.from_path, to = %intent.to_path, "planned file move");
                mover.move_file(intent);
            }

            debug!(path = %path, legacy = %class, canonical = %derived.identity.fqn(), "renamed declaration");
            changed = true;
        }

        if first_pass {
            if let Some(namespace) = &file_namespace {
                unit.set_namespace(namespace);
                changed = true;
            }
        }

        // Remaining occurrences are references; they become fully
        // qualified so they survive the namespace injection.
        let occurrences: BTreeSet<String> = unit.name_occurrences().into_iter().collect();
        for name in occurrences {
            let Some(derived) = derive_name(rules, &name, side, &path, first_pass) else {
                continue;
            };

            let root = format!("{}\\{}", derived.rule.target_namespace, side.label());
            note_namespace(&mut file_root, root, &path)?;

            if unit.rewrite_references(&name, &derived.identity.fqn()) > 0 {
                changed = true;
            }
        }

        Ok(changed)
    }
}

/// Enforce "one namespace per file": the second distinct non-empty value is
/// an unrecoverable consistency error, never silently resolved.
fn note_namespace(
    slot: &mut Option<String>,
    value: String,
    path: &str,
) -> MigrateResult<()> {
    match slot {
        Some(existing) if *existing != value => Err(MigrateError::ambiguous_namespace(
            path,
            existing.clone(),
            value,
        )),
        Some(_) => Ok(()),
        None => {
            *slot = Some(value);
            Ok(())
        }
    }
}

/// Convert an HTML helper class from the legacy all-static shape to the
/// instance-based service shape.
fn normalize_staticness(unit: &mut dyn SourceUnit, class: &str) -> bool {
    let mut changed = false;

    if unit.is_abstract(class) {
        unit.clear_abstract(class);
        changed = true;
    }

    let methods = unit.methods(class);
    for method in &methods {
        if !method.is_static {
            continue;
        }
        if !method.has_visibility {
            unit.make_public(class, &method.name);
            changed = true;
        }
        // Staticness is part of the inherited contract; leave overrides be.
        if method.guarded_by_parent {
            continue;
        }
        unit.make_instance_method(class, &method.name);
        changed = true;
    }

    for call in unit.static_self_calls(class) {
        // Only calls that provably target this very class, from non-static
        // context, become instance calls.
        if call.resolved_class != class {
            continue;
        }
        if call.in_static_method {
            continue;
        }
        if !methods.iter().any(|method| method.name == call.method) {
            continue;
        }
        unit.rewrite_static_call(call.id);
        changed = true;
    }

    changed
}
