//! The per-file parser contract
//!
//! A [`SourceUnit`] is one parsed source file. The host owns the real tree;
//! the engine only asks the questions and performs the mutations listed
//! here. Paths are always reported with forward slashes.

use serde::{Deserialize, Serialize};

/// Facts about one method of a class-like declaration.
///
/// `guarded_by_parent` is determined by the host's type-resolution layer:
/// it is `true` when the method overrides (or implements) a parent
/// declaration, in which case its staticness must not be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMethodInfo {
    pub name: String,
    pub is_static: bool,
    /// Does the declaration carry an explicit visibility modifier?
    pub has_visibility: bool,
    pub guarded_by_parent: bool,
}

/// One static call site inside a class body.
///
/// `resolved_class` is the host-resolved type of the callee expression
/// (`self::`, `static::`, or an explicit class name), used to decide whether
/// the call targets the declaring class itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticSelfCall {
    /// Host-assigned identifier, valid for `rewrite_static_call`
    pub id: usize,
    pub resolved_class: String,
    pub method: String,
    /// Is the call site itself inside a static method?
    pub in_static_method: bool,
}

/// One `use`-style import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStmt {
    pub name: String,
    pub alias: Option<String>,
}

/// One parsed source file, queryable and mutable in place.
pub trait SourceUnit {
    /// The file's path, forward-slash normalized
    fn path(&self) -> &str;

    /// The file's namespace, if it already has one
    fn namespace(&self) -> Option<&str>;

    /// Inject or replace the file's namespace statement
    fn set_namespace(&mut self, namespace: &str);

    /// Names of class-like declarations (classes, interfaces, traits)
    fn declared_classes(&self) -> Vec<String>;

    /// Every name occurrence in the file: declarations, type hints,
    /// instantiations, static calls, imports, doc-comment references
    fn name_occurrences(&self) -> Vec<String>;

    /// Rename the declaration of `old` to the simple name `new`.
    /// Returns `false` when no such declaration exists.
    fn rename_declaration(&mut self, old: &str, new: &str) -> bool;

    /// Rewrite every non-declaration occurrence of `old` with the
    /// replacement text (usually a fully qualified name). Returns the
    /// number of rewritten occurrences.
    fn rewrite_references(&mut self, old: &str, replacement: &str) -> usize;

    /// Is the named declaration abstract?
    fn is_abstract(&self, class: &str) -> bool;

    /// Strip the abstract modifier from the named declaration
    fn clear_abstract(&mut self, class: &str);

    /// The methods of the named declaration
    fn methods(&self, class: &str) -> Vec<ClassMethodInfo>;

    /// Give the named method explicit public visibility
    fn make_public(&mut self, class: &str, method: &str);

    /// Drop the static modifier from the named method
    fn make_instance_method(&mut self, class: &str, method: &str);

    /// Static call sites within the named declaration's body
    fn static_self_calls(&self, class: &str) -> Vec<StaticSelfCall>;

    /// Rewrite the identified static call into instance-call form
    fn rewrite_static_call(&mut self, call_id: usize);

    /// The file's import statements
    fn imports(&self) -> Vec<ImportStmt>;

    /// Remove un-aliased import statements for `name`
    fn remove_import(&mut self, name: &str);
}
