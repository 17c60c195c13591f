//! In-memory stand-ins for the host collaborators.
//!
//! [`InMemorySourceUnit`] models a parsed file as plain data so engine
//! tests can assert on declarations, references, namespaces, and imports
//! without a real parser behind them.

use nsm_ast_api::{
    ClassMethodInfo, FileMover, ImportStmt, ReferenceRenamer, SourceUnit, StaticSelfCall,
};
use nsm_foundation::model::FileMoveIntent;
use std::collections::BTreeMap;

/// One class-like declaration inside an [`InMemorySourceUnit`].
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub is_abstract: bool,
    pub methods: Vec<ClassMethodInfo>,
    pub static_calls: Vec<StaticSelfCall>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            methods: Vec::new(),
            static_calls: Vec::new(),
        }
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_method(mut self, method: ClassMethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_static_call(mut self, call: StaticSelfCall) -> Self {
        self.static_calls.push(call);
        self
    }
}

/// Shorthand for building a [`ClassMethodInfo`].
pub fn method(
    name: impl Into<String>,
    is_static: bool,
    has_visibility: bool,
    guarded_by_parent: bool,
) -> ClassMethodInfo {
    ClassMethodInfo {
        name: name.into(),
        is_static,
        has_visibility,
        guarded_by_parent,
    }
}

/// Shorthand for building a [`StaticSelfCall`].
pub fn static_call(
    id: usize,
    resolved_class: impl Into<String>,
    method: impl Into<String>,
    in_static_method: bool,
) -> StaticSelfCall {
    StaticSelfCall {
        id,
        resolved_class: resolved_class.into(),
        method: method.into(),
        in_static_method,
    }
}

/// A parsed file held entirely in memory, built fluently.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceUnit {
    path: String,
    namespace: Option<String>,
    classes: Vec<ClassDecl>,
    references: Vec<String>,
    imports: Vec<ImportStmt>,
    rewritten_calls: Vec<usize>,
}

impl InMemorySourceUnit {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_class(mut self, class: ClassDecl) -> Self {
        self.classes.push(class);
        self
    }

    /// Add a non-declaration occurrence of a name.
    pub fn with_reference(mut self, name: impl Into<String>) -> Self {
        self.references.push(name.into());
        self
    }

    pub fn with_import(mut self, name: impl Into<String>, alias: Option<&str>) -> Self {
        self.imports.push(ImportStmt {
            name: name.into(),
            alias: alias.map(str::to_string),
        });
        self
    }

    /// The current non-declaration occurrences, in insertion order.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|class| class.name == name)
    }

    /// Ids of static calls converted to instance-call form.
    pub fn rewritten_calls(&self) -> &[usize] {
        &self.rewritten_calls
    }
}

impl SourceUnit for InMemorySourceUnit {
    fn path(&self) -> &str {
        &self.path
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn set_namespace(&mut self, namespace: &str) {
        self.namespace = Some(namespace.to_string());
    }

    fn declared_classes(&self) -> Vec<String> {
        self.classes.iter().map(|class| class.name.clone()).collect()
    }

    fn name_occurrences(&self) -> Vec<String> {
        let mut names: Vec<String> = self.references.clone();
        names.extend(self.imports.iter().map(|import| import.name.clone()));
        names.extend(self.classes.iter().map(|class| class.name.clone()));
        names
    }

    fn rename_declaration(&mut self, old: &str, new: &str) -> bool {
        match self.classes.iter_mut().find(|class| class.name == old) {
            Some(class) => {
                class.name = new.to_string();
                true
            }
            None => false,
        }
    }

    fn rewrite_references(&mut self, old: &str, replacement: &str) -> usize {
        let mut rewritten = 0;
        for reference in &mut self.references {
            if reference == old {
                *reference = replacement.to_string();
                rewritten += 1;
            }
        }
        rewritten
    }

    fn is_abstract(&self, class: &str) -> bool {
        self.class(class).is_some_and(|class| class.is_abstract)
    }

    fn clear_abstract(&mut self, class: &str) {
        if let Some(class) = self.classes.iter_mut().find(|c| c.name == class) {
            class.is_abstract = false;
        }
    }

    fn methods(&self, class: &str) -> Vec<ClassMethodInfo> {
        self.class(class)
            .map(|class| class.methods.clone())
            .unwrap_or_default()
    }

    fn make_public(&mut self, class: &str, method: &str) {
        if let Some(class) = self.classes.iter_mut().find(|c| c.name == class) {
            if let Some(method) = class.methods.iter_mut().find(|m| m.name == method) {
                method.has_visibility = true;
            }
        }
    }

    fn make_instance_method(&mut self, class: &str, method: &str) {
        if let Some(class) = self.classes.iter_mut().find(|c| c.name == class) {
            if let Some(method) = class.methods.iter_mut().find(|m| m.name == method) {
                method.is_static = false;
            }
        }
    }

    fn static_self_calls(&self, class: &str) -> Vec<StaticSelfCall> {
        self.class(class)
            .map(|class| class.static_calls.clone())
            .unwrap_or_default()
    }

    fn rewrite_static_call(&mut self, call_id: usize) {
        self.rewritten_calls.push(call_id);
    }

    fn imports(&self) -> Vec<ImportStmt> {
        self.imports.clone()
    }

    fn remove_import(&mut self, name: &str) {
        self.imports
            .retain(|import| import.name != name || import.alias.is_some());
    }
}

/// A file mover that records every planned move.
#[derive(Debug, Default)]
pub struct RecordingFileMover {
    pub moves: Vec<FileMoveIntent>,
}

impl FileMover for RecordingFileMover {
    fn move_file(&mut self, intent: FileMoveIntent) {
        self.moves.push(intent);
    }
}

/// A reference renamer that substitutes each map entry textually.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapReferenceRenamer;

impl ReferenceRenamer for MapReferenceRenamer {
    fn rename_occurrences(
        &self,
        unit: &mut dyn SourceUnit,
        map: &BTreeMap<String, String>,
    ) -> usize {
        let mut rewritten = 0;
        for (legacy, canonical) in map {
            rewritten += unit.rewrite_references(legacy, canonical);
        }
        rewritten
    }
}
