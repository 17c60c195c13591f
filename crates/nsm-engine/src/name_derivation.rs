//! Canonical name derivation: legacy class name → namespaced identity.
//!
//! The legacy convention packs everything into the class name
//! (`ExampleModelFoobar`) and the file location (`admin/models/foobar.php`).
//! Derivation unpacks both into a canonical fully qualified name
//! (`Acme\Example\Administrator\Model\FoobarModel`).
//!
//! Every rule here is a pure function over its inputs; identical inputs
//! always yield identical output, and "no rewrite" is expressed as `None`.

use crate::path_classifier;
use nsm_foundation::model::{ApplicationSide, CanonicalIdentity, LegacyPrefixRule};

/// The straightforward legacy suffixes, tried in this order
const LEGACY_SUFFIXES: [&str; 4] = ["Controller", "Model", "Table", "Helper"];

/// The naming families the engine recognizes, dispatched through a single
/// derivation table instead of a rule-class hierarchy.
///
/// The path gate is a property of the family: marker families only apply to
/// files under their conventional folder, everything else applies anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingFamily {
    Controller,
    Model,
    Table,
    Helper,
    View,
    HtmlHelper,
    FormRule,
    FormField,
}

impl NamingFamily {
    pub const ALL: [NamingFamily; 8] = [
        NamingFamily::Controller,
        NamingFamily::Model,
        NamingFamily::Table,
        NamingFamily::Helper,
        NamingFamily::View,
        NamingFamily::HtmlHelper,
        NamingFamily::FormRule,
        NamingFamily::FormField,
    ];

    /// Does `name` belong to this family under the given component prefix?
    pub fn matches(&self, name: &str, prefix: &str) -> bool {
        match self {
            Self::Controller => starts_with_joined(name, prefix, "Controller"),
            Self::Model => starts_with_joined(name, prefix, "Model"),
            Self::Table => starts_with_joined(name, prefix, "Table"),
            Self::Helper => {
                starts_with_joined(name, prefix, "Helper")
                    || (name.starts_with(prefix)
                        && name.len() > prefix.len()
                        && name.ends_with("Helper"))
            }
            Self::View => starts_with_joined(name, prefix, "View"),
            Self::HtmlHelper => name
                .get(..5)
                .is_some_and(|head| head.eq_ignore_ascii_case("jhtml")),
            Self::FormRule => name.starts_with("JFormRule"),
            Self::FormField => name.starts_with("JFormField"),
        }
    }

    /// Is this family applicable to a file at `path`?
    ///
    /// Marker families are bound to their conventional folder: HTML helpers
    /// live immediately under `helpers/html`, form rules under
    /// `models/rules`, form fields under `models/fields`.
    pub fn path_gate(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        match self {
            Self::HtmlHelper => {
                let bits: Vec<&str> = normalized.split('/').collect();
                bits.len() >= 3 && bits[bits.len() - 3..bits.len() - 1] == ["helpers", "html"]
            }
            Self::FormRule => normalized.contains("/models/rules/"),
            Self::FormField => normalized.contains("/models/fields/"),
            _ => true,
        }
    }

    /// Derive the canonical identity for a name of this family.
    pub fn derive(
        &self,
        legacy_name: &str,
        rule: &LegacyPrefixRule,
        side: ApplicationSide,
        file_path: &str,
        first_pass: bool,
    ) -> Option<CanonicalIdentity> {
        match self {
            Self::Controller | Self::Model | Self::Table | Self::Helper | Self::View => {
                derive_canonical_name(legacy_name, rule, side, file_path, first_pass)
            }
            // The working prefix of the marker families comes from the name
            // itself (`JHtml`, `JForm`), not from the configured component
            // prefix.
            Self::HtmlHelper => derive_canonical_name(legacy_name, rule, side, file_path, first_pass),
            Self::FormRule => derive_marker_suffix(legacy_name, rule, side, "Rule"),
            Self::FormField => derive_marker_suffix(legacy_name, rule, side, "Field"),
        }
    }
}

/// Convert a legacy class name to its canonical namespaced identity.
///
/// `None` means "leave unchanged": the name matches no recognized pattern,
/// is excluded by the rule, or is an exact base-class name that only gets a
/// canonical leaf on the first pass over an unnamespaced file.
///
/// Precedence:
/// 1. exact `<prefix><suffix>` names (`ExampleController` becomes the
///    display controller, `ExampleHelper` doubles the prefix; `Model` and
///    `Table` stay put)
/// 2. the case-insensitive `JHTML` prefix, rewritten under `Service\Html`
/// 3. the generic suffix rule (`ExampleModelFoobar` → `FoobarModel`),
///    with the trailing-`Helper` transposition
/// 4. the view rule, deriving the leaf from the `view.<layout>.php` file name
pub fn derive_canonical_name(
    legacy_name: &str,
    rule: &LegacyPrefixRule,
    side: ApplicationSide,
    file_path: &str,
    first_pass: bool,
) -> Option<CanonicalIdentity> {
    if legacy_name.is_empty() || rule.is_excluded(legacy_name) {
        return None;
    }

    let prefix = rule.prefix.as_str();
    let mut working = legacy_name.to_string();

    // Exact base-class names: substitute the canonical leaf before the
    // generic rule below. A file that already carries a namespace has been
    // refactored; leave its base classes alone.
    for suffix in LEGACY_SUFFIXES {
        let full_legacy_prefix = format!("{prefix}{suffix}");
        if working != full_legacy_prefix {
            continue;
        }
        match suffix {
            "Model" | "Table" => return None,
            _ if !first_pass => return None,
            "Controller" => working = format!("{full_legacy_prefix}Display"),
            _ => working = format!("{full_legacy_prefix}{prefix}"),
        }
        break;
    }

    // Special case: the JHTML prefix, in any capitalization.
    if working
        .get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case("jhtml"))
    {
        let leaf = capitalize(&working[5..].to_lowercase());
        let mut namespace = namespace_segments(&rule.target_namespace, side);
        namespace.push("Service".to_string());
        namespace.push("Html".to_string());
        return CanonicalIdentity::new(namespace, leaf);
    }

    for suffix in LEGACY_SUFFIXES {
        let full_legacy_prefix = format!("{prefix}{suffix}");
        let mut candidate = working.clone();

        // Regular helper classes are named ExampleSomethingHelper; transpose
        // to ExampleHelperSomething so the generic rule applies.
        if suffix == "Helper"
            && !candidate.starts_with(&full_legacy_prefix)
            && candidate.starts_with(prefix)
            && candidate.ends_with("Helper")
        {
            let plain = &candidate[prefix.len()..candidate.len() - "Helper".len()];
            candidate = format!("{full_legacy_prefix}{plain}");
        }

        let Some(remainder) = candidate.strip_prefix(&full_legacy_prefix) else {
            continue;
        };

        // ExampleModelFoobar => FoobarModel
        let leaf = format!("{}{suffix}", capitalize(&remainder.to_lowercase()));
        let mut namespace = namespace_segments(&rule.target_namespace, side);
        namespace.push(suffix.to_string());
        return CanonicalIdentity::new(namespace, leaf);
    }

    // View classes: the leaf comes from the file name, the class-name
    // remainder becomes an intermediate namespace segment.
    let full_legacy_prefix = format!("{prefix}View");
    let remainder = working.strip_prefix(&full_legacy_prefix)?;

    let file_name = normalized_file_name(file_path);
    // view.html.php => HtmlView
    let leaf = format!(
        "{}View",
        capitalize(&file_name.replace("view.", "").replace(".php", "").to_lowercase())
    );

    let mut namespace = namespace_segments(&rule.target_namespace, side);
    namespace.push("View".to_string());
    let middle = capitalize(&remainder.to_lowercase());
    if !middle.is_empty() {
        namespace.push(middle);
    }
    CanonicalIdentity::new(namespace, leaf)
}

/// Generic-suffix derivation for the `JForm` marker families.
///
/// `JFormRuleExample` → `<ns>\<side>\Rule\ExampleRule`; the working prefix
/// is the first five characters of the name itself.
fn derive_marker_suffix(
    legacy_name: &str,
    rule: &LegacyPrefixRule,
    side: ApplicationSide,
    segment: &str,
) -> Option<CanonicalIdentity> {
    if legacy_name.is_empty() || rule.is_excluded(legacy_name) {
        return None;
    }

    let marker = legacy_name.get(..5)?;
    let full_legacy_prefix = format!("{marker}{segment}");
    let remainder = legacy_name.strip_prefix(&full_legacy_prefix)?;

    let leaf = format!("{}{segment}", capitalize(&remainder.to_lowercase()));
    let mut namespace = namespace_segments(&rule.target_namespace, side);
    namespace.push(segment.to_string());
    CanonicalIdentity::new(namespace, leaf)
}

fn starts_with_joined(name: &str, prefix: &str, suffix: &str) -> bool {
    name.len() >= prefix.len() + suffix.len()
        && name.starts_with(prefix)
        && name[prefix.len()..].starts_with(suffix)
}

fn namespace_segments(target_namespace: &str, side: ApplicationSide) -> Vec<String> {
    let mut segments: Vec<String> = target_namespace
        .trim_matches('\\')
        .split('\\')
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect();
    segments.push(side.label().to_string());
    segments
}

fn normalized_file_name(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    normalized
        .rsplit('/')
        .next()
        .unwrap_or(&normalized)
        .to_string()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
