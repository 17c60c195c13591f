//! Path classification: which side of the application does a file belong
//! to, and where is the extension root it should be relocated under?
//!
//! Legacy trees are not perfectly regular (files sit under `tmpl/`, nested
//! nonstandard folders), so single-level lookups are backed by a full-path
//! fallback scan. Classification never fails; it degrades to [`ApplicationSide::Site`].

use nsm_foundation::model::ApplicationSide;

/// Folder names recognized as side containment roots
const CONTAINMENT_FOLDERS: [&str; 6] = [
    "admin",
    "administrator",
    "backend",
    "site",
    "frontend",
    "api",
];

/// Prefix marking a component root folder, e.g. `com_example`
const COMPONENT_MARKER: &str = "com_";

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

fn is_containment(folder: &str) -> bool {
    CONTAINMENT_FOLDERS
        .iter()
        .any(|known| folder.eq_ignore_ascii_case(known))
}

fn is_component_root(folder: &str) -> bool {
    folder.starts_with(COMPONENT_MARKER)
}

fn side_from_folder(folder: &str) -> Option<ApplicationSide> {
    match folder.trim().to_ascii_lowercase().as_str() {
        "admin" | "administrator" | "backend" => Some(ApplicationSide::Administrator),
        "site" | "frontend" => Some(ApplicationSide::Site),
        "api" => Some(ApplicationSide::Api),
        _ => None,
    }
}

/// Determine which application side a file belongs to.
///
/// Inspects path segments from the filename outward: the immediate
/// containing folder is skipped (it is implied by the class's own naming),
/// unless it is itself a containment folder or a component root, in which
/// case it is kept, since legacy display controllers sit directly in the
/// side folder. One further folder is skipped past a component root. When
/// the resulting folder is not recognized, a fallback scan walks all
/// ancestor segments; the final fallback is `Site`.
pub fn application_side(path: &str) -> ApplicationSide {
    let full_path = normalize(path);
    let mut bits: Vec<&str> = full_path.split('/').collect();

    // The filename
    bits.pop();

    // The immediate folder is implied by the class name, unless it is a
    // containment or component folder in its own right.
    if let Some(immediate) = bits.pop() {
        if is_containment(immediate) || is_component_root(immediate) {
            bits.push(immediate);
        }
    }

    let mut parent = bits.pop();

    // A component root stands for the component, not a side; skip one
    // further folder.
    if parent.is_some_and(is_component_root) {
        bits.pop();
        parent = bits.pop();
    }

    if let Some(side) = parent.and_then(side_from_folder) {
        return side;
    }

    // No idea where we are. Walk back through every ancestor until one of
    // the recognized folders shows up.
    let mut bits: Vec<&str> = full_path.split('/').collect();
    while let Some(last) = bits.pop() {
        if !is_containment(last) {
            continue;
        }
        if let Some(side) = side_from_folder(last) {
            return side;
        }
    }

    ApplicationSide::Site
}

/// Find the filesystem folder representing this side's portion of the
/// component: the extension root.
///
/// Walks up to three ancestor segments above the file looking for a
/// component root marker or a recognized containment folder, and returns
/// the path truncated to and including that segment. `None` means "do not
/// relocate": callers must skip the file move rather than guess.
pub fn extension_root_folder(path: &str) -> Option<String> {
    let full_path = normalize(path);
    let mut bits: Vec<&str> = full_path.split('/').collect();

    // The filename
    bits.pop()?;

    for _ in 0..3 {
        let last = bits.pop()?;

        if is_component_root(last) || is_containment(last) {
            bits.push(last);
            return Some(bits.join("/"));
        }
    }

    None
}
