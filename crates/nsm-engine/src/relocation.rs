//! File relocation planning: canonical FQN → canonical file path.
//!
//! The planner only produces [`FileMoveIntent`]s; physically moving files is
//! the filesystem collaborator's job.

use crate::path_classifier::extension_root_folder;
use nsm_foundation::model::FileMoveIntent;
use tracing::debug;

/// Plan the move of a freshly namespaced file to its canonical folder.
///
/// The canonical path mirrors the namespace below the common prefix, with
/// two adjustments: the side segment is dropped (it is represented by the
/// extension root folder itself, not by a folder under `src/`), and a `src`
/// folder is inserted after the extension root.
///
/// `Acme\Example\Administrator\Controller\DisplayController` under the root
/// `admin` becomes `admin/src/Controller/DisplayController.php`.
///
/// Returns `None` when no extension root can be found (do not relocate),
/// when the FQN does not carry the expected prefix (whatever happened is
/// massively wrong, give up), or when the file already sits at its
/// canonical path.
pub fn plan_move(
    canonical_fqn: &str,
    namespace_prefix: &str,
    current_path: &str,
) -> Option<FileMoveIntent> {
    let root = extension_root_folder(current_path)?;

    let prefix = namespace_prefix.trim_matches('\\');
    let fqn = canonical_fqn.trim_matches('\\');

    let relative = fqn.strip_prefix(prefix)?.trim_matches('\\');

    let mut segments: Vec<&str> = relative.split('\\').collect();
    if segments.len() < 2 {
        debug!(fqn, prefix, "canonical name has no segments below the side; not relocating");
        return None;
    }

    // The first remaining segment is the side label, structurally
    // represented by the root folder.
    segments.remove(0);

    let to_path = format!("{}/src/{}.php", root, segments.join("/"));
    let from_path = current_path.replace('\\', "/");

    if to_path == from_path {
        // Already in the canonical folder.
        return None;
    }

    Some(FileMoveIntent { from_path, to_path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_controller_move() {
        let intent = plan_move(
            "Acme\\Example\\Administrator\\Controller\\DisplayController",
            "Acme\\Example",
            "admin/controller.php",
        )
        .unwrap();
        assert_eq!(intent.from_path, "admin/controller.php");
        assert_eq!(intent.to_path, "admin/src/Controller/DisplayController.php");
    }

    #[test]
    fn test_model_move() {
        let intent = plan_move(
            "Acme\\Example\\Administrator\\Model\\FoobarModel",
            "Acme\\Example",
            "admin/models/foobar.php",
        )
        .unwrap();
        assert_eq!(intent.to_path, "admin/src/Model/FoobarModel.php");
    }

    #[test]
    fn test_view_move_keeps_intermediate_segment() {
        let intent = plan_move(
            "Acme\\Example\\Administrator\\View\\Foobar\\HtmlView",
            "Acme\\Example",
            "admin/views/foobar/view.html.php",
        )
        .unwrap();
        assert_eq!(intent.to_path, "admin/src/View/Foobar/HtmlView.php");
    }

    #[test]
    fn test_leading_separators_are_tolerated() {
        let intent = plan_move(
            "\\Acme\\Example\\Site\\Model\\FoobarModel",
            "\\Acme\\Example\\",
            "site/models/foobar.php",
        )
        .unwrap();
        assert_eq!(intent.to_path, "site/src/Model/FoobarModel.php");
    }

    #[test]
    fn test_no_extension_root_means_no_move() {
        assert_eq!(
            plan_move(
                "Acme\\Example\\Administrator\\Model\\FoobarModel",
                "Acme\\Example",
                "some/very/deep/unrelated/place/foobar.php",
            ),
            None
        );
    }

    #[test]
    fn test_foreign_prefix_means_no_move() {
        assert_eq!(
            plan_move(
                "Vendor\\Other\\Administrator\\Model\\FoobarModel",
                "Acme\\Example",
                "admin/models/foobar.php",
            ),
            None
        );
    }

    #[test]
    fn test_target_path_preserves_application_side() {
        use crate::path_classifier::application_side;
        use nsm_foundation::model::ApplicationSide;

        let cases = [
            (
                "Acme\\Example\\Administrator\\Model\\FoobarModel",
                "admin/models/foobar.php",
            ),
            (
                "Acme\\Example\\Site\\Controller\\FoobarController",
                "site/controllers/foobar.php",
            ),
            (
                "Acme\\Example\\Api\\View\\Foobar\\JsonView",
                "api/views/foobar/view.json.php",
            ),
        ];
        for (fqn, path) in cases {
            let side = application_side(path);
            let intent = plan_move(fqn, "Acme\\Example", path).unwrap();
            assert_eq!(application_side(&intent.to_path), side, "for {path}");
        }
        assert_eq!(
            application_side("api/views/foobar/view.json.php"),
            ApplicationSide::Api
        );
    }

    #[test]
    fn test_already_canonical_path_is_idempotent() {
        assert_eq!(
            plan_move(
                "Acme\\Example\\Administrator\\Model\\FoobarModel",
                "Acme\\Example",
                "admin/src/Model/FoobarModel.php",
            ),
            None
        );
    }
}
