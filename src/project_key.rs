//! Stable identity for a compilation unit.
//!
//! Workspace models routinely expose the same project more than once: a
//! shared project referenced from several solution entries, or the same
//! solution listed twice. [`ProjectKey`] is the deduplication key that
//! collapses those sightings into one unit, and also carries the
//! build-target label shown in the reports.

use std::hash::{Hash, Hasher};

use camino::Utf8PathBuf;

use crate::frameworks;
use crate::workspace::ProjectInfo;

/// Identity of one project + build-target unit.
///
/// Equality and hashing compare the file path case-insensitively
/// (filesystem-path semantics) and the name and target framework
/// case-sensitively.
#[derive(Debug, Clone)]
pub struct ProjectKey {
    pub file_path: Utf8PathBuf,
    pub name: String,
    pub target_framework: String,
}

impl ProjectKey {
    /// Derive the unit identity from a loaded project.
    ///
    /// The build-target label comes from, in priority order:
    /// 1. a parenthesized display-name suffix (`"MyLib (net9.0)"`),
    ///    which is stripped from the logical name;
    /// 2. the output path, scanning segments from the artifact end
    ///    backward for the first recognized framework moniker;
    /// 3. nothing; an empty label is a valid, reportable state.
    pub fn from_project(project: &ProjectInfo) -> Self {
        let mut name = project.display_name.clone();
        let mut target_framework = String::new();

        if name.ends_with(')')
            && let Some(open) = name.rfind('(')
        {
            target_framework = name[open + 1..name.len() - 1].to_string();
            name.truncate(open);
            // Display names carry a space before the parenthesis.
            while name.ends_with(' ') {
                name.pop();
            }
        }

        if target_framework.is_empty()
            && let Some(dir) = project.output_assembly_path.parent()
        {
            // Output layouts nest like bin/Debug/<tfm>/, so the match
            // closest to the artifact wins.
            if let Some(found) = dir
                .components()
                .rev()
                .map(|c| c.as_str())
                .find(|segment| frameworks::is_known(segment))
            {
                target_framework = found.to_string();
            }
        }

        Self {
            file_path: project.file_path.clone(),
            name,
            target_framework,
        }
    }
}

impl PartialEq for ProjectKey {
    fn eq(&self, other: &Self) -> bool {
        self.file_path.as_str().eq_ignore_ascii_case(other.file_path.as_str())
            && self.name == other.name
            && self.target_framework == other.target_framework
    }
}

impl Eq for ProjectKey {}

impl Hash for ProjectKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.file_path.as_str().to_ascii_lowercase().hash(state);
        self.name.hash(state);
        self.target_framework.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn project(display_name: &str, file_path: &str, output: &str) -> ProjectInfo {
        ProjectInfo {
            file_path: Utf8PathBuf::from(file_path),
            display_name: display_name.to_string(),
            assembly_name: "MyLib".to_string(),
            version: "0.0.0.0".to_string(),
            target_framework: None,
            output_assembly_path: Utf8PathBuf::from(output),
            source_files: vec![],
        }
    }

    #[test]
    fn parenthesized_suffix_wins_and_is_stripped() {
        let key = ProjectKey::from_project(&project(
            "MyLib (net9.0)",
            "/src/MyLib/MyLib.csproj",
            "/src/MyLib/bin/Debug/net8.0/MyLib.dll",
        ));
        assert_eq!(key.name, "MyLib");
        assert_eq!(key.target_framework, "net9.0");
    }

    #[test]
    fn output_path_scan_finds_segment_closest_to_artifact() {
        let key = ProjectKey::from_project(&project(
            "MyLib",
            "/src/MyLib/MyLib.csproj",
            "/src/MyLib/bin/Debug/net8.0-windows/MyLib.dll",
        ));
        assert_eq!(key.name, "MyLib");
        assert_eq!(key.target_framework, "net8.0-windows");
    }

    #[test]
    fn backward_scan_prefers_the_last_matching_segment() {
        // Pathological layout with two candidate segments: the one
        // nearer the artifact is the unit's actual target.
        let key = ProjectKey::from_project(&project(
            "MyLib",
            "/src/MyLib/MyLib.csproj",
            "/out/net462/bin/Debug/net9.0/MyLib.dll",
        ));
        assert_eq!(key.target_framework, "net9.0");
    }

    #[test]
    fn unrecognized_path_leaves_label_empty() {
        let key = ProjectKey::from_project(&project(
            "MyLib",
            "/src/MyLib/MyLib.csproj",
            "/src/MyLib/out/release/MyLib.dll",
        ));
        assert_eq!(key.target_framework, "");
    }

    #[test]
    fn path_comparison_is_case_insensitive() {
        let a = ProjectKey {
            file_path: Utf8PathBuf::from("/src/MyLib/MyLib.csproj"),
            name: "MyLib".to_string(),
            target_framework: "net9.0".to_string(),
        };
        let b = ProjectKey {
            file_path: Utf8PathBuf::from("/SRC/mylib/MYLIB.CSPROJ"),
            name: "MyLib".to_string(),
            target_framework: "net9.0".to_string(),
        };
        assert_eq!(a, b);

        let mut visited = HashSet::new();
        assert!(visited.insert(a));
        assert!(!visited.insert(b));
    }

    #[test]
    fn name_and_framework_comparison_is_case_sensitive() {
        let base = ProjectKey {
            file_path: Utf8PathBuf::from("/src/MyLib/MyLib.csproj"),
            name: "MyLib".to_string(),
            target_framework: "net9.0".to_string(),
        };
        let different_name = ProjectKey {
            name: "mylib".to_string(),
            ..base.clone()
        };
        let different_tfm = ProjectKey {
            target_framework: "NET9.0".to_string(),
            ..base.clone()
        };
        assert_ne!(base, different_name);
        assert_ne!(base, different_tfm);
    }
}
