//! The artifact descriptor returned to the host.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Where a successful build placed its artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binary {
    pub location: String,
}

impl Binary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Join `source` and `output_name` and clean the result lexically.
///
/// `.` components are dropped and `..` cancels a preceding normal component,
/// so `./testapp` + `myapp` is `testapp/myapp` and `./` + `app` is `app`.
/// Nothing touches the filesystem.
pub fn join_location(source: &str, output_name: &str) -> String {
    let joined = Path::new(source).join(output_name);
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return ".".to_string();
    }

    parts
        .iter()
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}
