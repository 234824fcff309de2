//! Relative path rendering shared by the breadth-first traversals

use std::path::{Component, Path};

/// Path of `name` inside `subdirectory`, relative to `root`, `/`-separated
///
/// `subdirectory` is the root itself or a path built by joining onto it.
/// Names that are not valid UTF-8 are rendered lossily.
pub fn relative_entry(root: &Path, subdirectory: &Path, name: impl AsRef<Path>) -> String {
    let joined = subdirectory.join(name);

    if is_current_dir(root) {
        // joining onto "." leaves a leading "./" and nothing else to strip
        return to_slash(&joined);
    }

    let relative = joined.strip_prefix(root).unwrap_or(&joined);
    to_slash(relative)
}

/// Renders a path with `/` separators, dropping `.` components
pub fn to_slash(path: &Path) -> String {
    let mut rendered = String::new();

    for component in path.components() {
        let part = match component {
            Component::Normal(part) => part.to_string_lossy(),
            Component::ParentDir => "..".into(),
            Component::Prefix(prefix) => prefix.as_os_str().to_string_lossy(),
            Component::CurDir | Component::RootDir => continue,
        };
        if !rendered.is_empty() {
            rendered.push('/');
        }
        rendered.push_str(&part);
    }

    rendered
}

fn is_current_dir(root: &Path) -> bool {
    root.as_os_str() == "."
}
