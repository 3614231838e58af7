//! Lexical path helpers
//!
//! None of these touch the file system.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Resolve `.` and `..` components without consulting the file system
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}

/// Convert either separator style to the platform's separators
pub fn to_native_separators(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Normalize a directory path, always ending with a separator
pub fn normalize_directory_path(path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }

    let normalized = normalize_path(Path::new(&to_native_separators(path)));
    let mut text = normalized.to_string_lossy().into_owned();
    if text.is_empty() {
        text.push('.');
    }
    if !text.ends_with(MAIN_SEPARATOR) {
        text.push(MAIN_SEPARATOR);
    }
    Some(text)
}

/// Make `path` absolute against `root` and normalize it
pub fn absolute_file_path(root: &Path, path: &str) -> PathBuf {
    let candidate = PathBuf::from(to_native_separators(path));
    if candidate.is_absolute() {
        normalize_path(&candidate)
    } else {
        normalize_path(&root.join(candidate))
    }
}

/// `path` relative to `base`, if it lies underneath it
pub fn relative_file_path(base: &Path, path: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(Path::to_path_buf)
}

/// A `file:///` URL for a local path
pub fn file_url(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    format!("file:///{}", text.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_collapses_dots() {
        assert_eq!(
            normalize_path(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_normalize_directory_path() {
        let sep = MAIN_SEPARATOR;
        assert_eq!(
            normalize_directory_path("bin/Release2"),
            Some(format!("bin{sep}Release2{sep}"))
        );
        assert_eq!(
            normalize_directory_path("bin\\.\\Debug\\"),
            Some(format!("bin{sep}Debug{sep}"))
        );
        assert_eq!(normalize_directory_path(""), None);
        assert_eq!(normalize_directory_path("bin/.."), Some(format!(".{sep}")));
        assert_eq!(normalize_directory_path("./"), Some(format!(".{sep}")));
    }

    #[test]
    fn test_absolute_file_path() {
        let root = Path::new("/work/project");
        assert_eq!(
            absolute_file_path(root, "bin/../obj/app.o"),
            PathBuf::from("/work/project/obj/app.o")
        );
        assert_eq!(
            absolute_file_path(root, "/tmp/out.bin"),
            PathBuf::from("/tmp/out.bin")
        );
    }

    #[test]
    fn test_relative_file_path_and_url() {
        let base = Path::new("/work/project");
        assert_eq!(
            relative_file_path(base, Path::new("/work/project/bin/app.exe")),
            Some(PathBuf::from("bin/app.exe"))
        );
        assert_eq!(relative_file_path(base, Path::new("/elsewhere/app.exe")), None);
        assert_eq!(file_url(Path::new("/work/app.exe")), "file:///work/app.exe");
    }
}
