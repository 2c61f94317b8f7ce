//! Minimal unified-diff reader.
//!
//! Extracts the touched file paths and whether each file was deleted —
//! all the extension check needs. Not a general diff parser: hunk
//! contents are ignored.

/// One file touched by a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffFile {
    /// Repository-relative path (prefix `a/`/`b/` stripped).
    pub path: String,
    pub deleted: bool,
}

/// Scan a unified diff for the files it touches.
pub fn scan_diff(diff: &str) -> Vec<DiffFile> {
    let mut files = Vec::new();
    let mut old_side: Option<String> = None;

    for line in diff.lines() {
        if let Some(rest) = line.strip_prefix("--- ") {
            old_side = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            let new_side = rest.trim();
            if new_side == "/dev/null" {
                // Deleted file: only the old side carries the path.
                if let Some(old) = old_side.take() {
                    files.push(DiffFile {
                        path: strip_side(&old),
                        deleted: true,
                    });
                }
            } else {
                files.push(DiffFile {
                    path: strip_side(new_side),
                    deleted: false,
                });
                old_side = None;
            }
        }
    }

    files
}

fn strip_side(path: &str) -> String {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "\
diff --git a/example.com.txt b/example.com.txt
index 1111111..2222222 100644
--- a/example.com.txt
+++ b/example.com.txt
@@ -1,2 +1,3 @@
 title_selector: h1
+date_selector: .published
 body_selector: article
diff --git a/notes.md b/notes.md
new file mode 100644
--- /dev/null
+++ b/notes.md
@@ -0,0 +1 @@
+some notes
diff --git a/old.example.org.txt b/old.example.org.txt
deleted file mode 100644
--- a/old.example.org.txt
+++ /dev/null
@@ -1 +0,0 @@
-body_selector: main
";

    #[test]
    fn scans_modified_added_and_deleted_files() {
        let files = scan_diff(DIFF);
        assert_eq!(
            files,
            vec![
                DiffFile {
                    path: "example.com.txt".into(),
                    deleted: false,
                },
                DiffFile {
                    path: "notes.md".into(),
                    deleted: false,
                },
                DiffFile {
                    path: "old.example.org.txt".into(),
                    deleted: true,
                },
            ]
        );
    }

    #[test]
    fn empty_diff_yields_no_files() {
        assert!(scan_diff("").is_empty());
    }

    #[test]
    fn path_prefixes_are_stripped() {
        let diff = "--- a/dir/file.txt\n+++ b/dir/file.txt\n";
        let files = scan_diff(diff);
        assert_eq!(files[0].path, "dir/file.txt");
    }
}
