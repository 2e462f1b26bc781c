// src/include/resolve.rs
// =============================================================================
// Turns a declared include path into an absolute path on the site.
//
// How it works:
// 1. A path starting with "/" is already absolute and is returned as is
// 2. Otherwise start from the directory of the current page
// 3. Walk the declared path segment by segment:
//    ".." goes up one directory, "." stays, anything else goes down
// 4. Join what is left with "/"
//
// Example:
//   page     = "/a/b/page.html"   (directory: a, b)
//   declared = "../c/d.html"
//   result   = "/a/c/d.html"
// =============================================================================

/// Resolves `declared` against the page at `document_path`.
///
/// Going above the site root stops at the root instead of failing:
/// `../../../x.html` from `/a/page.html` is `/x.html`.
pub fn resolve_path(declared: &str, document_path: &str) -> String {
    if declared.starts_with('/') {
        return declared.to_string();
    }

    // Everything up to and including the last '/'
    let directory = match document_path.rfind('/') {
        Some(index) => &document_path[..=index],
        None => "",
    };

    let mut stack: Vec<&str> = directory.split('/').filter(|s| !s.is_empty()).collect();

    for segment in declared.split('/').filter(|s| !s.is_empty()) {
        match segment {
            ".." => {
                // pop() on an empty Vec is just None
                stack.pop();
            }
            "." => {}
            other => stack.push(other),
        }
    }

    format!("/{}", stack.join("/"))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why &str slices instead of Strings in the stack?
//    - Every segment is a piece of one of the two input strings
//    - Borrowing them avoids allocating a String per segment
//    - Only the final format! allocates
//
// 2. What does filter(|s| !s.is_empty()) do?
//    - "a//b/".split('/') yields "a", "", "b", ""
//    - Dropping the empty pieces collapses repeated slashes
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_unchanged() {
        for path in ["/x.html", "/a/../b.html", "/", "//cdn/x.html"] {
            assert_eq!(resolve_path(path, "/a/b/page.html"), path);
            assert_eq!(resolve_path(path, ""), path);
        }
    }

    #[test]
    fn test_parent_segment() {
        assert_eq!(resolve_path("../c/d.html", "/a/b/page.html"), "/a/c/d.html");
    }

    #[test]
    fn test_current_segment() {
        assert_eq!(resolve_path("./x.html", "/a/b/page.html"), "/a/b/x.html");
    }

    #[test]
    fn test_relative_from_root_page() {
        assert_eq!(resolve_path("x/y.html", "/page.html"), "/x/y.html");
    }

    #[test]
    fn test_excess_parent_segments_stop_at_root() {
        assert_eq!(resolve_path("../../../x.html", "/a/page.html"), "/x.html");
    }

    #[test]
    fn test_directory_page_keeps_last_segment() {
        assert_eq!(resolve_path("header.html", "/shop/"), "/shop/header.html");
        assert_eq!(resolve_path("header.html", "/shop"), "/header.html");
    }

    #[test]
    fn test_document_path_without_slash() {
        assert_eq!(resolve_path("a/b.html", "page.html"), "/a/b.html");
    }

    #[test]
    fn test_repeated_slashes_collapse() {
        assert_eq!(resolve_path("x//y.html", "/a//page.html"), "/a/x/y.html");
    }

    #[test]
    fn test_resolution_is_stable() {
        let once = resolve_path("../c/./d.html", "/a/b/page.html");
        let twice = resolve_path("../c/./d.html", "/a/b/page.html");
        assert_eq!(once, twice);
        // Feeding the result back in is a no-op, it is absolute now
        assert_eq!(resolve_path(&once, "/elsewhere/page.html"), once);
    }
}
