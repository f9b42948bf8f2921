//! URL synthesis

/// Percent-encode a forward-slash path, keeping the `/` separators intact
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a base URL and an unencoded relative path with exactly one `/`
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), encode_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_keeps_slashes() {
        assert_eq!(encode_path("Math HW/quiz 1.pdf"), "Math%20HW/quiz%201.pdf");
        assert_eq!(encode_path("a/b/c.txt"), "a/b/c.txt");
    }

    #[test]
    fn test_encode_path_reserved_chars() {
        assert_eq!(encode_path("q&a/50%#1?.txt"), "q%26a/50%25%231%3F.txt");
        assert_eq!(encode_path("keep-_.~"), "keep-_.~");
    }

    #[test]
    fn test_encode_path_non_ascii() {
        assert_eq!(encode_path("期末.pdf"), "%E6%9C%9F%E6%9C%AB.pdf");
    }

    #[test]
    fn test_join_url_strips_trailing_slash() {
        assert_eq!(join_url("https://host/x", "notes.txt"), "https://host/x/notes.txt");
        assert_eq!(join_url("https://host/x/", "notes.txt"), "https://host/x/notes.txt");
        assert_eq!(join_url("https://host/x///", "a b"), "https://host/x/a%20b");
    }
}
