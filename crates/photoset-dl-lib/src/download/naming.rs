use std::collections::HashSet;
use std::path::Path;
use url::Url;

/// Name used when a URL has no usable last path segment.
pub const FALLBACK_FILE_NAME: &str = "download";

/// Last path segment of `url`, percent-decoded.
///
/// Returns `None` when the URL does not parse, has no path, ends in `/`, or the
/// segment would not be a plain file name (`.` or `..`).
pub fn url_basename(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;
    let decoded = urlencoding::decode(segment).ok()?;

    // An encoded separator must not let the name escape the output directory.
    let name = decoded
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// Picks the local file name for `url` inside `dir`.
///
/// Uses the URL's last path segment (or [`FALLBACK_FILE_NAME`]). If a file with
/// that name already exists, `.0`, `.1`, ... is appended, taking the first
/// suffix that is free.
pub fn choose_local_name(url: &str, dir: &Path) -> String {
    choose_local_name_excluding(url, dir, &HashSet::new())
}

/// Like [`choose_local_name`], but also treats every name in `reserved` as
/// taken.
pub fn choose_local_name_excluding(url: &str, dir: &Path, reserved: &HashSet<String>) -> String {
    let base = url_basename(url).unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
    let is_taken = |name: &str| reserved.contains(name) || dir.join(name).exists();

    if !is_taken(&base) {
        return base;
    }

    let mut i: u64 = 0;
    loop {
        let candidate = format!("{base}.{i}");
        if !is_taken(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_choose_local_name_uses_basename_when_free() {
        let temp_dir = TempDir::new().unwrap();

        assert_eq!(
            choose_local_name("http://x/photos/a.jpg", temp_dir.path()),
            "a.jpg"
        );
        assert_eq!(
            choose_local_name("https://farm1.example.com/1/2/12345_abc_o.png?x=1", temp_dir.path()),
            "12345_abc_o.png"
        );
    }

    #[test]
    fn test_choose_local_name_first_free_suffix() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b"), "existing").unwrap();
        fs::write(temp_dir.path().join("b.0"), "existing").unwrap();
        fs::write(temp_dir.path().join("b.1"), "existing").unwrap();

        assert_eq!(choose_local_name("http://x/b", temp_dir.path()), "b.2");
    }

    #[test]
    fn test_choose_local_name_single_collision() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.jpg"), "existing").unwrap();

        assert_eq!(
            choose_local_name("http://x/a.jpg", temp_dir.path()),
            "a.jpg.0"
        );
    }

    #[test]
    fn test_choose_local_name_suffix_gap_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("c.txt"), "existing").unwrap();
        fs::write(temp_dir.path().join("c.txt.1"), "existing").unwrap();

        assert_eq!(
            choose_local_name("http://x/c.txt", temp_dir.path()),
            "c.txt.0"
        );
    }

    #[test]
    fn test_choose_local_name_empty_path_falls_back() {
        let temp_dir = TempDir::new().unwrap();

        assert_eq!(choose_local_name("http://x", temp_dir.path()), "download");
        assert_eq!(choose_local_name("http://x/", temp_dir.path()), "download");
        assert_eq!(
            choose_local_name("http://x/gallery/", temp_dir.path()),
            "download"
        );
    }

    #[test]
    fn test_choose_local_name_fallback_obeys_collisions() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("download"), "existing").unwrap();

        assert_eq!(
            choose_local_name("http://x/", temp_dir.path()),
            "download.0"
        );
    }

    #[test]
    fn test_choose_local_name_unparseable_url_falls_back() {
        let temp_dir = TempDir::new().unwrap();

        assert_eq!(choose_local_name("not a url", temp_dir.path()), "download");
        assert_eq!(choose_local_name("", temp_dir.path()), "download");
    }

    #[test]
    fn test_choose_local_name_respects_reservations() {
        let temp_dir = TempDir::new().unwrap();
        let reserved = HashSet::from(["a.jpg".to_string(), "a.jpg.0".to_string()]);

        assert_eq!(
            choose_local_name_excluding("http://x/a.jpg", temp_dir.path(), &reserved),
            "a.jpg.1"
        );
    }

    #[test]
    fn test_url_basename_decodes_percent_escapes() {
        assert_eq!(
            url_basename("http://x/my%20photo.jpg"),
            Some("my photo.jpg".to_string())
        );
    }

    #[test]
    fn test_url_basename_strips_encoded_separators() {
        assert_eq!(
            url_basename("http://x/a/..%2F..%2Fetc%2Fpasswd"),
            Some("passwd".to_string())
        );
        assert_eq!(url_basename("http://x/a/%2E%2E"), None);
        assert_eq!(url_basename("http://x/a/..%2F"), None);
    }

    #[test]
    fn test_url_basename_ignores_query_and_fragment() {
        assert_eq!(
            url_basename("http://x/a/b.gif?size=large#top"),
            Some("b.gif".to_string())
        );
    }
}
