/// Normalize a header name to title case (e.g. `content-type` -> `Content-Type`).
///
/// A letter is upper-cased when the character before it is not a letter and
/// lower-cased otherwise, so `x-b3-traceid` becomes `X-B3-Traceid`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if prev_alpha {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c.to_ascii_uppercase());
        }
        prev_alpha = c.is_ascii_alphabetic();
    }
    out
}

/// A header map with title-cased keys that strictly preserves insertion order.
///
/// Keys compare case-insensitively. Inserting an existing key replaces the
/// value in place, so the key keeps the position of its first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    headers: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Insert a header, returning the value it replaced.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        let name = name.as_ref();
        let value = value.into();
        if let Some((_, v)) = self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            return Some(std::mem::replace(v, value));
        }
        self.headers.push((title_case(name), value));
        None
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self
            .headers
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.headers.remove(idx).1)
    }

    /// Overlay `other` onto this map. Values from `other` win.
    pub fn extend_from(&mut self, other: &HeaderMap) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Merge a base set of headers with caller overrides.
///
/// Precedence: a key present in `overrides` always takes the override's
/// value. Keys keep the order in which they first appear, defaults first.
pub fn merge_headers(defaults: &HeaderMap, overrides: &HeaderMap) -> HeaderMap {
    let mut merged = defaults.clone();
    merged.extend_from(overrides);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("content-type"), "Content-Type");
        assert_eq!(title_case("SET-COOKIE"), "Set-Cookie");
        assert_eq!(title_case("x-b3-traceid"), "X-B3-Traceid");
        assert_eq!(title_case("etag"), "Etag");
    }

    #[test]
    fn test_insert_normalizes_key() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json");
        assert_eq!(headers.iter().next(), Some(("Content-Type", "application/json")));
    }

    #[test]
    fn test_case_insensitive_get() {
        let mut headers = HeaderMap::new();
        headers.insert("ACCEPT", "text/html");
        assert_eq!(headers.get("accept"), Some("text/html"));
        assert_eq!(headers.get("Accept"), Some("text/html"));
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let mut headers = HeaderMap::new();
        headers.insert("Host", "example.com");
        headers.insert("Accept", "*/*");
        let old = headers.insert("host", "updated.com");

        assert_eq!(old.as_deref(), Some("example.com"));
        assert_eq!(headers.len(), 2);
        let names: Vec<_> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Host", "Accept"]);
        assert_eq!(headers.get("Host"), Some("updated.com"));
    }

    #[test]
    fn test_remove_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Custom", "value");
        assert_eq!(headers.remove("x-custom").as_deref(), Some("value"));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_merge_override_wins() {
        let defaults: HeaderMap = [
            ("Host", "example.com"),
            ("Connection", "close"),
            ("User-Agent", "barenet"),
        ]
        .into_iter()
        .collect();
        let overrides: HeaderMap = [("user-agent", "custom/1.0"), ("X-Extra", "1")]
            .into_iter()
            .collect();

        let merged = merge_headers(&defaults, &overrides);
        let pairs: Vec<_> = merged.iter().collect();
        assert_eq!(
            pairs,
            [
                ("Host", "example.com"),
                ("Connection", "close"),
                ("User-Agent", "custom/1.0"),
                ("X-Extra", "1"),
            ]
        );
        // inputs untouched
        assert_eq!(defaults.get("User-Agent"), Some("barenet"));
    }
}
