//! Name/value cookie map for the `Cookie` request header and `Set-Cookie`
//! response lines.

/// Cookies keyed by exact name. A later value for the same name replaces
/// the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieMap {
    cookies: Vec<(String, String)>,
}

impl CookieMap {
    pub fn new() -> Self {
        Self {
            cookies: Vec::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        if let Some((_, v)) = self.cookies.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(v, value));
        }
        self.cookies.push((name, value));
        None
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Format as a `Cookie` header value: `name=value; name2=value2`.
    pub fn to_header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|(n, v)| format!("{}={}", n, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Store the `name=value` pair of a `Set-Cookie` value.
    ///
    /// Attributes after the first `;` are discarded. Returns false when the
    /// pair has no `=`.
    pub fn insert_set_cookie(&mut self, set_cookie: &str) -> bool {
        let pair = match set_cookie.find(';') {
            Some(idx) => &set_cookie[..idx],
            None => set_cookie,
        };
        match pair.split_once('=') {
            Some((name, value)) => {
                self.insert(name.trim(), value.trim());
                true
            }
            None => false,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = CookieMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value() {
        let cookies: CookieMap = [("sid", "abc"), ("theme", "dark")].into_iter().collect();
        assert_eq!(cookies.to_header_value(), "sid=abc; theme=dark");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut cookies = CookieMap::new();
        cookies.insert("SID", "1");
        cookies.insert("sid", "2");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("SID"), Some("1"));
    }

    #[test]
    fn test_set_cookie_drops_attributes() {
        let mut cookies = CookieMap::new();
        assert!(cookies.insert_set_cookie("token=a=b; Path=/; HttpOnly"));
        assert_eq!(cookies.get("token"), Some("a=b"));
    }

    #[test]
    fn test_set_cookie_without_attributes() {
        let mut cookies = CookieMap::new();
        assert!(cookies.insert_set_cookie("plain=1"));
        assert_eq!(cookies.get("plain"), Some("1"));
    }

    #[test]
    fn test_set_cookie_later_value_wins() {
        let mut cookies = CookieMap::new();
        cookies.insert_set_cookie("sid=old; Path=/");
        cookies.insert_set_cookie("sid=new; Path=/");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("sid"), Some("new"));
    }

    #[test]
    fn test_set_cookie_without_pair_rejected() {
        let mut cookies = CookieMap::new();
        assert!(!cookies.insert_set_cookie("garbage; Path=/"));
        assert!(cookies.is_empty());
    }
}
