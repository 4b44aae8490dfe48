//! `Link` response header parsing.
//!
//! GitHub paginates with headers of the form
//! `<https://api.github.com/...&page=2>; rel="next", <https://...&page=34>; rel="last"`.

use reqwest::Url;

/// Extract the URL tagged with `rel` from a `Link` header value.
pub fn find_rel(link_header: &str, rel: &str) -> Option<Url> {
    link_header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let target = target.strip_prefix('<')?.strip_suffix('>')?;

        let matches = parts.any(|param| {
            let param = param.trim();
            param
                .strip_prefix("rel=")
                .map(|value| value.trim_matches('"'))
                .is_some_and(|value| value.split_whitespace().any(|r| r == rel))
        });

        if matches {
            Url::parse(target).ok()
        } else {
            None
        }
    })
}

/// The `page` number of the `rel="last"` link, if present.
pub fn last_page(link_header: &str) -> Option<i64> {
    find_rel(link_header, "last")?
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRIBUTORS_LINK: &str = r#"<https://api.github.com/repositories/1296269/contributors?per_page=1&anon=true&page=2>; rel="next", <https://api.github.com/repositories/1296269/contributors?per_page=1&anon=true&page=137>; rel="last""#;

    #[test]
    fn test_last_page() {
        assert_eq!(last_page(CONTRIBUTORS_LINK), Some(137));
    }

    #[test]
    fn test_find_rel_next() {
        let next = find_rel(CONTRIBUTORS_LINK, "next").unwrap();
        assert_eq!(next.query(), Some("per_page=1&anon=true&page=2"));
    }

    #[test]
    fn test_missing_last_rel() {
        let header = r#"<https://api.github.com/x?page=1>; rel="prev", <https://api.github.com/x?page=1>; rel="first""#;
        assert_eq!(last_page(header), None);
    }

    #[test]
    fn test_garbage_header() {
        assert_eq!(last_page(""), None);
        assert_eq!(last_page("not a link header"), None);
        assert_eq!(last_page(r#"<not a url>; rel="last""#), None);
    }
}
