use std::collections::{HashMap, HashSet};

/// Clean remote trivia markup for `dangerous_inner_html`.
///
/// Only inline formatting survives; entities such as `&quot;` are decoded
/// and re-escaped where needed. Scripts and their content are dropped.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "b", "i", "em", "strong", "u", "sub", "sup", "code", "span", "br",
    ]
    .into_iter()
    .collect();

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(HashMap::new())
        .clean(html)
        .to_string()
}
