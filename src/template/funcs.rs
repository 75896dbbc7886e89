//! Functions available to every page template.
//!
//! | Function       | Result                                            |
//! |----------------|---------------------------------------------------|
//! | `safeHTML(s)`  | `s` marked safe, emitted without escaping         |
//! | `url(*parts)`  | resource path under the site prefix, see [`resource_url`] |

use minijinja::{
    Environment, Value,
    value::Rest,
};

/// Register `safeHTML` and `url` on `env`, binding `url` to `prefix`.
pub fn register_functions(env: &mut Environment<'static>, prefix: &str) {
    env.add_function("safeHTML", safe_html);

    let prefix = prefix.to_owned();
    env.add_function("url", move |parts: Rest<Value>| {
        let parts: Vec<String> = parts.iter().map(value_to_part).collect();
        resource_url(&prefix, &parts)
    });
}

/// Mark a string as safe HTML. The caller vouches for its content.
fn safe_html(value: String) -> Value {
    Value::from_safe_string(value)
}

/// Stringify a template value as a path segment; undefined and none are empty.
fn value_to_part(value: &Value) -> String {
    if let Some(s) = value.as_str() {
        return s.to_owned();
    }
    if value.is_undefined() || value.is_none() {
        return String::new();
    }
    value.to_string()
}

// ============================================================================
// Resource URLs
// ============================================================================

/// Absolute path to a resource referenced by `parts`.
///
/// With `prefix = "/io15"`, `["images", "img.jpg"]` becomes `/io15/images/img.jpg`.
/// An `http://` or `https://` first part (any case) is returned untouched and the
/// remaining parts are ignored. Paths already under the prefix are not prefixed
/// twice. The result is cleaned with [`clean_path`].
pub fn resource_url<S: AsRef<str>>(prefix: &str, parts: &[S]) -> String {
    let first = parts.first().map(AsRef::as_ref).unwrap_or_default();
    let lower = first.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return first.to_owned();
    }

    let joined = parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/");

    if joined.starts_with(prefix) {
        clean_path(&joined)
    } else {
        clean_path(&format!("{prefix}/{joined}"))
    }
}

/// Lexically normalize a slash-separated path.
///
/// Collapses repeated separators, drops `.` segments and resolves `..` against
/// the preceding segment. `..` above a rooted path is discarded; above a
/// relative path it is kept. Empty input yields `.`.
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{body}"),
        (false, true) => ".".to_owned(),
        (false, false) => body,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_resource_url_prefixes_relative_parts() {
        assert_eq!(resource_url("/io15", &["images", "io15.png"]), "/io15/images/io15.png");
        assert_eq!(resource_url("/io15", &["scripts/main.js"]), "/io15/scripts/main.js");
    }

    #[test]
    fn test_resource_url_keeps_absolute_urls() {
        assert_eq!(resource_url("/io15", &["http://x.com/a", "b"]), "http://x.com/a");
        assert_eq!(
            resource_url("/io15", &["HTTPS://cdn.example.com/a.css"]),
            "HTTPS://cdn.example.com/a.css"
        );
    }

    #[test]
    fn test_resource_url_no_double_prefix() {
        assert_eq!(resource_url("/io15", &["/io15/css/a.css"]), "/io15/css/a.css");
    }

    #[test]
    fn test_resource_url_cleans_result() {
        assert_eq!(resource_url("/io15", &["/images//", "./a.png"]), "/io15/images/a.png");
        assert_eq!(resource_url("/io15", &["css", "../js/app.js"]), "/io15/js/app.js");
        assert_eq!(resource_url("/io15/", &["images"]), "/io15/images");
    }

    #[test]
    fn test_resource_url_empty_prefix() {
        assert_eq!(resource_url("", &["images", "a.png"]), "images/a.png");
        assert_eq!(resource_url("", &["/images/a.png"]), "/images/a.png");
    }

    #[test]
    fn test_resource_url_no_parts() {
        let parts: [&str; 0] = [];
        assert_eq!(resource_url("/io15", &parts), "/io15");
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(""), ".");
        assert_eq!(clean_path("/"), "/");
        assert_eq!(clean_path("a/b/../c"), "a/c");
        assert_eq!(clean_path("/a/./b//c/"), "/a/b/c");
        assert_eq!(clean_path("/../a"), "/a");
        assert_eq!(clean_path("../../a"), "../../a");
        assert_eq!(clean_path("a/.."), ".");
        assert_eq!(clean_path("a/../../b"), "../b");
    }

    #[test]
    fn test_template_functions() {
        let mut env = Environment::new();
        register_functions(&mut env, "/io15");

        let out = env
            .render_str(
                r#"{{ url("images", name) }}|{{ safeHTML(html) }}|{{ html }}"#,
                context! { name => "logo.png", html => "<b>hi</b>" },
            )
            .unwrap();
        assert_eq!(out, "/io15/images/logo.png|<b>hi</b>|<b>hi</b>");
    }

    #[test]
    fn test_url_tolerates_undefined_arguments() {
        let mut env = Environment::new();
        register_functions(&mut env, "/io15");

        let out = env.render_str(r#"{{ url(missing, "a.css") }}"#, context! {}).unwrap();
        assert_eq!(out, "/io15/a.css");
    }
}
