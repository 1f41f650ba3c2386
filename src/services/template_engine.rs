use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([\w.]+)\s*\}\}").expect("valid placeholder regex"))
}

/// Substitutes `{{key}}` placeholders in `input` against `vars`.
///
/// Keys may use dotted paths (`{{candidate.email}}`) walking nested
/// objects. A missing or null lookup renders as the empty string. Single
/// pass: values containing `{{` are not re-substituted, and there is no
/// escaping mechanism.
pub fn render(input: &str, vars: &JsonValue) -> String {
    placeholder_re()
        .replace_all(input, |caps: &regex::Captures| {
            resolve(vars, &caps[1]).map(display_value).unwrap_or_default()
        })
        .into_owned()
}

fn resolve<'a>(vars: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = vars;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

pub(crate) fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitutes_known_keys() {
        let vars = json!({ "first_name": "Alex" });
        assert_eq!(render("Hi {{first_name}}", &vars), "Hi Alex");
    }

    #[test]
    fn missing_keys_render_empty() {
        assert_eq!(render("{{missing}}", &json!({})), "");
        assert_eq!(render("a{{missing}}b", &json!({})), "ab");
    }

    #[test]
    fn null_values_render_empty() {
        assert_eq!(render("{{x}}", &json!({ "x": null })), "");
    }

    #[test]
    fn dotted_paths_walk_nested_objects() {
        assert_eq!(render("{{a.b}}", &json!({ "a": { "b": "x" } })), "x");
        assert_eq!(render("{{a.b}}", &json!({ "a": {} })), "");
        assert_eq!(render("{{a.b.c}}", &json!({ "a": { "b": { "c": 7 } } })), "7");
    }

    #[test]
    fn whitespace_inside_braces_is_tolerated() {
        let vars = json!({ "stage": "Screening" });
        assert_eq!(render("now at {{ stage }}", &vars), "now at Screening");
    }

    #[test]
    fn non_string_values_use_json_representation() {
        let vars = json!({ "n": 42, "flag": true });
        assert_eq!(render("{{n}}/{{flag}}", &vars), "42/true");
    }

    #[test]
    fn single_pass_no_resubstitution() {
        let vars = json!({ "a": "{{b}}", "b": "leak" });
        assert_eq!(render("{{a}}", &vars), "{{b}}");
    }

    #[test]
    fn surrounding_text_passes_through() {
        let vars = json!({ "role_title": "Engineer" });
        assert_eq!(
            render("Interview for {{role_title}}!", &vars),
            "Interview for Engineer!"
        );
    }
}
