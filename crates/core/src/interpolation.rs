//! Rendering of command templates with the values a dispatch produced.
//!
//! Each argument of a definition's `command` is a `leon` template. The keys
//! available are `label` (the token that matched the command), `args` (the
//! remaining tokens joined by spaces) and `arg1`, `arg2`, ... for the
//! individual remaining tokens.

use std::collections::{HashMap, HashSet};

use leon::Template;

use crate::error::Result;

pub const LABEL_KEY: &str = "label";
pub const ARGS_KEY: &str = "args";
const ARG_PREFIX: &str = "arg";

/// Whether `key` can ever be provided by [`build_context`].
#[must_use]
pub fn is_known_key(key: &str) -> bool {
    if key == LABEL_KEY || key == ARGS_KEY {
        return true;
    }

    key.strip_prefix(ARG_PREFIX).is_some_and(|index| {
        !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) && index != "0"
    })
}

pub fn build_context(label: &str, args: &[String]) -> HashMap<String, String> {
    let mut context = HashMap::new();
    context.insert(LABEL_KEY.to_string(), label.to_string());
    context.insert(ARGS_KEY.to_string(), args.join(" "));

    for (index, arg) in args.iter().enumerate() {
        context.insert(format!("{ARG_PREFIX}{}", index + 1), arg.clone());
    }

    context
}

/// Find all tokens in all arguments of templates of command.
pub fn get_tokens(templates: &[Template<'_>]) -> HashSet<String> {
    let mut tokens = HashSet::new();

    for template in templates {
        for key in template.keys() {
            let _ = tokens.insert((*key).to_string());
        }
    }

    tokens
}

pub fn get_templates(command: &[String]) -> Result<Vec<Template<'_>>> {
    let mut templates: Vec<Template> = Vec::new();

    for argument in command {
        templates.push(Template::parse(argument.as_str())?);
    }

    Ok(templates)
}

/// Renders every template with `context`.
///
/// # Errors
///
/// Returns [`crate::error::Error::Render`] when a template refers to a key
/// the context lacks, e.g. `arg3` when only two arguments were given.
pub fn interpolate_command(
    context: &HashMap<String, String>,
    templates: &[Template<'_>],
) -> Result<Vec<String>> {
    let mut interpolated_arguments: Vec<String> = Vec::new();

    for template in templates {
        interpolated_arguments.push(template.render(context)?);
    }

    Ok(interpolated_arguments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_build_context() {
        let context = build_context("give", &strings(&["Steve", "100"]));
        assert_eq!(context["label"], "give");
        assert_eq!(context["args"], "Steve 100");
        assert_eq!(context["arg1"], "Steve");
        assert_eq!(context["arg2"], "100");
        assert!(!context.contains_key("arg3"));
    }

    #[test]
    fn test_known_keys() {
        assert!(is_known_key("label"));
        assert!(is_known_key("args"));
        assert!(is_known_key("arg1"));
        assert!(is_known_key("arg12"));
        assert!(!is_known_key("arg0"));
        assert!(!is_known_key("arg"));
        assert!(!is_known_key("argx"));
        assert!(!is_known_key("name"));
    }

    #[test]
    fn test_interpolate_command() {
        let command = strings(&["echo", "{label}: {arg1} gets {arg2}"]);
        let templates = get_templates(&command).unwrap();
        let context = build_context("give", &strings(&["Steve", "100"]));

        let rendered = interpolate_command(&context, &templates).unwrap();
        assert_eq!(rendered, strings(&["echo", "give: Steve gets 100"]));
    }

    #[test]
    fn test_interpolate_command_missing_argument() {
        let command = strings(&["echo", "{arg2}"]);
        let templates = get_templates(&command).unwrap();
        let context = build_context("give", &strings(&["Steve"]));

        assert!(interpolate_command(&context, &templates).is_err());
    }

    #[test]
    fn test_get_tokens() {
        let command = strings(&["echo", "{label}", "{arg1}-{arg1}", "plain"]);
        let templates = get_templates(&command).unwrap();
        let tokens = get_tokens(&templates);
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("label"));
        assert!(tokens.contains("arg1"));
    }
}
