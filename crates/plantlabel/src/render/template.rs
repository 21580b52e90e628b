//! Rewrites top-level assignments of a label template.

use regex::Regex;

use crate::params::RenderParameterSet;

/// Return the template with each parameter's assignment set to its value.
///
/// Assignments are matched at the start of a line (`name = ...;`). Parameters
/// the template never assigns are appended at the end, where they still take
/// effect as the last assignment. Also returns the appended keys.
pub fn apply_parameters(template: &str, params: &RenderParameterSet) -> (String, Vec<String>) {
    let mut content = template.to_string();
    let mut appended = Vec::new();

    for (key, value) in params.iter() {
        let pattern = format!(r"(?m)^([ \t]*){}[ \t]*=[^;\n]*;", regex::escape(key));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };

        if re.is_match(&content) {
            let literal = value.to_literal();
            content = re
                .replace_all(&content, |caps: &regex::Captures| {
                    format!("{}{} = {};", &caps[1], key, literal)
                })
                .into_owned();
        } else {
            appended.push(key.to_string());
        }
    }

    if !appended.is_empty() {
        if !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str("\n// Parameters set by plantlabel\n");
        for key in &appended {
            if let Some(value) = params.get(key) {
                content.push_str(&format!("{} = {};\n", key, value.to_literal()));
            }
        }
    }

    (content, appended)
}
