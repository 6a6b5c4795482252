//! Mapping of request parameters onto a template's declared parameters.

use std::collections::HashMap;

use reporting_core::model::Template;

/// Request values treated as "no value".
const SENTINEL_VALUES: [&str; 2] = ["null", "undefined"];

/// Selects the values of `template`'s declared parameters from a
/// multi-valued request map.
///
/// Request keys match declared names ignoring ASCII case and the result is
/// keyed by the declared name. Only the first value of a key is used. Blank
/// values and the literals `null` and `undefined` are left out, as are
/// parameters the request does not mention.
///
/// When several request keys match one parameter, an exact-case match wins,
/// otherwise the lexicographically smallest key is used.
pub fn map_request_parameters(
    template: &Template,
    request: &HashMap<String, Vec<String>>,
) -> HashMap<String, String> {
    let mut mapped = HashMap::new();
    if !template.has_parameters() {
        return mapped;
    }

    for name in template.parameter_names() {
        let Some(value) = find_request_value(name, request) else {
            continue;
        };

        if is_present(value) {
            mapped.insert(name.to_owned(), value.to_owned());
        }
    }

    mapped
}

fn find_request_value<'a>(
    name: &str,
    request: &'a HashMap<String, Vec<String>>,
) -> Option<&'a str> {
    let values = match request.get(name) {
        Some(values) => values,
        None => {
            request
                .iter()
                .filter(|(key, _)| key.eq_ignore_ascii_case(name))
                .min_by(|(a, _), (b, _)| a.cmp(b))?
                .1
        }
    };

    values.first().map(String::as_str)
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty() && !SENTINEL_VALUES.contains(&value)
}

#[cfg(test)]
mod tests {
    use reporting_core::model::TemplateParameter;

    use super::*;

    fn template(names: &[&str]) -> Template {
        let mut template = Template::new("Stock");
        template.parameters = names
            .iter()
            .map(|name| TemplateParameter {
                name: (*name).to_owned(),
                display_name: name.to_uppercase(),
                ..Default::default()
            })
            .collect();
        template
    }

    fn request(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(key, values)| {
                let values = values.iter().map(|v| (*v).to_owned()).collect();
                ((*key).to_owned(), values)
            })
            .collect()
    }

    #[test]
    fn matches_names_ignoring_case() {
        let template = template(&["Region"]);
        let mapped = map_request_parameters(&template, &request(&[("region", &["North"])]));

        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped["Region"], "North");
    }

    #[test]
    fn drops_sentinels_and_blanks() {
        let template = template(&["Region", "district", "zone", "period"]);
        let request = request(&[
            ("region", &["null"]),
            ("district", &[""]),
            ("zone", &["undefined"]),
            ("period", &["  "]),
        ]);

        assert!(map_request_parameters(&template, &request).is_empty());
    }

    #[test]
    fn sentinels_are_case_sensitive() {
        let template = template(&["region"]);
        let mapped = map_request_parameters(&template, &request(&[("region", &["NULL"])]));
        assert_eq!(mapped["region"], "NULL");
    }

    #[test]
    fn uses_first_value_only() {
        let template = template(&["program"]);
        let mapped =
            map_request_parameters(&template, &request(&[("program", &["Family Planning", "EPI"])]));
        assert_eq!(mapped["program"], "Family Planning");

        let mapped = map_request_parameters(&template, &request(&[("program", &[])]));
        assert!(mapped.is_empty());
    }

    #[test]
    fn ignores_undeclared_request_keys() {
        let template = template(&["facility"]);
        let mapped = map_request_parameters(
            &template,
            &request(&[("facility", &["F1"]), ("format", &["pdf"])]),
        );
        assert_eq!(mapped.len(), 1);
        assert!(!mapped.contains_key("format"));
    }

    #[test]
    fn template_without_parameters_maps_nothing() {
        let template = Template::new("Empty");
        let mapped = map_request_parameters(&template, &request(&[("region", &["North"])]));
        assert!(mapped.is_empty());
    }

    #[test]
    fn exact_case_key_wins_over_other_matches() {
        let template = template(&["Region"]);
        let request = request(&[
            ("REGION", &["upper"]),
            ("Region", &["exact"]),
            ("region", &["lower"]),
        ]);
        assert_eq!(map_request_parameters(&template, &request)["Region"], "exact");
    }

    #[test]
    fn smallest_key_wins_without_exact_match() {
        let template = template(&["Region"]);
        let request = request(&[("region", &["lower"]), ("REGION", &["upper"])]);
        assert_eq!(map_request_parameters(&template, &request)["Region"], "upper");
    }
}
