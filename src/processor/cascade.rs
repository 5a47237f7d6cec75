//! Ordered keyword rules. A cascade is a slice of [`Rule`]s evaluated top to
//! bottom; the first rule that resolves decides the label.

pub type Resolver = fn(&str) -> Option<String>;

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Any keyword is a substring of the input.
    AnyOf {
        keywords: &'static [&'static str],
        label: &'static str,
    },
    /// Every keyword is a substring of the input.
    AllOf {
        keywords: &'static [&'static str],
        label: &'static str,
    },
    /// Input equals one of the values exactly.
    Exact {
        values: &'static [&'static str],
        label: &'static str,
    },
    /// Input is already one of these labels and maps to itself.
    Canonical(&'static [&'static str]),
    /// Arbitrary matcher, usually a regex that builds the label from captures.
    Custom { name: &'static str, resolve: Resolver },
}

impl Rule {
    pub fn apply(&self, s: &str) -> Option<String> {
        match self {
            Rule::AnyOf { keywords, label } => {
                keywords.iter().any(|k| s.contains(k)).then(|| label.to_string())
            }
            Rule::AllOf { keywords, label } => {
                keywords.iter().all(|k| s.contains(k)).then(|| label.to_string())
            }
            Rule::Exact { values, label } => values.contains(&s).then(|| label.to_string()),
            Rule::Canonical(labels) => labels.contains(&s).then(|| s.to_string()),
            Rule::Custom { resolve, .. } => resolve(s),
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            Rule::AnyOf { label, .. }
            | Rule::AllOf { label, .. }
            | Rule::Exact { label, .. } => label,
            Rule::Canonical(_) => "canonical",
            Rule::Custom { name, .. } => name,
        }
    }
}

/// Label produced by the first matching rule.
pub fn first_match(rules: &[Rule], s: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.apply(s))
}

/// Name of the first rule that fires, for checking priority order.
pub fn matching_rule(rules: &[Rule], s: &str) -> Option<&'static str> {
    rules.iter().find(|rule| rule.apply(s).is_some()).map(Rule::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(s: &str) -> Option<String> {
        s.starts_with('!').then(|| "shout".to_string())
    }

    const RULES: &[Rule] = &[
        Rule::Canonical(&["done"]),
        Rule::Exact { values: &["x"], label: "exact" },
        Rule::AllOf { keywords: &["a", "b"], label: "both" },
        Rule::AnyOf { keywords: &["a", "b"], label: "either" },
        Rule::Custom { name: "shout", resolve: shout },
    ];

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(first_match(RULES, "ab"), Some("both".to_string()));
        assert_eq!(first_match(RULES, "b"), Some("either".to_string()));
        assert_eq!(first_match(RULES, "x"), Some("exact".to_string()));
        assert_eq!(first_match(RULES, "done"), Some("done".to_string()));
        assert_eq!(first_match(RULES, "!hey"), Some("shout".to_string()));
        assert_eq!(first_match(RULES, "zzz"), None);
    }

    #[test]
    fn test_matching_rule_names() {
        assert_eq!(matching_rule(RULES, "!a"), Some("either"));
        assert_eq!(matching_rule(RULES, "!z"), Some("shout"));
        assert_eq!(matching_rule(RULES, "done"), Some("canonical"));
        assert_eq!(matching_rule(RULES, "q"), None);
    }
}
