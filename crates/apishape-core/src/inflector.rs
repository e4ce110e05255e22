//! Inflection capability used for association key naming
//!
//! The pipeline never inflects words itself; it calls through the
//! [`Inflector`] trait so hosts can inject their own rules (irregular
//! plurals, domain vocabularies). [`EnglishInflector`] is the default; it
//! resolves irregular words from a table and delegates the rest to the
//! `Inflector` crate.

use std::fmt;

/// English-style identifier inflection
///
/// Implementations must be deterministic: the same input always yields the
/// same output.
pub trait Inflector: Send + Sync + fmt::Debug {
    /// Convert a model name to its table form: lower-case, underscored and
    /// pluralized (`BlogPost` -> `blog_posts`)
    fn tableize(&self, name: &str) -> String;

    /// Singular form of a word (`blog_posts` -> `blog_post`)
    fn singularize(&self, name: &str) -> String;

    /// Plural form of a word (`comment` -> `comments`)
    fn pluralize(&self, name: &str) -> String;
}

/// Irregular `(singular, plural)` pairs
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("ox", "oxen"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("leaf", "leaves"),
    ("loaf", "loaves"),
    ("datum", "data"),
    ("medium", "media"),
    ("curriculum", "curricula"),
    ("memorandum", "memoranda"),
    ("bacterium", "bacteria"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("genus", "genera"),
    ("cactus", "cacti"),
    ("alumnus", "alumni"),
    ("analysis", "analyses"),
    ("thesis", "theses"),
    ("crisis", "crises"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
];

/// Words with the same singular and plural form
const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
    "metadata",
    "feedback",
    "software",
    "staff",
];

/// Default inflector backed by the `Inflector` crate
///
/// Only the last underscore-separated word of an identifier is inflected.
/// Irregular and uncountable words are resolved from fixed tables before
/// falling back to the crate's rules, so both directions stay stable when
/// applied to their own output.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl EnglishInflector {
    fn inflect_last_word(name: &str, inflect: impl Fn(&str) -> String) -> String {
        match name.rfind('_') {
            Some(split) => format!("{}{}", &name[..=split], inflect(&name[split + 1..])),
            None => inflect(name),
        }
    }

    fn plural_word(word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.is_empty() || UNCOUNTABLES.contains(&lower.as_str()) {
            return word.to_string();
        }
        if let Some((_, plural)) = IRREGULARS.iter().find(|(singular, _)| *singular == lower) {
            return match_case(word, plural);
        }
        if IRREGULARS.iter().any(|(_, plural)| *plural == lower) {
            return word.to_string();
        }
        ::inflector::string::pluralize::to_plural(word)
    }

    fn singular_word(word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.is_empty() || UNCOUNTABLES.contains(&lower.as_str()) {
            return word.to_string();
        }
        if let Some((singular, _)) = IRREGULARS.iter().find(|(_, plural)| *plural == lower) {
            return match_case(word, singular);
        }
        if IRREGULARS.iter().any(|(singular, _)| *singular == lower) {
            return word.to_string();
        }
        ::inflector::string::singularize::to_singular(word)
    }
}

/// Carry a leading capital from `original` over to `replacement`
fn match_case(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(first) if first.is_uppercase() => {
            let mut chars = replacement.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect())
                .unwrap_or_default()
        }
        _ => replacement.to_string(),
    }
}

impl Inflector for EnglishInflector {
    fn tableize(&self, name: &str) -> String {
        let underscored = ::inflector::cases::snakecase::to_snake_case(name);
        Self::inflect_last_word(&underscored, Self::plural_word)
    }

    fn singularize(&self, name: &str) -> String {
        Self::inflect_last_word(name, Self::singular_word)
    }

    fn pluralize(&self, name: &str) -> String {
        Self::inflect_last_word(name, Self::plural_word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tableize_model_names() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.tableize("Comment"), "comments");
        assert_eq!(inflector.tableize("BlogPost"), "blog_posts");
        assert_eq!(inflector.tableize("Category"), "categories");
    }

    #[test]
    fn test_singularize_table_names() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.singularize("posts"), "post");
        assert_eq!(inflector.singularize("blog_posts"), "blog_post");
        assert_eq!(inflector.singularize("categories"), "category");
    }

    #[test]
    fn test_pluralize() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.pluralize("comment"), "comments");
        assert_eq!(inflector.pluralize("category"), "categories");
    }

    #[test]
    fn test_irregular_nouns() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.tableize("Person"), "people");
        assert_eq!(inflector.singularize("people"), "person");
        assert_eq!(inflector.tableize("Child"), "children");
        assert_eq!(inflector.singularize("children"), "child");
        assert_eq!(inflector.tableize("Datum"), "data");
        assert_eq!(inflector.singularize("data"), "datum");
        assert_eq!(inflector.tableize("Medium"), "media");
        assert_eq!(inflector.singularize("media"), "medium");
        assert_eq!(inflector.pluralize("Person"), "People");
    }

    #[test]
    fn test_irregular_last_word_of_compound_name() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.tableize("SalesPerson"), "sales_people");
        assert_eq!(inflector.singularize("sales_people"), "sales_person");
        assert_eq!(inflector.tableize("SocialMedium"), "social_media");
    }

    #[test]
    fn test_uncountable_nouns() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.tableize("Equipment"), "equipment");
        assert_eq!(inflector.singularize("equipment"), "equipment");
        assert_eq!(inflector.tableize("Sheep"), "sheep");
        assert_eq!(inflector.pluralize("news"), "news");
    }

    #[test]
    fn test_irregular_forms_are_stable() {
        let inflector = EnglishInflector;
        assert_eq!(inflector.tableize("people"), "people");
        assert_eq!(inflector.pluralize("children"), "children");
        assert_eq!(inflector.singularize("person"), "person");
        assert_eq!(inflector.singularize(&inflector.tableize("Child")), "child");
    }
}
