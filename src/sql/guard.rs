/// Keywords every guard rejects, whatever the configuration adds.
pub const BUILTIN_FORBIDDEN_KEYWORDS: [&str; 7] =
    ["insert", "update", "delete", "drop", "truncate", "alter", "create"];

/// Rejects generated SQL containing any denylisted keyword.
///
/// Matching is a case-insensitive substring test, not a tokenizer, so
/// `dropdown` trips `drop` as well.
#[derive(Debug, Clone)]
pub struct KeywordGuard {
    keywords: Vec<String>,
}

impl KeywordGuard {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self { keywords }
    }

    /// Built-in keywords followed by any configured extras, without duplicates.
    pub fn with_builtins<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = Self::new(BUILTIN_FORBIDDEN_KEYWORDS);
        for keyword in Self::new(extra).keywords {
            if !guard.keywords.contains(&keyword) {
                guard.keywords.push(keyword);
            }
        }
        guard
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// First denylisted keyword found in `sql`, in denylist order.
    pub fn find_forbidden(&self, sql: &str) -> Option<&str> {
        let sql_lower = sql.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| sql_lower.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn default_guard() -> KeywordGuard {
        KeywordGuard::new(AppConfig::default().guard.forbidden_keywords)
    }

    #[test]
    fn select_queries_pass() {
        let guard = default_guard();
        assert_eq!(
            guard.find_forbidden(r#"SELECT v.name FROM "Vendor" v ORDER BY v.name"#),
            None
        );
    }

    #[test]
    fn each_mutating_keyword_is_caught_in_any_case() {
        let guard = default_guard();
        for sql in [
            "INSERT INTO \"Invoice\" VALUES (1)",
            "update \"Invoice\" set status = 'PAID'",
            "Delete FROM \"Payment\"",
            "DROP TABLE Invoice;",
            "TRUNCATE \"LineItem\"",
            "ALTER TABLE \"Vendor\" ADD x int",
            "CREATE TABLE t (id int)",
        ] {
            assert!(guard.find_forbidden(sql).is_some(), "not rejected: {sql}");
        }
    }

    #[test]
    fn substring_matches_count() {
        let guard = default_guard();
        assert_eq!(
            guard.find_forbidden(r#"SELECT "dropdown" FROM "Vendor""#),
            Some("drop")
        );
        assert_eq!(
            guard.find_forbidden(r#"SELECT "createdAt" FROM "Invoice""#),
            Some("create")
        );
    }

    #[test]
    fn builtins_survive_an_empty_configuration() {
        let guard = KeywordGuard::with_builtins(Vec::<String>::new());
        assert_eq!(guard.keywords(), BUILTIN_FORBIDDEN_KEYWORDS);
        assert_eq!(guard.find_forbidden("DROP TABLE Invoice;"), Some("drop"));
    }

    #[test]
    fn configured_keywords_extend_the_builtins() {
        let guard = KeywordGuard::with_builtins(["Grant", "DROP"]);
        assert_eq!(guard.keywords().len(), 8);
        assert_eq!(guard.keywords()[7], "grant");
        assert_eq!(guard.find_forbidden("grant all on x to y"), Some("grant"));
    }

    #[test]
    fn keywords_are_normalised() {
        let guard = KeywordGuard::new([" GRANT ", "", "Revoke"]);
        assert_eq!(guard.keywords(), ["grant", "revoke"]);
        assert_eq!(guard.find_forbidden("grant all on x to y"), Some("grant"));
    }
}
