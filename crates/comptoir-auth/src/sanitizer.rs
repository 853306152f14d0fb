//! Input sanitizer.
//!
//! Removes the first occurrence of each denylisted token and logs a warning
//! for every removal. Input is never rejected: a value that still contains
//! a token after one pass (e.g. `''`) goes through with the remainder.

use std::sync::Arc;

use comptoir_audit::{AuditError, AuditLog};

/// Tokens stripped by [`Sanitizer::sanitize`], checked in this order.
pub const DENYLIST: [&str; 8] = ["'", "\"", ";", "--", "/*", "*/", "xp_", "sp_"];

/// Trim `input`, then remove the first occurrence of each denylisted token.
///
/// Returns the cleaned text and the tokens that were removed, in denylist
/// order. Each check runs against the text left by the previous removals.
pub fn strip_denylisted(input: &str) -> (String, Vec<&'static str>) {
    let mut sanitized = input.trim().to_string();
    let mut removed = Vec::new();

    for token in DENYLIST {
        if let Some(pos) = sanitized.find(token) {
            sanitized.replace_range(pos..pos + token.len(), "");
            removed.push(token);
        }
    }

    (sanitized, removed)
}

/// Sanitizer that reports every removal to the security log.
pub struct Sanitizer {
    audit: Arc<AuditLog>,
}

impl Sanitizer {
    pub fn new(audit: Arc<AuditLog>) -> Self {
        Self { audit }
    }

    /// Clean user-supplied text, logging one warning per removed token.
    pub async fn sanitize(&self, input: &str) -> Result<String, AuditError> {
        let (sanitized, removed) = strip_denylisted(input);

        for token in removed {
            tracing::warn!(token, "Denylisted token stripped from input");
            self.audit
                .warning(format!("Possible SQL injection attempt: {}", token))
                .await?;
        }

        Ok(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptoir_audit::LogLevel;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_input_only_trimmed() {
        assert_eq!(strip_denylisted("  alice \n"), ("alice".to_string(), vec![]));
        assert_eq!(strip_denylisted("maïs sucré"), ("maïs sucré".to_string(), vec![]));
    }

    #[test]
    fn test_removes_first_occurrence_only() {
        let (clean, removed) = strip_denylisted("a'b'c");
        assert_eq!(clean, "ab'c");
        assert_eq!(removed, vec!["'"]);
    }

    #[test]
    fn test_removal_order_follows_denylist() {
        let (clean, removed) = strip_denylisted("admin'; --");
        assert_eq!(clean, "admin ");
        assert_eq!(removed, vec!["'", ";", "--"]);
    }

    #[test]
    fn test_checks_run_on_partially_cleaned_text() {
        // Removing ';' joins the dashes into a "--" token
        let (clean, removed) = strip_denylisted("x-;-y");
        assert_eq!(clean, "xy");
        assert_eq!(removed, vec![";", "--"]);
    }

    #[test]
    fn test_comment_and_procedure_tokens() {
        let (clean, removed) = strip_denylisted("/* exec xp_cmdshell sp_who */");
        assert_eq!(clean, " exec cmdshell who ");
        assert_eq!(removed, vec!["/*", "*/", "xp_", "sp_"]);
    }

    #[tokio::test]
    async fn test_sanitize_logs_one_warning_per_token() {
        let audit = Arc::new(AuditLog::in_memory());
        let sanitizer = Sanitizer::new(audit.clone());

        let clean = sanitizer.sanitize(" bob\"; DROP ").await.unwrap();
        assert_eq!(clean, "bob DROP");

        let entries = audit.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.level == LogLevel::Warning));
        // Most recent first
        assert_eq!(entries[0].message, "Possible SQL injection attempt: ;");
        assert_eq!(entries[1].message, "Possible SQL injection attempt: \"");
    }

    #[tokio::test]
    async fn test_sanitize_clean_input_logs_nothing() {
        let audit = Arc::new(AuditLog::in_memory());
        let sanitizer = Sanitizer::new(audit.clone());

        assert_eq!(sanitizer.sanitize("alice").await.unwrap(), "alice");
        assert!(audit.list().await.unwrap().is_empty());
    }
}
