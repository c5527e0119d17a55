// src/site/newsletter.rs
//! Newsletter signups, persisted to an append-only CSV file.
//!
//! Each line is `address,rfc3339-timestamp`. Duplicate detection
//! compares lowercased addresses, but the stored address keeps the
//! casing the subscriber typed.

use crate::error::AppError;
use crate::types::EmailAddress;
use chrono::{SecondsFormat, Utc};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// What happened to a signup attempt that didn't error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Subscribed,
    AlreadySubscribed,
}

/// The CSV-backed subscriber list.
pub struct SubscriberBook {
    csv_path: PathBuf,
}

impl SubscriberBook {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
        }
    }

    /// Records a subscription, deduplicating case-insensitively.
    pub fn subscribe(&self, email: &EmailAddress) -> Result<SignupOutcome, AppError> {
        self.ensure_parent_dir()?;

        if self.existing_emails()?.contains(&email.normalized()) {
            log::debug!("Duplicate signup ignored: {}", email.normalized());
            return Ok(SignupOutcome::AlreadySubscribed);
        }

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.csv_path)?;
        writeln!(file, "{},{}", email.as_str(), timestamp)?;

        log::info!("New newsletter subscriber recorded");
        Ok(SignupOutcome::Subscribed)
    }

    /// Current subscriber count.
    pub fn subscriber_count(&self) -> Result<usize, AppError> {
        Ok(self.existing_emails()?.len())
    }

    /// Lowercased addresses already on file. A missing file means an
    /// empty list, not an error.
    fn existing_emails(&self) -> Result<HashSet<String>, AppError> {
        let content = match fs::read_to_string(&self.csv_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| line.split(',').next())
            .map(str::to_lowercase)
            .collect())
    }

    fn ensure_parent_dir(&self) -> Result<(), AppError> {
        if let Some(parent) = self.csv_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_csv(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "newsletter-{}-{}.csv",
            tag,
            uuid::Uuid::new_v4().as_simple()
        ))
    }

    fn email(addr: &str) -> EmailAddress {
        EmailAddress::new(addr).unwrap()
    }

    #[test]
    fn first_signup_appends_a_line() {
        let path = temp_csv("first");
        let book = SubscriberBook::new(&path);

        let outcome = book.subscribe(&email("reader@example.com")).unwrap();
        assert_eq!(outcome, SignupOutcome::Subscribed);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("reader@example.com,"));
        assert_eq!(content.lines().count(), 1);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn duplicate_is_detected_case_insensitively() {
        let path = temp_csv("dup");
        let book = SubscriberBook::new(&path);

        book.subscribe(&email("Reader@Example.com")).unwrap();
        let outcome = book.subscribe(&email("reader@EXAMPLE.com")).unwrap();

        assert_eq!(outcome, SignupOutcome::AlreadySubscribed);
        assert_eq!(book.subscriber_count().unwrap(), 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap().lines().count(),
            1,
            "duplicate must not append"
        );

        fs::remove_file(&path).ok();
    }

    #[test]
    fn distinct_addresses_accumulate() {
        let path = temp_csv("many");
        let book = SubscriberBook::new(&path);

        book.subscribe(&email("a@example.com")).unwrap();
        book.subscribe(&email("b@example.com")).unwrap();

        assert_eq!(book.subscriber_count().unwrap(), 2);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_parent_directory_is_created() {
        let dir = std::env::temp_dir().join(format!(
            "newsletter-dir-{}",
            uuid::Uuid::new_v4().as_simple()
        ));
        let path = dir.join("list.csv");
        let book = SubscriberBook::new(&path);

        book.subscribe(&email("reader@example.com")).unwrap();
        assert!(path.exists());

        fs::remove_dir_all(&dir).ok();
    }
}
