use std::fmt::Display;

use ptaf_core::{resource_id, resource_name};
use serde_json::Value;
use tracing::warn;

#[derive(Debug)]
pub struct BatchFailure {
    pub item: String,
    pub error: String,
}

/// Per-item results of a batch operation. A failed item never stops the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn record_success(&mut self, item: impl Into<String>) {
        self.succeeded.push(item.into());
    }

    pub fn record_failure(&mut self, item: impl Into<String>, error: &dyn Display) {
        let item = item.into();
        let error = format!("{error:#}");
        warn!(item = %item, error = %error, "batch item failed");
        self.failed.push(BatchFailure { item, error });
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.succeeded.extend(other.succeeded);
        self.failed.extend(other.failed);
    }

    pub fn print(&self, verb: &str) {
        for item in &self.succeeded {
            println!("{verb}: {item}");
        }
        self.print_failures();
        println!(
            "{} succeeded, {} failed",
            self.succeeded.len(),
            self.failed.len()
        );
    }

    pub fn print_failures(&self) {
        for failure in &self.failed {
            eprintln!("Failed: {} ({})", failure.item, failure.error);
        }
    }

    pub fn ensure_success(&self) -> anyhow::Result<()> {
        if !self.failed.is_empty() {
            anyhow::bail!("{} item(s) failed", self.failed.len());
        }
        Ok(())
    }
}

/// Human label for a resource: its name, else its id, else its position.
pub fn item_label(value: &Value, index: usize) -> String {
    resource_name(value)
        .or_else(|| resource_id(value))
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", index + 1))
}
