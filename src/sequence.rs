use std::collections::HashMap;

/// monthly sequence counter contract for human-readable document numbers
///
/// numbering restarts each (prefix, year-month) bucket; durable issuance
/// belongs to the persistence layer, this is only the contract the engine's
/// callers program against.
pub trait SequenceIssuer {
    fn next_sequence(&mut self, prefix: &str, year_month: (i32, u32)) -> u32;
}

/// hashmap-backed issuer for tests, demos, and simple deployments
#[derive(Debug, Default)]
pub struct InMemorySequenceIssuer {
    counters: HashMap<(String, i32, u32), u32>,
}

impl InMemorySequenceIssuer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SequenceIssuer for InMemorySequenceIssuer {
    fn next_sequence(&mut self, prefix: &str, (year, month): (i32, u32)) -> u32 {
        let counter = self
            .counters
            .entry((prefix.to_string(), year, month))
            .or_insert(0);
        *counter += 1;
        *counter
    }
}

/// format a document number like `GL-202601-0042`
pub fn format_document_number(prefix: &str, (year, month): (i32, u32), sequence: u32) -> String {
    format!("{prefix}-{year:04}{month:02}-{sequence:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_per_bucket() {
        let mut issuer = InMemorySequenceIssuer::new();

        assert_eq!(issuer.next_sequence("GL", (2026, 1)), 1);
        assert_eq!(issuer.next_sequence("GL", (2026, 1)), 2);
        // new month restarts, other prefixes are independent
        assert_eq!(issuer.next_sequence("GL", (2026, 2)), 1);
        assert_eq!(issuer.next_sequence("SS", (2026, 1)), 1);
    }

    #[test]
    fn test_format_document_number() {
        assert_eq!(
            format_document_number("GL", (2026, 1), 42),
            "GL-202601-0042"
        );
        assert_eq!(
            format_document_number("SS", (2026, 12), 7),
            "SS-202612-0007"
        );
    }
}
