use crate::errors::StoreError;
use crate::storage::{columns, ReadErrorPolicy, RowStore};

/// Next sequential identifier: one past the number of stored records, read
/// from the identifier column.
///
/// Under concurrent writers two sessions can compute the same value; the
/// bundled backends assume a single writer.
pub fn next_identifier(
    store: &dyn RowStore,
    policy: ReadErrorPolicy,
) -> Result<u64, StoreError> {
    match store.read_column(columns::IDENTIFIER) {
        Ok(identifiers) => Ok(identifiers.len() as u64 + 1),
        Err(err) => match policy {
            ReadErrorPolicy::FailOpen => {
                tracing::warn!(error = %err, "identifier column unreadable, defaulting to 1");
                Ok(1)
            }
            ReadErrorPolicy::Propagate => Err(err),
        },
    }
}

/// Whether the candidate prescription number already exists in the store.
pub fn is_duplicate(
    store: &dyn RowStore,
    prescription_number: &str,
    policy: ReadErrorPolicy,
) -> Result<bool, StoreError> {
    match store.read_column(columns::PRESCRIPTION_NUMBER) {
        Ok(existing) => Ok(existing.iter().any(|value| value == prescription_number)),
        Err(err) => match policy {
            ReadErrorPolicy::FailOpen => {
                tracing::warn!(error = %err, "prescription column unreadable, skipping duplicate check");
                Ok(false)
            }
            ReadErrorPolicy::Propagate => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[derive(Debug)]
    struct BrokenStore;

    impl RowStore for BrokenStore {
        fn read_column(&self, _column: usize) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Storage("unreachable".into()))
        }

        fn append_row(&self, _row: &[String]) -> Result<(), StoreError> {
            Err(StoreError::Storage("unreachable".into()))
        }
    }

    fn seeded_store(count: u64) -> MemoryStore {
        MemoryStore::seeded(
            (1..=count)
                .map(|id| vec![id.to_string(), format!("{:014}", id)])
                .collect(),
        )
    }

    #[test]
    fn next_identifier_is_count_plus_one() {
        let store = seeded_store(3);
        assert_eq!(
            next_identifier(&store, ReadErrorPolicy::FailOpen).unwrap(),
            4
        );
    }

    #[test]
    fn next_identifier_fail_open_defaults_to_one() {
        assert_eq!(
            next_identifier(&BrokenStore, ReadErrorPolicy::FailOpen).unwrap(),
            1
        );
    }

    #[test]
    fn next_identifier_propagate_surfaces_the_error() {
        assert!(next_identifier(&BrokenStore, ReadErrorPolicy::Propagate).is_err());
    }

    #[test]
    fn duplicate_detection_checks_membership() {
        let store = MemoryStore::seeded(vec![vec![
            "1".to_string(),
            "2026-08-01".to_string(),
            "PASIEN".to_string(),
            "111111".to_string(),
            "1111111111111111111".to_string(),
            "99999999999999".to_string(),
        ]]);
        assert!(is_duplicate(&store, "99999999999999", ReadErrorPolicy::FailOpen).unwrap());
        assert!(!is_duplicate(&store, "12345678901234", ReadErrorPolicy::FailOpen).unwrap());
    }

    #[test]
    fn duplicate_check_fail_open_assumes_no_duplicate() {
        assert!(!is_duplicate(&BrokenStore, "12345678901234", ReadErrorPolicy::FailOpen).unwrap());
        assert!(is_duplicate(&BrokenStore, "12345678901234", ReadErrorPolicy::Propagate).is_err());
    }
}
