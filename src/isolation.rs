//! Mapping from batch isolation directives to backend settings.

use sqlbench_core::IsolationLevel;

/// Map an isolation directive to the tokio-postgres level.
///
/// The match is exhaustive over the four standard levels; there is no
/// fifth value to reject.
pub fn to_postgres(level: IsolationLevel) -> tokio_postgres::IsolationLevel {
    match level {
        IsolationLevel::ReadUncommitted => tokio_postgres::IsolationLevel::ReadUncommitted,
        IsolationLevel::ReadCommitted => tokio_postgres::IsolationLevel::ReadCommitted,
        IsolationLevel::RepeatableRead => tokio_postgres::IsolationLevel::RepeatableRead,
        IsolationLevel::Serializable => tokio_postgres::IsolationLevel::Serializable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_levels_map() {
        let cases = [
            (
                IsolationLevel::ReadUncommitted,
                tokio_postgres::IsolationLevel::ReadUncommitted,
            ),
            (
                IsolationLevel::ReadCommitted,
                tokio_postgres::IsolationLevel::ReadCommitted,
            ),
            (
                IsolationLevel::RepeatableRead,
                tokio_postgres::IsolationLevel::RepeatableRead,
            ),
            (
                IsolationLevel::Serializable,
                tokio_postgres::IsolationLevel::Serializable,
            ),
        ];

        for (level, expected) in cases {
            // tokio_postgres::IsolationLevel does not derive PartialEq
            assert_eq!(format!("{:?}", to_postgres(level)), format!("{expected:?}"));
        }
    }
}
