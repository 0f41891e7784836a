#[cfg(test)]
mod tests {
    use crate::catalog::SelectError;
    use crate::error::SparkError;

    #[test]
    fn test_error_creation() {
        let error = SparkError::new("Test error", "test_stage");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.stage, "test_stage");
        assert!(error.account.is_none());
    }

    #[test]
    fn test_error_with_context() {
        let error = SparkError::new("Test error", "test_stage")
            .with_context("Additional context");
        assert_eq!(error.context.as_deref(), Some("Additional context"));
    }

    #[test]
    fn test_error_with_account() {
        let error = SparkError::new("Test error", "test_stage")
            .with_account("acct-1");
        assert_eq!(error.account.as_deref(), Some("acct-1"));
    }

    #[test]
    fn test_error_display() {
        let error = SparkError::new("Test error", "test_stage")
            .with_context("context")
            .with_account("acct-1");
        let display = format!("{}", error);
        assert!(display.starts_with("[test_stage] Test error"));
        assert!(display.contains("(account: acct-1)"));
        assert!(display.contains("(context: context)"));
    }

    #[test]
    fn test_empty_catalog_converts_to_selection_error() {
        let error = SparkError::from(SelectError::EmptyCatalog);
        assert_eq!(error.stage, "selection");
        assert!(error.message.contains("catalog is empty"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let error = SparkError::from(io);
        assert_eq!(error.stage, "io");
        assert_eq!(error.source.as_deref(), Some("std::io"));
    }
}
