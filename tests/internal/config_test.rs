#[cfg(test)]
mod tests {
    use crate::completions::streak::StreakPolicy;
    use crate::config::AppConfig;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.streak_policy, StreakPolicy::GraceToday);
        assert_eq!(config.reminder.time, "09:00");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
log_json = false
streak_policy = "strict"

[coach]
model = "local-model"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(!config.log_json);
        assert_eq!(config.streak_policy, StreakPolicy::Strict);
        assert_eq!(config.coach.model, "local-model");
        assert_eq!(config.coach.max_tokens, 500);
        assert!(config.reminder.enabled);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "streak_policy = [").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert_eq!(err.stage, "config");
        assert!(err.context.unwrap().contains("settings.toml"));
    }
}
