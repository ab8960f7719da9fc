use super::*;

use std::collections::HashMap;

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(
        normalize_database_url("/var/lib/pantry.db"),
        "sqlite:///var/lib/pantry.db"
    );
}

#[test]
fn keeps_memory_and_explicit_urls() {
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url("sqlite://./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(normalize_database_url("  "), DEFAULT_DATABASE_URL);
}

#[test]
fn keeps_windows_absolute_path_with_single_sqlite_colon() {
    assert_eq!(
        normalize_database_url("sqlite:C:\\Users\\alice\\food.db"),
        "sqlite:C:/Users/alice/food.db"
    );
    assert_eq!(
        normalize_database_url("C:\\Users\\alice\\food.db"),
        "sqlite:C:/Users/alice/food.db"
    );
    assert_eq!(
        normalize_database_url("sqlite://C:/Users/alice/food.db"),
        "sqlite:C:/Users/alice/food.db"
    );
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    settings
        .apply_file(
            r#"
            database_url = "./pantry.db"
            capture_file = "/home/pi/last_capture.json"
            capture_max_age_minutes = 5
            "#,
        )
        .expect("valid toml");

    assert_eq!(settings.database_url(), "sqlite://./pantry.db");
    assert_eq!(
        settings.capture_file,
        PathBuf::from("/home/pi/last_capture.json")
    );
    assert_eq!(settings.capture_max_age_minutes, 5);
}

#[test]
fn prefixed_env_wins_over_generic_database_url() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_URL", "sqlite://generic.db"),
        ("FOOD_INVENTORY__DATABASE_URL", "sqlite://specific.db"),
        ("FOOD_INVENTORY__CAPTURE_MAX_AGE_MINUTES", "not-a-number"),
    ]);
    let mut settings = Settings::default();
    settings.apply_env(|name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.database_url(), "sqlite://specific.db");
    assert_eq!(settings.capture_max_age_minutes, 30);
}

#[test]
fn out_of_range_capture_ages_keep_the_default() {
    let mut settings = Settings::default();
    settings
        .apply_file("capture_max_age_minutes = 0")
        .expect("valid toml");
    assert_eq!(settings.capture_max_age_minutes, 30);

    settings
        .apply_file("capture_max_age_minutes = -5")
        .expect("valid toml");
    assert_eq!(settings.capture_max_age_minutes, 30);

    let env: HashMap<&str, &str> = HashMap::from([(
        "FOOD_INVENTORY__CAPTURE_MAX_AGE_MINUTES",
        "9223372036854775807",
    )]);
    settings.apply_env(|name| env.get(name).map(|v| v.to_string()));
    assert_eq!(settings.capture_max_age_minutes, 30);
}

#[test]
fn capture_max_age_bounds() {
    assert_eq!(capture_max_age(1), Some(chrono::Duration::minutes(1)));
    assert_eq!(capture_max_age(30), Some(chrono::Duration::minutes(30)));
    assert_eq!(capture_max_age(0), None);
    assert_eq!(capture_max_age(-1), None);
    assert_eq!(capture_max_age(i64::MAX), None);
}

#[test]
fn unset_database_url_uses_front_end_fallback() {
    let settings = Settings::default();
    assert_eq!(
        settings.database_url_or(Path::new("/data/inventory.sqlite3")),
        "sqlite:///data/inventory.sqlite3"
    );
    assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
}

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join("absent.toml"));
    assert_eq!(settings.capture_file, PathBuf::from("last_capture.json"));
}
