use super::*;

/// # Safety
/// Env-mutating tests share one lock so they never interleave.
unsafe fn clear_forge_env() {
    unsafe {
        std::env::remove_var("FORGE_BACKEND_URL");
        std::env::remove_var("FORGE_API_KEY");
        std::env::remove_var("FORGE_ACCESS_TOKEN");
        std::env::remove_var("FORGE_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("FORGE_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("FORGE_PAGE_SIZE");
    }
}

static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[test]
fn from_env_applies_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_forge_env();
        std::env::set_var("FORGE_BACKEND_URL", "https://project.example.test/");
        std::env::set_var("FORGE_API_KEY", "anon");
    }

    let cfg = BackendConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://project.example.test");
    assert_eq!(cfg.api_key, "anon");
    assert_eq!(cfg.access_token, None);
    assert_eq!(cfg.bearer(), "anon");
    assert_eq!(cfg.timeouts, Timeouts::default());
    assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);

    unsafe { clear_forge_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_forge_env();
        std::env::set_var("FORGE_BACKEND_URL", "http://localhost:54321");
        std::env::set_var("FORGE_API_KEY", "anon");
        std::env::set_var("FORGE_ACCESS_TOKEN", "user-jwt");
        std::env::set_var("FORGE_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("FORGE_CONNECT_TIMEOUT_SECS", "2");
        std::env::set_var("FORGE_PAGE_SIZE", "50");
    }

    let cfg = BackendConfig::from_env().unwrap();
    assert_eq!(cfg.bearer(), "user-jwt");
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 5, connect_secs: 2 });
    assert_eq!(cfg.page_size, 50);

    unsafe { clear_forge_env() };
}

#[test]
fn from_env_ignores_unparsable_numbers() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_forge_env();
        std::env::set_var("FORGE_BACKEND_URL", "http://localhost:54321");
        std::env::set_var("FORGE_API_KEY", "anon");
        std::env::set_var("FORGE_REQUEST_TIMEOUT_SECS", "soon");
        std::env::set_var("FORGE_PAGE_SIZE", "0");
    }

    let cfg = BackendConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    assert_eq!(cfg.page_size, 1);

    unsafe { clear_forge_env() };
}

#[test]
fn from_env_requires_url_and_key() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_forge_env();
        std::env::set_var("FORGE_API_KEY", "anon");
    }
    let err = BackendConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Missing { ref var } if var == "FORGE_BACKEND_URL"));

    unsafe {
        clear_forge_env();
        std::env::set_var("FORGE_BACKEND_URL", "http://localhost:54321");
    }
    let err = BackendConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::Missing { ref var } if var == "FORGE_API_KEY"));

    unsafe { clear_forge_env() };
}

#[test]
fn overrides_win_over_env_and_fill_gaps() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_forge_env();
        std::env::set_var("FORGE_BACKEND_URL", "http://from-env");
        std::env::set_var("FORGE_PAGE_SIZE", "25");
    }

    let cfg = BackendConfig::from_env_with(|key| match key {
        API_KEY_VAR => Some("flag-key".to_owned()),
        BACKEND_URL_VAR => Some("http://from-flag/".to_owned()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.base_url, "http://from-flag");
    assert_eq!(cfg.api_key, "flag-key");
    assert_eq!(cfg.page_size, 25);

    let err = BackendConfig::from_env_with(|_| None).unwrap_err();
    assert!(matches!(err, ConfigError::Missing { ref var } if var == API_KEY_VAR));

    unsafe { clear_forge_env() };
}
