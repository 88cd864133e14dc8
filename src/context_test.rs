use super::*;
use crate::provider::MemoryProvider;
use crate::session::StaticIdentity;

fn context() -> AppContext {
    AppContext::new(Arc::new(MemoryProvider::new()), Arc::new(StaticIdentity::signed_in("u1")), ColorMode::Light)
}

#[test]
fn toggle_is_seen_by_every_clone() {
    let ctx = context();
    let other = ctx.clone();
    assert_eq!(ctx.toggle_theme(), ColorMode::Dark);
    assert_eq!(other.theme(), ColorMode::Dark);
}

#[tokio::test]
async fn current_user_comes_from_identity_source() {
    assert_eq!(context().current_user_id().await.unwrap(), Some(RecordId::from("u1")));
}

#[test]
fn from_config_builds_rest_context() {
    let config = BackendConfig::new("http://127.0.0.1:9", "anon");
    let ctx = AppContext::from_config(config, ColorMode::Dark).unwrap();
    assert!(ctx.theme().is_dark());
}
