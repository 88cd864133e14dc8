use super::*;
use crate::provider::MemoryProvider;
use crate::session::StaticIdentity;
use crate::state::ColorMode;
use serde_json::json;
use std::sync::Arc;
use time::macros::datetime;

fn setup(identity: StaticIdentity) -> (Arc<MemoryProvider>, AppContext) {
    let provider = Arc::new(MemoryProvider::new());
    provider.seed(
        "cal",
        vec![
            json!({"cal_id": 3, "title": "Lesson", "details": "", "starttime": "2024-05-01T09:00:00Z", "endtime": "2024-05-01T10:30:00Z", "id": "u1"}),
            json!({"cal_id": 5, "title": "Solo", "details": "", "starttime": "2024-05-02T09:00:00Z", "endtime": "2024-05-02T09:45:00Z", "id": "u1"}),
            json!({"cal_id": 9, "title": "Other", "details": "", "starttime": "2024-05-03T09:00:00Z", "endtime": "2024-05-03T10:00:00Z", "id": "u2"}),
        ],
    );
    let ctx = AppContext::new(provider.clone(), Arc::new(identity), ColorMode::Light);
    (provider, ctx)
}

async fn loaded() -> (Arc<MemoryProvider>, CalendarPage) {
    let (provider, ctx) = setup(StaticIdentity::signed_in("u1"));
    let mut page = CalendarPage::new();
    page.load(&ctx).await;
    (provider, page)
}

#[tokio::test]
async fn loads_only_current_users_bookings() {
    let (_, page) = loaded().await;
    let ids: Vec<i64> = page.bookings().iter().map(|b| b.cal_id).collect();
    assert_eq!(ids, vec![3, 5]);
    assert_eq!(page.status_text(), None);
}

#[tokio::test]
async fn anonymous_user_falls_back_to_default_user() {
    let (_, ctx) = setup(StaticIdentity::anonymous());
    let mut page = CalendarPage::new();
    page.load(&ctx).await;
    assert_eq!(page.user(), &RecordId::new(FALLBACK_USER));
    assert!(page.bookings().is_empty());
}

#[tokio::test]
async fn saving_draft_allocates_max_plus_one_without_backend_write() {
    let (provider, mut page) = loaded().await;
    let mut draft = page.draft(datetime!(2024-05-04 8:00 UTC), datetime!(2024-05-04 9:00 UTC));
    draft.title = "Checkride".into();
    assert_eq!(page.save(draft).unwrap(), 6);
    assert_eq!(page.bookings().len(), 3);
    assert_eq!(provider.calls("cal"), 1);
}

#[tokio::test]
async fn editing_replaces_matching_booking() {
    let (_, mut page) = loaded().await;
    let mut edit = page.bookings()[0].clone();
    edit.title = "Lesson 2".into();
    assert_eq!(page.save(edit), Ok(3));
    assert_eq!(page.bookings()[0].title, "Lesson 2");
    assert_eq!(page.bookings()[1].title, "Solo");
}

#[tokio::test]
async fn delete_removes_exactly_one_booking() {
    let (_, mut page) = loaded().await;
    let removed = page.delete(5).unwrap();
    assert_eq!(removed.title, "Solo");
    assert_eq!(page.bookings().len(), 1);
    assert_eq!(page.delete(5), Err(BookingError::Missing(5)));
    assert_eq!(page.delete(0), Err(BookingError::Unsaved));
}

#[tokio::test]
async fn foreign_booking_is_read_only() {
    let (_, mut page) = loaded().await;
    let foreign = Booking::draft(RecordId::from("u2"), datetime!(2024-05-04 8:00 UTC), datetime!(2024-05-04 9:00 UTC));
    assert!(!page.is_editable(&foreign));
    assert_eq!(page.save(foreign), Err(BookingError::NotOwner));
}

#[tokio::test]
async fn reload_keeps_local_edits() {
    let (provider, ctx) = setup(StaticIdentity::signed_in("u1"));
    let mut page = CalendarPage::new();
    page.load(&ctx).await;
    page.delete(3).unwrap();
    page.load(&ctx).await;
    assert_eq!(page.bookings().len(), 1);
    assert_eq!(provider.calls("cal"), 1);
}

#[test]
fn duration_label_formats_hours_and_minutes() {
    let booking = Booking::draft(RecordId::from("u1"), datetime!(2024-05-04 8:00 UTC), datetime!(2024-05-04 9:45 UTC));
    assert_eq!(CalendarPage::duration_label(&booking), "1h 45m");
}

#[tokio::test]
async fn failed_load_reports_error_text() {
    let (provider, ctx) = setup(StaticIdentity::signed_in("u1"));
    provider.fail("cal");
    let mut page = CalendarPage::new();
    page.load(&ctx).await;
    assert_eq!(page.status_text().as_deref(), Some("Error loading bookings."));
}

async fn loaded_with(cal_id: i64) -> CalendarPage {
    let provider = Arc::new(MemoryProvider::new());
    provider.seed(
        "cal",
        vec![json!({"cal_id": cal_id, "title": "Imported", "details": "", "starttime": "2024-05-01T09:00:00Z", "endtime": "2024-05-01T10:00:00Z", "id": "u1"})],
    );
    let ctx = AppContext::new(provider, Arc::new(StaticIdentity::signed_in("u1")), ColorMode::Light);
    let mut page = CalendarPage::new();
    page.load(&ctx).await;
    page
}

#[tokio::test]
async fn draft_saved_next_to_negative_ids_gets_a_real_id() {
    let mut page = loaded_with(-1).await;
    let draft = page.draft(datetime!(2024-05-04 8:00 UTC), datetime!(2024-05-04 9:00 UTC));
    let cal_id = page.save(draft).unwrap();
    assert_eq!(cal_id, 1);

    let mut edit = page.bookings()[1].clone();
    edit.title = "edited".into();
    assert_eq!(page.save(edit), Ok(1));
    let titles: Vec<(i64, &str)> = page.bookings().iter().map(|b| (b.cal_id, b.title.as_str())).collect();
    assert_eq!(titles, vec![(-1, "Imported"), (1, "edited")]);
    assert!(page.delete(1).is_ok());
}

#[tokio::test]
async fn draft_fails_cleanly_when_ids_run_out() {
    let mut page = loaded_with(i64::MAX).await;
    let draft = page.draft(datetime!(2024-05-04 8:00 UTC), datetime!(2024-05-04 9:00 UTC));
    assert_eq!(page.save(draft), Err(BookingError::IdsExhausted(IdsExhausted)));
    assert_eq!(page.bookings().len(), 1);
}
