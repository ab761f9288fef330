use assert_matches::assert_matches;

use sightline::application::ports::{Notifier, NotifierError};
use sightline::domain::{MediaKind, ProviderId, UsageRecord};
use sightline::infrastructure::notification::{SmtpConfig, SmtpNotifier};

fn config(from_address: &str) -> SmtpConfig {
    SmtpConfig {
        host: "localhost".into(),
        port: 2525,
        from_address: from_address.into(),
        username: None,
        password: None,
    }
}

#[test]
fn given_malformed_sender_when_creating_notifier_then_rejects_address() {
    let result = SmtpNotifier::new(config("not an address"));

    assert_matches!(result, Err(NotifierError::InvalidAddress(_)));
}

#[tokio::test]
async fn given_malformed_recipient_when_sending_then_fails_before_connecting() {
    let notifier = SmtpNotifier::new(config("Sightline <noreply@sightline.local>")).unwrap();
    let record = UsageRecord::new(
        "nobody".into(),
        "q".into(),
        "a".into(),
        String::new(),
        ProviderId::OpenAi,
    );

    let result = notifier.send(&record, MediaKind::Image).await;

    assert_matches!(result, Err(NotifierError::InvalidAddress(_)));
}
