//! Integration test wiring the infrastructure mailer into the core
//! account service.

use std::sync::Arc;

use tf_core::repositories::{MockAccountRepository, MockVerificationRepository};
use tf_core::services::account::{AccountService, AccountServiceConfig};
use tf_core::services::verification::{CodeHasher, VerificationConfig, VerificationFlow};
use tf_infra::email::MockMailer;

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn registration_dispatches_through_infra_mailer() {
    init_tracing();
    let mailer = Arc::new(MockMailer::new());
    let flow = Arc::new(VerificationFlow::new(
        Arc::new(MockVerificationRepository::new()),
        CodeHasher::new(b"integration-test-secret-32-bytes".to_vec()),
        VerificationConfig::default(),
    ));
    let service = AccountService::new(
        Arc::new(MockAccountRepository::new()),
        flow,
        mailer.clone(),
        AccountServiceConfig {
            bcrypt_cost: 4,
            ..AccountServiceConfig::default()
        },
    );

    service
        .register("user@example.com", "initial password")
        .await
        .unwrap();
    settle().await;

    let messages = mailer.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].to, "user@example.com");
    assert!(messages[0].subject.contains("Verify your email"));
}

#[tokio::test]
async fn delivery_failure_never_surfaces() {
    init_tracing();
    let mailer = Arc::new(MockMailer::failing());
    let flow = Arc::new(VerificationFlow::new(
        Arc::new(MockVerificationRepository::new()),
        CodeHasher::new(b"integration-test-secret-32-bytes".to_vec()),
        VerificationConfig::default(),
    ));
    let service = AccountService::new(
        Arc::new(MockAccountRepository::new()),
        flow,
        mailer.clone(),
        AccountServiceConfig {
            bcrypt_cost: 4,
            ..AccountServiceConfig::default()
        },
    );

    // The register call succeeds even though every send fails
    service
        .register("user@example.com", "initial password")
        .await
        .unwrap();
    settle().await;
    assert_eq!(mailer.message_count(), 0);
}
