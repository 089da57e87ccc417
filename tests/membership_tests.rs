mod support;

use std::sync::Arc;

use invitechan::SlackError;
use invitechan::core::membership::MembershipService;
use support::{MembershipCall, RecordingActuator, channel};

#[tokio::test]
async fn test_invite_uses_channel_id() {
    let actuator = Arc::new(RecordingActuator::default());
    let service = MembershipService::new(actuator.clone());

    service.invite(&channel("C42", "general"), "U7").await.unwrap();

    assert_eq!(
        actuator.calls(),
        vec![MembershipCall::Add {
            channel_id: "C42".to_string(),
            user_id: "U7".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_leave_uses_channel_id() {
    let actuator = Arc::new(RecordingActuator::default());
    let service = MembershipService::new(actuator.clone());

    service.leave(&channel("C42", "general"), "U7").await.unwrap();

    assert_eq!(
        actuator.calls(),
        vec![MembershipCall::Remove {
            channel_id: "C42".to_string(),
            user_id: "U7".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_errors_pass_through_unchanged() {
    let actuator = Arc::new(RecordingActuator::default());
    actuator.fail_with(Some("cant_kick_self"));
    let service = MembershipService::new(actuator.clone());

    let result = service.leave(&channel("C1", "general"), "U7").await;

    match result {
        Err(SlackError::ActuatorError(code)) => assert_eq!(code, "cant_kick_self"),
        other => panic!("expected ActuatorError, got {other:?}"),
    }
    // No retry.
    assert_eq!(actuator.calls().len(), 1);
}
