use chrono::Duration;

use super::common::now;
use crate::staffing::hiring::domain::{
    next_status, Application, ApplicationId, ApplicationStatus, HiringAction, TransitionError,
};
use crate::staffing::mission::MissionId;
use crate::staffing::talent::TalentId;

fn application() -> Application {
    Application::new(
        ApplicationId("app-000001".to_string()),
        MissionId("mission-001".to_string()),
        TalentId("talent-001".to_string()),
        95,
        now(),
    )
}

#[test]
fn a_new_application_starts_as_pending_interest() {
    let application = application();
    assert_eq!(application.status, ApplicationStatus::Interested);
    assert!(!application.establishment_confirmed);
    assert!(!application.talent_confirmed);
    assert!(application.confirmed_at.is_none());
    assert_eq!(application.created_at, application.updated_at);
}

#[test]
fn accept_moves_interest_to_accepted() {
    let mut application = application();
    application.accept(now()).expect("accept succeeds");
    assert_eq!(application.status, ApplicationStatus::Accepted);
    assert!(application.establishment_confirmed);
}

#[test]
fn reject_only_applies_to_pending_interest() {
    let mut pending = application();
    pending.reject(now()).expect("reject succeeds");
    assert_eq!(pending.status, ApplicationStatus::Rejected);

    let mut accepted = application();
    accepted.accept(now()).expect("accept succeeds");
    match accepted.reject(now()) {
        Err(TransitionError::InvalidAction { status, .. }) => assert_eq!(status, "accepted"),
        other => panic!("expected invalid action, got {other:?}"),
    }
    assert_eq!(accepted.status, ApplicationStatus::Accepted);
}

#[test]
fn talent_confirmation_keeps_the_application_accepted() {
    let mut application = application();
    application.accept(now()).expect("accept succeeds");
    application
        .talent_confirm(now())
        .expect("confirmation succeeds");

    assert_eq!(application.status, ApplicationStatus::Accepted);
    assert!(application.talent_confirmed);
    assert!(application.confirmed_at.is_none());
}

#[test]
fn confirm_hire_requires_the_talent_confirmation() {
    let mut application = application();
    application.accept(now()).expect("accept succeeds");

    match application.confirm_hire(now()) {
        Err(TransitionError::TalentNotConfirmed) => {}
        other => panic!("expected missing confirmation, got {other:?}"),
    }
    assert_eq!(application.status, ApplicationStatus::Accepted);

    application
        .talent_confirm(now())
        .expect("confirmation succeeds");
    let sealed_at = now() + Duration::hours(2);
    application.confirm_hire(sealed_at).expect("hire confirms");

    assert_eq!(application.status, ApplicationStatus::Confirmed);
    assert_eq!(application.confirmed_at, Some(sealed_at));
}

#[test]
fn terminal_states_refuse_every_action() {
    let mut rejected = application();
    rejected.reject(now()).expect("reject succeeds");
    for result in [
        rejected.accept(now()),
        rejected.reject(now()),
        rejected.talent_confirm(now()),
        rejected.confirm_hire(now()),
    ] {
        match result {
            Err(TransitionError::Terminal { status }) => assert_eq!(status, "rejected"),
            other => panic!("expected terminal refusal, got {other:?}"),
        }
    }

    let mut confirmed = application();
    confirmed.accept(now()).expect("accept succeeds");
    confirmed.talent_confirm(now()).expect("confirmation succeeds");
    confirmed.confirm_hire(now()).expect("hire confirms");
    match confirmed.accept(now()) {
        Err(TransitionError::Terminal { status }) => assert_eq!(status, "confirmed"),
        other => panic!("expected terminal refusal, got {other:?}"),
    }
    assert_eq!(confirmed.status, ApplicationStatus::Confirmed);
}

#[test]
fn out_of_order_actions_are_invalid() {
    assert!(matches!(
        next_status(ApplicationStatus::Interested, HiringAction::TalentConfirm, false),
        Err(TransitionError::InvalidAction { .. })
    ));
    assert!(matches!(
        next_status(ApplicationStatus::Interested, HiringAction::ConfirmHire, true),
        Err(TransitionError::InvalidAction { .. })
    ));
    assert!(matches!(
        next_status(ApplicationStatus::Accepted, HiringAction::Accept, false),
        Err(TransitionError::InvalidAction { .. })
    ));
}

#[test]
fn timestamps_track_the_latest_action() {
    let mut application = application();
    let created_at = application.created_at;

    let accepted_at = now() + Duration::minutes(30);
    application.accept(accepted_at).expect("accept succeeds");

    assert_eq!(application.created_at, created_at);
    assert_eq!(application.updated_at, accepted_at);
}
