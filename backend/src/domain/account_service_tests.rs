//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp, new_user, user};
use crate::domain::{AnswerId, AwardCause, ErrorCode, ExperienceAward, QuestionId};
use chrono::Duration;
use rstest::rstest;

fn make_service(repo: MockUserRepository) -> AccountService<MockUserRepository> {
    AccountService::new(Arc::new(repo), fixture_clock())
}

fn award(amount: u32, cause: AwardCause, minutes: i64) -> ExperienceAward {
    ExperienceAward {
        actor_id: UserId::new(1),
        beneficiary_id: UserId::new(2),
        amount,
        cause,
        question_id: QuestionId::new(1),
        answer_id: AnswerId::new(9),
        awarded_at: fixture_timestamp() + Duration::minutes(minutes),
    }
}

#[tokio::test]
async fn signup_stores_new_user_with_clock_timestamp() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|_, created_at| *created_at == fixture_timestamp())
        .times(1)
        .return_once(|profile, created_at| {
            Ok(User::register(UserId::new(5), profile.clone(), created_at))
        });

    let created = make_service(repo)
        .signup(new_user("minji"))
        .await
        .expect("signup succeeds");

    assert_eq!(created.id, UserId::new(5));
    assert_eq!(created.answer_count, 0);
    assert_eq!(created.experience, 0);
}

#[tokio::test]
async fn signup_rejects_registered_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(user(1))));
    repo.expect_insert().never();

    let error = make_service(repo)
        .signup(new_user("user1"))
        .await
        .expect_err("duplicate e-mail");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.reason(), Some(EMAIL_TAKEN));
}

#[tokio::test]
async fn signup_maps_insert_race_to_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_, _| Err(UserPersistenceError::duplicate_email("minji@titto.ac.kr")));

    let error = make_service(repo)
        .signup(new_user("minji"))
        .await
        .expect_err("lost race");

    assert_eq!(error.reason(), Some(EMAIL_TAKEN));
}

#[tokio::test]
async fn login_rejects_unknown_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));

    let email = Email::new("ghost@titto.ac.kr").expect("valid e-mail");
    let error = make_service(repo)
        .login(&email)
        .await
        .expect_err("unknown e-mail");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn profile_maps_repository_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let error = make_service(repo)
        .profile(UserId::new(1))
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn profile_reports_missing_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = make_service(repo)
        .profile(UserId::new(404))
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn experience_history_folds_awards_newest_first() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(user(2))));
    repo.expect_list_awards().times(1).return_once(|_| {
        Ok(vec![
            award(5, AwardCause::AnswerPosted, 0),
            award(45, AwardCause::AnswerAccepted, 10),
        ])
    });

    let history = make_service(repo)
        .experience_history(UserId::new(2))
        .await
        .expect("history loads");

    assert_eq!(history.total, 50);
    assert_eq!(
        history.awards.iter().map(|a| a.cause).collect::<Vec<_>>(),
        vec![AwardCause::AnswerAccepted, AwardCause::AnswerPosted]
    );
}
