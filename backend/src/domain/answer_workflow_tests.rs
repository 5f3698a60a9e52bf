//! Tests for the answer workflow guards and the mutations they issue.

use std::sync::Arc;

use super::*;
use crate::domain::authorship::MISMATCH_AUTHOR;
use crate::domain::ports::{
    AnswerRepositoryError, MockAnswerRepository, MockQuestionRepository, MockUserRepository,
};
use crate::domain::question_board_service::ALREADY_ACCEPTED_ANSWER;
use crate::domain::test_fixtures::{
    answer, content, fixture_clock, fixture_timestamp, question, solved, user,
};
use crate::domain::{AwardCause, ErrorCode, QuestionStatus};
use rstest::rstest;

type Service = QuestionBoardService<MockQuestionRepository, MockAnswerRepository, MockUserRepository>;

fn make_service(
    questions: MockQuestionRepository,
    answers: MockAnswerRepository,
    users: MockUserRepository,
) -> Service {
    QuestionBoardService::new(
        Arc::new(questions),
        Arc::new(answers),
        Arc::new(users),
        fixture_clock(),
    )
}

fn questions_returning(found: Option<Question>) -> MockQuestionRepository {
    let mut questions = MockQuestionRepository::new();
    questions
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(found));
    questions
}

fn answers_returning(found: Option<Answer>) -> MockAnswerRepository {
    let mut answers = MockAnswerRepository::new();
    answers
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(found));
    answers
}

#[tokio::test]
async fn create_answer_awards_posting_points_to_answer_author() {
    let questions = questions_returning(Some(question(1, 1, 10)));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(user(2))));
    let mut answers = MockAnswerRepository::new();
    answers
        .expect_insert_with_award()
        .withf(|new_answer, award| {
            new_answer.author_id == UserId::new(2)
                && award.actor_id == UserId::new(1)
                && award.beneficiary_id == UserId::new(2)
                && award.amount == 5
                && award.cause == AwardCause::AnswerPosted
                && award.awarded_at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_, _| Ok(answer(9, 1, 2)));

    let created = make_service(questions, answers, users)
        .create_answer(QuestionId::new(1), UserId::new(2), content("Use Pin::new."))
        .await
        .expect("answer created");

    assert_eq!(created.id, AnswerId::new(9));
    assert!(!created.accepted);
}

#[tokio::test]
async fn create_answer_on_missing_question_writes_nothing() {
    let questions = questions_returning(None);
    let mut answers = MockAnswerRepository::new();
    answers.expect_insert_with_award().never();

    let error = make_service(questions, answers, MockUserRepository::new())
        .create_answer(QuestionId::new(404), UserId::new(2), content("Hello"))
        .await
        .expect_err("missing question");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn create_answer_by_unknown_author_is_not_found_and_writes_nothing() {
    let questions = questions_returning(Some(question(1, 1, 0)));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .withf(|id| *id == UserId::new(999))
        .times(1)
        .return_once(|_| Ok(None));
    let mut answers = MockAnswerRepository::new();
    answers.expect_insert_with_award().never();

    let error = make_service(questions, answers, users)
        .create_answer(QuestionId::new(1), UserId::new(999), content("Hello"))
        .await
        .expect_err("unknown author");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn create_answer_maps_vanished_question_to_not_found() {
    let questions = questions_returning(Some(question(1, 1, 0)));
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(user(2))));
    let mut answers = MockAnswerRepository::new();
    answers
        .expect_insert_with_award()
        .times(1)
        .return_once(|_, _| Err(AnswerRepositoryError::question_missing(1_i64)));

    let error = make_service(questions, answers, users)
        .create_answer(QuestionId::new(1), UserId::new(2), content("Hello"))
        .await
        .expect_err("question deleted concurrently");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_answer_by_other_user_is_forbidden() {
    let mut answers = answers_returning(Some(answer(9, 1, 2)));
    answers.expect_update_content().never();

    let error = make_service(MockQuestionRepository::new(), answers, MockUserRepository::new())
        .update_answer(AnswerId::new(9), UserId::new(3), content("Edited"))
        .await
        .expect_err("not the author");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.reason(), Some(MISMATCH_AUTHOR));
}

#[tokio::test]
async fn update_answer_replaces_content_only() {
    let mut answers = answers_returning(Some(answer(9, 1, 2)));
    answers
        .expect_update_content()
        .withf(|id, text, _| *id == AnswerId::new(9) && text.as_str() == "Edited")
        .times(1)
        .return_once(|_, text, _| {
            let mut updated = answer(9, 1, 2);
            updated.content = text.clone();
            Ok(Some(updated))
        });

    let updated = make_service(MockQuestionRepository::new(), answers, MockUserRepository::new())
        .update_answer(AnswerId::new(9), UserId::new(2), content("Edited"))
        .await
        .expect("author may edit");

    assert_eq!(updated.content.as_str(), "Edited");
    assert_eq!(updated.author_id, UserId::new(2));
}

#[tokio::test]
async fn delete_missing_answer_is_not_found() {
    let answers = answers_returning(None);

    let error = make_service(MockQuestionRepository::new(), answers, MockUserRepository::new())
        .delete_answer(AnswerId::new(9), UserId::new(2))
        .await
        .expect_err("missing answer");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_answer_by_other_user_is_forbidden() {
    let mut answers = answers_returning(Some(answer(9, 1, 2)));
    answers.expect_delete().never();

    let error = make_service(MockQuestionRepository::new(), answers, MockUserRepository::new())
        .delete_answer(AnswerId::new(9), UserId::new(1))
        .await
        .expect_err("not the author");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn delete_accepted_answer_is_locked() {
    let mut accepted = answer(9, 1, 2);
    accepted.accepted = true;
    let mut answers = answers_returning(Some(accepted));
    answers.expect_delete().never();

    let error = make_service(MockQuestionRepository::new(), answers, MockUserRepository::new())
        .delete_answer(AnswerId::new(9), UserId::new(2))
        .await
        .expect_err("accepted answer");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.reason(), Some(ACCEPTED_ANSWER_LOCKED));
}

#[tokio::test]
async fn delete_answer_by_author_succeeds() {
    let mut answers = answers_returning(Some(answer(9, 1, 2)));
    answers
        .expect_delete()
        .withf(|id| *id == AnswerId::new(9))
        .times(1)
        .return_once(|_| Ok(true));

    make_service(MockQuestionRepository::new(), answers, MockUserRepository::new())
        .delete_answer(AnswerId::new(9), UserId::new(2))
        .await
        .expect("author may delete");
}

#[tokio::test]
async fn accept_credits_base_plus_bonus_to_answer_author() {
    // U1 asks question 1 with a bonus of 10; U2 wrote answer 9.
    let questions = questions_returning(Some(question(1, 1, 10)));
    let mut answers = answers_returning(Some(answer(9, 1, 2)));
    answers
        .expect_accept()
        .withf(|acceptance| {
            acceptance.question_id == QuestionId::new(1)
                && acceptance.answer_id == AnswerId::new(9)
                && acceptance.award.beneficiary_id == UserId::new(2)
                && acceptance.award.actor_id == UserId::new(1)
                && acceptance.award.amount == 45
                && acceptance.award.cause == AwardCause::AnswerAccepted
        })
        .times(1)
        .return_once(|_| Ok(solved(question(1, 1, 10), 9)));

    let result = make_service(questions, answers, MockUserRepository::new())
        .accept_answer(QuestionId::new(1), AnswerId::new(9), UserId::new(1))
        .await
        .expect("question author may accept");

    assert_eq!(result.status, QuestionStatus::Solved);
    assert_eq!(result.accepted_answer_id, Some(AnswerId::new(9)));
}

#[tokio::test]
async fn accept_by_non_author_is_forbidden_and_writes_nothing() {
    let questions = questions_returning(Some(question(1, 1, 10)));
    let mut answers = answers_returning(Some(answer(9, 1, 2)));
    answers.expect_accept().never();

    let error = make_service(questions, answers, MockUserRepository::new())
        .accept_answer(QuestionId::new(1), AnswerId::new(9), UserId::new(3))
        .await
        .expect_err("U3 is not the asker");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.reason(), Some(MISMATCH_AUTHOR));
}

#[tokio::test]
async fn accept_on_solved_question_conflicts_without_writes() {
    let questions = questions_returning(Some(solved(question(1, 1, 10), 8)));
    let mut answers = answers_returning(Some(answer(9, 1, 2)));
    answers.expect_accept().never();

    let error = make_service(questions, answers, MockUserRepository::new())
        .accept_answer(QuestionId::new(1), AnswerId::new(9), UserId::new(1))
        .await
        .expect_err("already solved");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.reason(), Some(ALREADY_ACCEPTED_ANSWER));
}

#[tokio::test]
async fn accept_answer_of_other_question_is_not_found() {
    let questions = questions_returning(Some(question(1, 1, 10)));
    let mut answers = answers_returning(Some(answer(9, 2, 2)));
    answers.expect_accept().never();

    let error = make_service(questions, answers, MockUserRepository::new())
        .accept_answer(QuestionId::new(1), AnswerId::new(9), UserId::new(1))
        .await
        .expect_err("answer belongs elsewhere");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(None, Some(answer(9, 1, 2)))]
#[case(Some(question(1, 1, 0)), None)]
#[tokio::test]
async fn accept_with_missing_entities_is_not_found(
    #[case] found_question: Option<Question>,
    #[case] found_answer: Option<Answer>,
) {
    let questions = questions_returning(found_question.clone());
    let mut answers = MockAnswerRepository::new();
    if found_question.is_some() {
        answers
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(found_answer));
    }
    answers.expect_accept().never();

    let error = make_service(questions, answers, MockUserRepository::new())
        .accept_answer(QuestionId::new(1), AnswerId::new(9), UserId::new(1))
        .await
        .expect_err("missing entity");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn accept_race_lost_inside_transaction_is_conflict() {
    let questions = questions_returning(Some(question(1, 1, 10)));
    let mut answers = answers_returning(Some(answer(9, 1, 2)));
    answers
        .expect_accept()
        .times(1)
        .return_once(|_| Err(AnswerRepositoryError::already_accepted(1_i64)));

    let error = make_service(questions, answers, MockUserRepository::new())
        .accept_answer(QuestionId::new(1), AnswerId::new(9), UserId::new(1))
        .await
        .expect_err("concurrent accept won");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.reason(), Some(ALREADY_ACCEPTED_ANSWER));
}

#[tokio::test]
async fn self_accept_is_permitted() {
    let questions = questions_returning(Some(question(1, 1, 0)));
    let mut answers = answers_returning(Some(answer(9, 1, 1)));
    answers
        .expect_accept()
        .withf(|acceptance| acceptance.award.beneficiary_id == UserId::new(1))
        .times(1)
        .return_once(|_| Ok(solved(question(1, 1, 0), 9)));

    make_service(questions, answers, MockUserRepository::new())
        .accept_answer(QuestionId::new(1), AnswerId::new(9), UserId::new(1))
        .await
        .expect("asker may accept their own answer");
}
