//! Shared builders for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Answer, AnswerId, Content, Department, Email, MatchingPost, MatchingPostReview,
    MatchingPostStatus, Category, NewUser, Nickname, PersonName, PostId, Question, QuestionId,
    QuestionStatus, ReviewId, StudentNo, Title, User, UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn new_user(local: &str) -> NewUser {
    NewUser {
        email: Email::new(format!("{local}@titto.ac.kr")).expect("fixture e-mail"),
        name: PersonName::new(format!("Student {local}")).expect("fixture name"),
        nickname: Nickname::new(local).expect("fixture nickname"),
        student_no: StudentNo::new("20240001").expect("fixture student number"),
        department: Department::new("Computer Science").expect("fixture department"),
    }
}

pub(crate) fn user(id: i64) -> User {
    User::register(
        UserId::new(id),
        new_user(&format!("user{id}")),
        fixture_timestamp(),
    )
}

pub(crate) fn question(id: i64, author: i64, bonus_experience: u32) -> Question {
    Question {
        id: QuestionId::new(id),
        author_id: UserId::new(author),
        department: Department::new("Computer Science").expect("fixture department"),
        title: Title::new(format!("Question {id}")).expect("fixture title"),
        content: Content::new("How do lifetimes interact with async?").expect("fixture content"),
        status: QuestionStatus::Open,
        accepted_answer_id: None,
        bonus_experience,
        view_count: 0,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn solved(mut question: Question, answer_id: i64) -> Question {
    question.status = QuestionStatus::Solved;
    question.accepted_answer_id = Some(AnswerId::new(answer_id));
    question
}

pub(crate) fn answer(id: i64, question: i64, author: i64) -> Answer {
    Answer {
        id: AnswerId::new(id),
        question_id: QuestionId::new(question),
        author_id: UserId::new(author),
        content: Content::new("Pin the future before polling it.").expect("fixture content"),
        accepted: false,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn post(id: i64, author: i64) -> MatchingPost {
    MatchingPost {
        id: PostId::new(id),
        author_id: UserId::new(author),
        category: Category::new("study").expect("fixture category"),
        status: MatchingPostStatus::Recruiting,
        title: Title::new("Algorithms study group").expect("fixture title"),
        content: Content::new("Weekly sessions on Thursdays.").expect("fixture content"),
        view_count: 0,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn review(id: i64, post: i64, author: i64) -> MatchingPostReview {
    MatchingPostReview {
        id: ReviewId::new(id),
        post_id: PostId::new(post),
        author_id: UserId::new(author),
        content: Content::new("Well organised sessions.").expect("fixture content"),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn content(text: &str) -> Content {
    Content::new(text).expect("fixture content")
}
