//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a migration
//! changes the schema, regenerate them with `diesel print-schema` or update
//! them by hand.

diesel::table! {
    /// Registered students with their denormalized activity counters.
    users (id) {
        id -> Int8,
        email -> Varchar,
        name -> Varchar,
        nickname -> Varchar,
        student_no -> Varchar,
        department -> Varchar,
        /// Answers currently present; never negative.
        answer_count -> Int4,
        /// Answers of this user that were accepted.
        accept_count -> Int4,
        /// Sum of `experience_awards.amount` for this beneficiary.
        experience -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Q&A board questions.
    questions (id) {
        id -> Int8,
        author_id -> Int8,
        department -> Varchar,
        title -> Varchar,
        content -> Text,
        /// `open` or `solved`; solved exactly when `accepted_answer_id` is set.
        status -> Varchar,
        accepted_answer_id -> Nullable<Int8>,
        bonus_experience -> Int4,
        view_count -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    answers (id) {
        id -> Int8,
        question_id -> Int8,
        author_id -> Int8,
        content -> Text,
        accepted -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only experience ledger.
    experience_awards (id) {
        id -> Int8,
        actor_id -> Int8,
        beneficiary_id -> Int8,
        amount -> Int4,
        cause -> Varchar,
        question_id -> Int8,
        answer_id -> Int8,
        awarded_at -> Timestamptz,
    }
}

diesel::table! {
    matching_posts (id) {
        id -> Int8,
        author_id -> Int8,
        category -> Varchar,
        status -> Varchar,
        title -> Varchar,
        content -> Text,
        view_count -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    matching_post_reviews (id) {
        id -> Int8,
        post_id -> Int8,
        author_id -> Int8,
        content -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(answers -> questions (question_id));
diesel::joinable!(matching_post_reviews -> matching_posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    questions,
    answers,
    experience_awards,
    matching_posts,
    matching_post_reviews,
);
