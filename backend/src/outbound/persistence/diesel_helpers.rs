//! Counter and ledger statements shared by the question and answer
//! repositories.
//!
//! All helpers take a connection that is already inside a transaction; they
//! never open one themselves.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ExperienceAward;

use super::models::NewExperienceAwardRow;
use super::schema::{experience_awards, users};

/// Escape `%`, `_`, and `\` so a keyword matches literally inside `ILIKE`.
pub fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Increment an author's `answer_count`.
pub async fn increment_answer_count<C>(conn: &mut C, user_id: i64) -> QueryResult<()>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::update(users::table.find(user_id))
        .set(users::answer_count.eq(users::answer_count + 1))
        .execute(conn)
        .await?;
    Ok(())
}

/// Decrement an author's `answer_count`, leaving it at zero when it is
/// already there.
pub async fn decrement_answer_count<C>(conn: &mut C, user_id: i64) -> QueryResult<()>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    let updated = diesel::update(
        users::table
            .find(user_id)
            .filter(users::answer_count.gt(0)),
    )
    .set(users::answer_count.eq(users::answer_count - 1))
    .execute(conn)
    .await?;
    if updated == 0 {
        warn!(user_id, "answer_count already zero; not decremented");
    }
    Ok(())
}

/// Credit the beneficiary and append the award to the ledger.
pub async fn record_award<C>(conn: &mut C, award: &ExperienceAward) -> QueryResult<()>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::update(users::table.find(award.beneficiary_id.get()))
        .set(users::experience.eq(users::experience + i64::from(award.amount)))
        .execute(conn)
        .await?;
    diesel::insert_into(experience_awards::table)
        .values(NewExperienceAwardRow::from(award))
        .execute(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("rust", "%rust%")]
    #[case("50%", "%50\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    #[case("a\\b", "%a\\\\b%")]
    fn keywords_are_escaped_for_ilike(#[case] keyword: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(keyword), expected);
    }
}
