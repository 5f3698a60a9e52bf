//! In-memory [`QuestionRepository`] and [`AnswerRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{InMemoryCommunityStore, newest_first, next_id, oldest_first};
use crate::domain::ports::{
    Acceptance, AnswerRepository, AnswerRepositoryError, QuestionRepository,
    QuestionRepositoryError,
};
use crate::domain::{
    Answer, AnswerId, AwardDraft, Content, NewAnswer, NewQuestion, Page, PageRequest, Question,
    QuestionEdit, QuestionFilter, QuestionId, QuestionStatus,
};

#[async_trait]
impl QuestionRepository for InMemoryCommunityStore {
    async fn insert(&self, question: &NewQuestion) -> Result<Question, QuestionRepositoryError> {
        let mut guard = self.lock().map_err(QuestionRepositoryError::query)?;
        let state = &mut *guard;
        let id = QuestionId::new(next_id(&mut state.sequences.question));
        let stored = Question {
            id,
            author_id: question.author_id,
            department: question.draft.department.clone(),
            title: question.draft.title.clone(),
            content: question.draft.content.clone(),
            status: QuestionStatus::Open,
            accepted_answer_id: None,
            bonus_experience: question.draft.bonus_experience,
            view_count: 0,
            created_at: question.created_at,
            updated_at: question.created_at,
        };
        state.questions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let state = self.lock().map_err(QuestionRepositoryError::query)?;
        Ok(state.questions.get(&id).cloned())
    }

    async fn record_view(
        &self,
        id: QuestionId,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut state = self.lock().map_err(QuestionRepositoryError::query)?;
        Ok(state.questions.get_mut(&id).map(|question| {
            question.view_count = question.view_count.saturating_add(1);
            question.clone()
        }))
    }

    async fn list(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, QuestionRepositoryError> {
        let state = self.lock().map_err(QuestionRepositoryError::query)?;
        let mut matching: Vec<Question> = state
            .questions
            .values()
            .filter(|question| filter.matches(question))
            .cloned()
            .collect();
        newest_first(&mut matching, |question| (question.created_at, question.id.get()));
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        Ok(Page::new(page.slice(&matching), page, total))
    }

    async fn update(
        &self,
        id: QuestionId,
        edit: &QuestionEdit,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut state = self.lock().map_err(QuestionRepositoryError::query)?;
        Ok(state.questions.get_mut(&id).map(|question| {
            question.title = edit.title.clone();
            question.content = edit.content.clone();
            question.department = edit.department.clone();
            question.updated_at = updated_at;
            question.clone()
        }))
    }

    async fn delete(&self, id: QuestionId) -> Result<bool, QuestionRepositoryError> {
        let mut guard = self.lock().map_err(QuestionRepositoryError::query)?;
        let state = &mut *guard;
        if state.questions.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: Vec<AnswerId> = state
            .answers
            .values()
            .filter(|answer| answer.question_id == id)
            .map(|answer| answer.id)
            .collect();
        for answer_id in owned {
            if let Some(answer) = state.answers.remove(&answer_id) {
                state.decrement_answer_count(answer.author_id);
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl AnswerRepository for InMemoryCommunityStore {
    async fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, AnswerRepositoryError> {
        let state = self.lock().map_err(AnswerRepositoryError::query)?;
        Ok(state.answers.get(&id).cloned())
    }

    async fn list_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let state = self.lock().map_err(AnswerRepositoryError::query)?;
        let mut answers: Vec<Answer> = state
            .answers
            .values()
            .filter(|answer| answer.question_id == question_id)
            .cloned()
            .collect();
        oldest_first(&mut answers, |answer| (answer.created_at, answer.id.get()));
        Ok(answers)
    }

    async fn insert_with_award(
        &self,
        answer: &NewAnswer,
        award: &AwardDraft,
    ) -> Result<Answer, AnswerRepositoryError> {
        let mut guard = self.lock().map_err(AnswerRepositoryError::query)?;
        let state = &mut *guard;
        if !state.questions.contains_key(&answer.question_id) {
            return Err(AnswerRepositoryError::question_missing(
                answer.question_id.get(),
            ));
        }
        let id = AnswerId::new(next_id(&mut state.sequences.answer));
        let stored = Answer {
            id,
            question_id: answer.question_id,
            author_id: answer.author_id,
            content: answer.content.clone(),
            accepted: false,
            created_at: answer.created_at,
            updated_at: answer.created_at,
        };
        state.answers.insert(id, stored.clone());
        if let Some(author) = state.users.get_mut(&answer.author_id) {
            author.answer_count = author.answer_count.saturating_add(1);
        }
        state.record_award(award.clone().for_answer(id));
        Ok(stored)
    }

    async fn update_content(
        &self,
        id: AnswerId,
        content: &Content,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Answer>, AnswerRepositoryError> {
        let mut state = self.lock().map_err(AnswerRepositoryError::query)?;
        Ok(state.answers.get_mut(&id).map(|answer| {
            answer.content = content.clone();
            answer.updated_at = updated_at;
            answer.clone()
        }))
    }

    async fn delete(&self, id: AnswerId) -> Result<bool, AnswerRepositoryError> {
        let mut guard = self.lock().map_err(AnswerRepositoryError::query)?;
        let state = &mut *guard;
        match state.answers.get(&id) {
            None => return Ok(false),
            Some(answer) if answer.accepted => {
                return Err(AnswerRepositoryError::accepted_answer_locked(id.get()));
            }
            Some(_) => {}
        }
        if let Some(answer) = state.answers.remove(&id) {
            state.decrement_answer_count(answer.author_id);
        }
        Ok(true)
    }

    async fn accept(&self, acceptance: &Acceptance) -> Result<Question, AnswerRepositoryError> {
        let Acceptance {
            question_id,
            answer_id,
            award,
            solved_at,
        } = acceptance;
        let mut guard = self.lock().map_err(AnswerRepositoryError::query)?;
        let state = &mut *guard;

        let question = state
            .questions
            .get_mut(question_id)
            .ok_or_else(|| AnswerRepositoryError::question_missing(question_id.get()))?;
        if question.accepted_answer_id.is_some() {
            return Err(AnswerRepositoryError::already_accepted(question_id.get()));
        }
        let answer = state
            .answers
            .get_mut(answer_id)
            .filter(|answer| answer.question_id == *question_id)
            .ok_or_else(|| AnswerRepositoryError::answer_missing(answer_id.get()))?;

        answer.accepted = true;
        answer.updated_at = *solved_at;
        question.accepted_answer_id = Some(*answer_id);
        question.status = QuestionStatus::Solved;
        question.updated_at = *solved_at;
        let solved = question.clone();

        if let Some(author) = state.users.get_mut(&award.beneficiary_id) {
            author.accept_count = author.accept_count.saturating_add(1);
        }
        state.record_award(award.clone());
        Ok(solved)
    }
}
