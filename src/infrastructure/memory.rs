//! In-process implementation of every repository port.
//!
//! Used by integration tests and by `STORAGE=memory` for local runs. All tables
//! live behind one mutex so that uniqueness checks and cascading deletes are
//! atomic with respect to each other, mirroring the PostgreSQL constraints.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Click, Link, NewClick, NewLink, NewSession, NewUser, Session, User,
};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::{
    BreakdownEntry, ClickDimension, ClickRepository, DailyCount, LinkRepository,
    SessionRepository, UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    links: BTreeMap<i64, Link>,
    clicks: Vec<Click>,
    users: BTreeMap<i64, User>,
    sessions: BTreeMap<String, Session>,
    next_link_id: i64,
    next_click_id: i64,
    next_user_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, RepositoryError> {
        let mut tables = self.lock()?;

        if tables
            .links
            .values()
            .any(|l| l.short_code == new_link.short_code)
        {
            return Err(RepositoryError::Conflict("links_short_code_key".to_string()));
        }

        if let Some(owner) = new_link.owner
            && !tables.users.contains_key(&owner)
        {
            return Err(RepositoryError::NotFound);
        }

        let id = Tables::next_id(&mut tables.next_link_id);
        let link = Link {
            id,
            short_code: new_link.short_code,
            original_url: new_link.original_url,
            click_count: 0,
            owner: new_link.owner,
            created_at: Utc::now(),
        };
        tables.links.insert(id, link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .links
            .values()
            .find(|l| l.short_code == short_code)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, RepositoryError> {
        Ok(self.lock()?.links.get(&id).cloned())
    }

    async fn list(
        &self,
        owner: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, RepositoryError> {
        let tables = self.lock()?;

        // Ids grow with insertion time, so reverse id order is newest first.
        Ok(tables
            .links
            .values()
            .rev()
            .filter(|l| owner.is_none() || l.owner == owner)
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn count(&self, owner: Option<i64>) -> Result<i64, RepositoryError> {
        let tables = self.lock()?;
        let count = tables
            .links
            .values()
            .filter(|l| owner.is_none() || l.owner == owner)
            .count();
        Ok(count as i64)
    }

    async fn increment_click_count(&self, id: i64) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        let link = tables.links.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        link.click_count += 1;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;

        if tables.links.remove(&id).is_none() {
            return Ok(false);
        }

        tables.clicks.retain(|c| c.link_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ClickRepository for InMemoryStore {
    async fn record(&self, new_click: NewClick) -> Result<Click, RepositoryError> {
        let mut tables = self.lock()?;

        if !tables.links.contains_key(&new_click.link_id) {
            return Err(RepositoryError::NotFound);
        }

        let click = Click {
            id: Tables::next_id(&mut tables.next_click_id),
            link_id: new_click.link_id,
            country: new_click.country,
            user_agent: new_click.user_agent,
            browser: new_click.browser,
            device: new_click.device,
            created_at: Utc::now(),
        };
        tables.clicks.push(click.clone());

        Ok(click)
    }

    async fn count_all(&self) -> Result<i64, RepositoryError> {
        Ok(self.lock()?.clicks.len() as i64)
    }

    async fn daily_counts(&self, since: DateTime<Utc>) -> Result<Vec<DailyCount>, RepositoryError> {
        let tables = self.lock()?;

        let mut per_day = BTreeMap::new();
        for click in tables.clicks.iter().filter(|c| c.created_at >= since) {
            *per_day.entry(click.created_at.date_naive()).or_insert(0i64) += 1;
        }

        Ok(per_day
            .into_iter()
            .map(|(day, clicks)| DailyCount { day, clicks })
            .collect())
    }

    async fn breakdown(
        &self,
        dimension: ClickDimension,
        limit: i64,
    ) -> Result<Vec<BreakdownEntry>, RepositoryError> {
        let tables = self.lock()?;

        let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
        for click in &tables.clicks {
            *groups.entry(dimension.value_of(click)).or_insert(0) += 1;
        }

        let mut entries: Vec<BreakdownEntry> = groups
            .into_iter()
            .map(|(label, clicks)| BreakdownEntry {
                label: label.to_string(),
                clicks,
            })
            .collect();
        entries.sort_by(|a, b| b.clicks.cmp(&a.clicks).then_with(|| a.label.cmp(&b.label)));
        entries.truncate(usize::try_from(limit).unwrap_or(0));

        Ok(entries)
    }

    async fn distinct_count(&self, dimension: ClickDimension) -> Result<i64, RepositoryError> {
        let tables = self.lock()?;
        let mut values: Vec<&str> = tables.clicks.iter().map(|c| dimension.value_of(c)).collect();
        values.sort_unstable();
        values.dedup();
        Ok(values.len() as i64)
    }

    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .clicks
            .iter()
            .rev()
            .filter(|c| c.link_id == link_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.lock()?;

        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::Conflict("users_email_key".to_string()));
        }

        let id = Tables::next_id(&mut tables.next_user_id);
        let user = User {
            id,
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create(&self, new_session: NewSession) -> Result<Session, RepositoryError> {
        let mut tables = self.lock()?;

        if !tables.users.contains_key(&new_session.user_id) {
            return Err(RepositoryError::NotFound);
        }

        if tables.sessions.contains_key(&new_session.token_hash) {
            return Err(RepositoryError::Conflict("sessions_pkey".to_string()));
        }

        let session = Session {
            token_hash: new_session.token_hash,
            user_id: new_session.user_id,
            created_at: Utc::now(),
            expires_at: new_session.expires_at,
        };
        tables
            .sessions
            .insert(session.token_hash.clone(), session.clone());

        Ok(session)
    }

    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .sessions
            .get(token_hash)
            .filter(|s| !s.is_expired_at(now))
            .cloned())
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.sessions.remove(token_hash).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut tables = self.lock()?;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - tables.sessions.len()) as u64)
    }
}
