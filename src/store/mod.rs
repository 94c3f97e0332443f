//! In-memory content store.
//!
//! Holds every piece of mutable site state. Nothing is persisted: a restart
//! brings the store back to its seed values. Each operation takes the lock
//! once, so a mutation is all-or-nothing and immediately visible to every
//! later read.

pub mod collection;
pub mod models;
mod seed;

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::{AdminPassword, AdminSeed};

/// Upper bound on distinct paths in the page-view table.
pub const MAX_PAGE_PATHS: usize = 1000;
use collection::{Collection, RecordId};
use models::{
    Admin, AdminSummary, ContactMessage, Credentials, NewContactMessage, NewProject, NewSkill,
    NewSocialLink, PageView, PersonalInfo, PersonalInfoPatch, Project, ProjectPatch, Skill,
    SkillPatch, SocialLink, SocialLinkPatch, WebsiteSettings, WebsiteSettingsPatch,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Admin with this username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    visitor_count: u64,
    admins: Collection<Admin>,
    page_views: Collection<PageView>,
    website_settings: WebsiteSettings,
    personal_info: PersonalInfo,
    social_links: Collection<SocialLink>,
    projects: Collection<Project>,
    skills: Collection<Skill>,
    contact_messages: Collection<ContactMessage>,
}

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub visitor_count: u64,
    pub message_count: usize,
    pub unread_message_count: usize,
    pub page_count: usize,
    pub page_view_count: u64,
}

#[derive(Debug, Clone)]
pub struct ContentStore {
    state: Arc<RwLock<StoreState>>,
    bcrypt_cost: u32,
}

impl ContentStore {
    /// Default settings and personal info, no admin, empty collections.
    pub fn empty(bcrypt_cost: u32) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            bcrypt_cost,
        }
    }

    /// Store with the configured admin and the sample links, project and skills.
    pub async fn seeded(admin: &AdminSeed, bcrypt_cost: u32) -> Result<Self, StoreError> {
        let store = Self::empty(bcrypt_cost);
        match &admin.password {
            AdminPassword::Hash(hash) => {
                store.insert_admin(&admin.username, hash.clone()).await?;
            }
            AdminPassword::Plain(plain) => {
                store.create_admin(&admin.username, plain).await?;
            }
        }
        seed::seed_content(&mut *store.state.write().await);
        tracing::info!(admin = %admin.username, "content store seeded");
        Ok(store)
    }

    // ------------------------------------------------------------------------
    // Visitors
    // ------------------------------------------------------------------------

    pub async fn visitor_count(&self) -> u64 {
        self.state.read().await.visitor_count
    }

    /// Returns the new total.
    pub async fn increment_visitor_count(&self) -> u64 {
        let mut state = self.state.write().await;
        state.visitor_count += 1;
        state.visitor_count
    }

    pub async fn reset_visitor_count(&self) {
        self.state.write().await.visitor_count = 0;
    }

    // ------------------------------------------------------------------------
    // Admins
    // ------------------------------------------------------------------------

    /// Hashes `password` off the async executor and stores a new admin.
    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminSummary, StoreError> {
        let cost = self.bcrypt_cost;
        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?;
        self.insert_admin(username, hash).await
    }

    async fn insert_admin(
        &self,
        username: &str,
        password_hash: String,
    ) -> Result<AdminSummary, StoreError> {
        let mut state = self.state.write().await;
        if state.admins.iter().any(|a| a.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }
        let admin = state.admins.insert_with(|id| Admin {
            id,
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        });
        Ok(admin.summary())
    }

    pub async fn admin_by_username(&self, username: &str) -> Option<Admin> {
        let state = self.state.read().await;
        let admin = state.admins.iter().find(|a| a.username == username).cloned();
        admin
    }

    /// `None` for an unknown username or a wrong password.
    pub async fn validate_admin(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<AdminSummary>, StoreError> {
        let Some(admin) = self.admin_by_username(&credentials.username).await else {
            return Ok(None);
        };

        let password = credentials.password.clone();
        let hash = admin.password_hash.clone();
        let password_ok = tokio::task::spawn_blocking(move || {
            bcrypt::verify(password, &hash).unwrap_or(false)
        })
        .await
        .map_err(|e| StoreError::PasswordHash(e.to_string()))?;

        Ok(password_ok.then(|| admin.summary()))
    }

    // ------------------------------------------------------------------------
    // Page views
    // ------------------------------------------------------------------------

    /// Bumps the counter for `path`. Once `MAX_PAGE_PATHS` distinct paths are
    /// tracked, new paths are ignored and `None` is returned; known paths keep
    /// counting.
    pub async fn record_page_view(&self, path: &str) -> Option<PageView> {
        let mut state = self.state.write().await;
        if let Some(existing) = state.page_views.find_mut(|p| p.page_view == path) {
            existing.count += 1;
            return Some(existing.clone());
        }
        if state.page_views.len() >= MAX_PAGE_PATHS {
            return None;
        }
        Some(state.page_views.insert_with(|id| PageView {
            id,
            page_view: path.to_string(),
            count: 1,
            created_at: Utc::now(),
        }))
    }

    pub async fn page_views(&self) -> Vec<PageView> {
        self.state.read().await.page_views.iter().cloned().collect()
    }

    /// Busiest paths first.
    pub async fn top_page_views(&self, limit: usize) -> Vec<PageView> {
        let mut views = self.page_views().await;
        views.sort_by(|a, b| b.count.cmp(&a.count));
        views.truncate(limit);
        views
    }

    // ------------------------------------------------------------------------
    // Website settings & personal info
    // ------------------------------------------------------------------------

    pub async fn website_settings(&self) -> WebsiteSettings {
        self.state.read().await.website_settings.clone()
    }

    pub async fn update_website_settings(&self, patch: WebsiteSettingsPatch) -> WebsiteSettings {
        use collection::Patch;
        let mut state = self.state.write().await;
        patch.apply_to(&mut state.website_settings);
        state.website_settings.updated_at = Utc::now();
        state.website_settings.clone()
    }

    pub async fn personal_info(&self) -> PersonalInfo {
        self.state.read().await.personal_info.clone()
    }

    pub async fn update_personal_info(&self, patch: PersonalInfoPatch) -> PersonalInfo {
        use collection::Patch;
        let mut state = self.state.write().await;
        patch.apply_to(&mut state.personal_info);
        state.personal_info.updated_at = Utc::now();
        state.personal_info.clone()
    }

    // ------------------------------------------------------------------------
    // Social links
    // ------------------------------------------------------------------------

    pub async fn social_links(&self) -> Vec<SocialLink> {
        self.state.read().await.social_links.ordered()
    }

    pub async fn social_link(&self, id: RecordId) -> Option<SocialLink> {
        self.state.read().await.social_links.get(id).cloned()
    }

    pub async fn create_social_link(&self, data: NewSocialLink) -> SocialLink {
        let now = Utc::now();
        let mut state = self.state.write().await;
        state.social_links.insert_with(|id| data.into_record(id, now))
    }

    pub async fn update_social_link(
        &self,
        id: RecordId,
        patch: SocialLinkPatch,
    ) -> Option<SocialLink> {
        let mut state = self.state.write().await;
        state.social_links.update(id, patch, Utc::now())
    }

    pub async fn delete_social_link(&self, id: RecordId) -> bool {
        self.state.write().await.social_links.remove(id)
    }

    // ------------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------------

    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.ordered()
    }

    pub async fn featured_projects(&self) -> Vec<Project> {
        self.state.read().await.projects.ordered_where(|p| p.featured)
    }

    pub async fn project(&self, id: RecordId) -> Option<Project> {
        self.state.read().await.projects.get(id).cloned()
    }

    pub async fn create_project(&self, data: NewProject) -> Project {
        let now = Utc::now();
        let mut state = self.state.write().await;
        state.projects.insert_with(|id| data.into_record(id, now))
    }

    pub async fn update_project(&self, id: RecordId, patch: ProjectPatch) -> Option<Project> {
        let mut state = self.state.write().await;
        state.projects.update(id, patch, Utc::now())
    }

    pub async fn delete_project(&self, id: RecordId) -> bool {
        self.state.write().await.projects.remove(id)
    }

    // ------------------------------------------------------------------------
    // Skills
    // ------------------------------------------------------------------------

    pub async fn skills(&self) -> Vec<Skill> {
        self.state.read().await.skills.ordered()
    }

    pub async fn skills_by_category(&self, category: &str) -> Vec<Skill> {
        self.state
            .read()
            .await
            .skills
            .ordered_where(|s| s.category == category)
    }

    pub async fn skill(&self, id: RecordId) -> Option<Skill> {
        self.state.read().await.skills.get(id).cloned()
    }

    pub async fn create_skill(&self, data: NewSkill) -> Skill {
        let now = Utc::now();
        let mut state = self.state.write().await;
        state.skills.insert_with(|id| data.into_record(id, now))
    }

    pub async fn update_skill(&self, id: RecordId, patch: SkillPatch) -> Option<Skill> {
        let mut state = self.state.write().await;
        state.skills.update(id, patch, Utc::now())
    }

    pub async fn delete_skill(&self, id: RecordId) -> bool {
        self.state.write().await.skills.remove(id)
    }

    // ------------------------------------------------------------------------
    // Contact messages
    // ------------------------------------------------------------------------

    pub async fn save_contact_message(&self, data: NewContactMessage) -> ContactMessage {
        let now = Utc::now();
        let mut state = self.state.write().await;
        state.contact_messages.insert_with(|id| data.into_record(id, now))
    }

    /// Newest first.
    pub async fn contact_messages(&self) -> Vec<ContactMessage> {
        let state = self.state.read().await;
        let messages = state.contact_messages.iter().rev().cloned().collect();
        messages
    }

    pub async fn set_message_read(&self, id: RecordId, read: bool) -> Option<ContactMessage> {
        let mut state = self.state.write().await;
        let message = state.contact_messages.find_mut(|m| m.id == id)?;
        message.read = read;
        Some(message.clone())
    }

    pub async fn delete_contact_message(&self, id: RecordId) -> bool {
        self.state.write().await.contact_messages.remove(id)
    }

    pub async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        StoreStats {
            visitor_count: state.visitor_count,
            message_count: state.contact_messages.len(),
            unread_message_count: state.contact_messages.iter().filter(|m| !m.read).count(),
            page_count: state.page_views.len(),
            page_view_count: state.page_views.iter().map(|p| p.count).sum(),
        }
    }
}
