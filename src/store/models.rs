//! Content records and the request shapes that create or patch them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::collection::{Ordered, Patch, Record, RecordId};

/// Copies every `Some` field of a patch over the target record.
macro_rules! merge_fields {
    ($patch:ident => $target:ident; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

lazy_static::lazy_static! {
    /// `#rgb`, `#rrggbb` or `#rrggbbaa`
    static ref HEX_COLOR: regex::Regex =
        regex::Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap();
}

// ============================================================================
// Admin
// ============================================================================

/// Stored admin credential. Never serialized; use [`AdminSummary`].
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: RecordId,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn summary(&self) -> AdminSummary {
        AdminSummary {
            id: self.id,
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

impl Record for Admin {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Admin with the password hash stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub id: RecordId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Website settings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationIntensity {
    Low,
    Medium,
    High,
}

impl std::str::FromStr for AnimationIntensity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AnimationIntensity::Low),
            "medium" => Ok(AnimationIntensity::Medium),
            "high" => Ok(AnimationIntensity::High),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSettings {
    pub id: RecordId,
    pub site_name: String,
    pub site_description: String,
    pub site_keywords: String,
    pub logo_url: String,
    pub favicon_url: String,
    pub primary_color: String,
    pub accent_color: String,
    pub font_primary: String,
    pub font_secondary: String,
    pub show_music_player: bool,
    pub music_url: String,
    pub enable_animation: bool,
    pub animation_intensity: AnimationIntensity,
    pub updated_at: DateTime<Utc>,
}

impl Default for WebsiteSettings {
    fn default() -> Self {
        Self {
            id: 1,
            site_name: "Aka's Portfolio".to_string(),
            site_description: "Professional Portfolio for Aka - Junior Developer from Indonesia"
                .to_string(),
            site_keywords: "developer, portfolio, indonesia, javascript, react".to_string(),
            logo_url: String::new(),
            favicon_url: String::new(),
            primary_color: "#0f172a".to_string(),
            accent_color: "#a48111".to_string(),
            font_primary: "Playfair Display".to_string(),
            font_secondary: "Poppins".to_string(),
            show_music_player: true,
            music_url: "https://cdn.xtermai.xyz/FYDux.mp3".to_string(),
            enable_animation: true,
            animation_intensity: AnimationIntensity::Medium,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSettingsPatch {
    pub site_name: Option<String>,
    pub site_description: Option<String>,
    pub site_keywords: Option<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_primary: Option<String>,
    pub font_secondary: Option<String>,
    pub show_music_player: Option<bool>,
    pub music_url: Option<String>,
    pub enable_animation: Option<bool>,
    /// Checked in `validate`, so a bad value is a field error rather than a parse failure.
    pub animation_intensity: Option<String>,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn check_max_chars(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) {
    if value.is_some_and(|v| v.chars().count() > max) {
        errors.add(field, field_error("length", "value is too long"));
    }
}

// Hand-written because colours need a pattern check alongside the lengths.
impl Validate for WebsiteSettingsPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_max_chars(&mut errors, "site_name", self.site_name.as_deref(), 100);
        check_max_chars(&mut errors, "font_primary", self.font_primary.as_deref(), 50);
        check_max_chars(&mut errors, "font_secondary", self.font_secondary.as_deref(), 50);

        for (field, value) in [
            ("primary_color", &self.primary_color),
            ("accent_color", &self.accent_color),
        ] {
            if let Some(color) = value {
                if !HEX_COLOR.is_match(color) {
                    errors.add(
                        field,
                        field_error("hex_color", "must be a hex colour such as #0f172a"),
                    );
                }
            }
        }

        if let Some(intensity) = &self.animation_intensity {
            if intensity.parse::<AnimationIntensity>().is_err() {
                errors.add(
                    "animation_intensity",
                    field_error("animation_intensity", "must be one of low, medium or high"),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Patch<WebsiteSettings> for WebsiteSettingsPatch {
    fn apply_to(self, target: &mut WebsiteSettings) {
        let mut patch = self;
        // unknown values never get here; validate() rejects them
        let intensity = patch.animation_intensity.take();
        if let Some(intensity) = intensity.and_then(|i| i.parse::<AnimationIntensity>().ok()) {
            target.animation_intensity = intensity;
        }
        merge_fields!(patch => target;
            site_name, site_description, site_keywords, logo_url, favicon_url,
            primary_color, accent_color, font_primary, font_secondary,
            show_music_player, music_url, enable_animation,
        );
    }
}

// ============================================================================
// Personal info
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub id: RecordId,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub avatar_url: String,
    pub resume_url: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            id: 1,
            name: "Aka".to_string(),
            title: "Junior Developer".to_string(),
            bio: "15-year-old junior developer from West Sumatra, Indonesia".to_string(),
            location: "West Sumatra, Indonesia".to_string(),
            email: "aka@example.com".to_string(),
            phone: "+62 123 4567 890".to_string(),
            avatar_url: String::new(),
            resume_url: String::new(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoPatch {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub title: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    #[validate(length(max = 100))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
}

impl Patch<PersonalInfo> for PersonalInfoPatch {
    fn apply_to(self, target: &mut PersonalInfo) {
        let patch = self;
        merge_fields!(patch => target;
            name, title, bio, location, email, phone, avatar_url, resume_url,
        );
    }
}

// ============================================================================
// Social links
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: RecordId,
    pub platform: String,
    pub url: String,
    pub icon: String,
    pub display_order: i32,
    pub updated_at: DateTime<Utc>,
}

impl Record for SocialLink {
    fn id(&self) -> RecordId {
        self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Ordered for SocialLink {
    fn display_order(&self) -> i32 {
        self.display_order
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSocialLink {
    #[validate(length(min = 1, max = 50))]
    pub platform: String,
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(length(max = 50))]
    pub icon: String,
    pub display_order: Option<i32>,
}

impl NewSocialLink {
    pub fn into_record(self, id: RecordId, now: DateTime<Utc>) -> SocialLink {
        SocialLink {
            id,
            platform: self.platform,
            url: self.url,
            icon: self.icon,
            display_order: self.display_order.unwrap_or(0),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkPatch {
    #[validate(length(min = 1, max = 50))]
    pub platform: Option<String>,
    #[validate(length(min = 1))]
    pub url: Option<String>,
    #[validate(length(max = 50))]
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}

impl Patch<SocialLink> for SocialLinkPatch {
    fn apply_to(self, target: &mut SocialLink) {
        let patch = self;
        merge_fields!(patch => target; platform, url, icon, display_order);
    }
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub project_url: String,
    pub github_url: String,
    /// Comma-separated, rendered as tags by the client.
    pub technologies: String,
    pub featured: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Project {
    fn id(&self) -> RecordId {
        self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Ordered for Project {
    fn display_order(&self) -> i32 {
        self.display_order
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Option<String>,
    pub featured: Option<bool>,
    pub display_order: Option<i32>,
}

impl NewProject {
    pub fn into_record(self, id: RecordId, now: DateTime<Utc>) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url.unwrap_or_default(),
            project_url: self.project_url.unwrap_or_default(),
            github_url: self.github_url.unwrap_or_default(),
            technologies: self.technologies.unwrap_or_default(),
            featured: self.featured.unwrap_or(false),
            display_order: self.display_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Option<String>,
    pub featured: Option<bool>,
    pub display_order: Option<i32>,
}

impl Patch<Project> for ProjectPatch {
    fn apply_to(self, target: &mut Project) {
        let patch = self;
        merge_fields!(patch => target;
            title, description, thumbnail_url, project_url, github_url,
            technologies, featured, display_order,
        );
    }
}

// ============================================================================
// Skills
// ============================================================================

pub const DEFAULT_SKILL_CATEGORY: &str = "frontend";
pub const DEFAULT_SKILL_PROFICIENCY: i32 = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    /// 0 to 100
    pub proficiency: i32,
    pub icon: String,
    pub display_order: i32,
    pub updated_at: DateTime<Utc>,
}

impl Record for Skill {
    fn id(&self) -> RecordId {
        self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Ordered for Skill {
    fn display_order(&self) -> i32 {
        self.display_order
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Proficiency must be between 0 and 100"))]
    pub proficiency: Option<i32>,
    #[validate(length(max = 50))]
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}

impl NewSkill {
    pub fn into_record(self, id: RecordId, now: DateTime<Utc>) -> Skill {
        Skill {
            id,
            name: self.name,
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_SKILL_CATEGORY.to_string()),
            proficiency: self.proficiency.unwrap_or(DEFAULT_SKILL_PROFICIENCY),
            icon: self.icon.unwrap_or_default(),
            display_order: self.display_order.unwrap_or(0),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkillPatch {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Proficiency must be between 0 and 100"))]
    pub proficiency: Option<i32>,
    #[validate(length(max = 50))]
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}

impl Patch<Skill> for SkillPatch {
    fn apply_to(self, target: &mut Skill) {
        let patch = self;
        merge_fields!(patch => target; name, category, proficiency, icon, display_order);
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub id: RecordId,
    pub page_view: String,
    pub count: u64,
    pub created_at: DateTime<Utc>,
}

impl Record for PageView {
    fn id(&self) -> RecordId {
        self.id
    }
}

// ============================================================================
// Contact messages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Record for ContactMessage {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewContactMessage {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

impl NewContactMessage {
    pub fn into_record(self, id: RecordId, now: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            created_at: now,
            read: false,
        }
    }
}
