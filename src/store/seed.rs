//! Boot-time sample content.

use chrono::Utc;

use super::models::{NewProject, NewSkill, NewSocialLink};
use super::StoreState;

pub(super) fn seed_content(state: &mut StoreState) {
    let now = Utc::now();

    for (platform, url, icon, order) in [
        ("GitHub", "https://github.com/aka", "fab fa-github", 1),
        ("LinkedIn", "https://linkedin.com/in/aka", "fab fa-linkedin", 2),
    ] {
        let link = NewSocialLink {
            platform: platform.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
            display_order: Some(order),
        };
        state.social_links.insert_with(|id| link.into_record(id, now));
    }

    let project = NewProject {
        title: "Personal Portfolio".to_string(),
        description: "A professional portfolio website showcasing my skills and projects."
            .to_string(),
        github_url: Some("https://github.com/aka/portfolio".to_string()),
        technologies: Some("React, TypeScript, Tailwind CSS".to_string()),
        featured: Some(true),
        display_order: Some(1),
        ..Default::default()
    };
    state.projects.insert_with(|id| project.into_record(id, now));

    for (name, proficiency, icon, order) in [
        ("HTML/CSS", 90, "fab fa-html5", 1),
        ("JavaScript", 85, "fab fa-js", 2),
        ("React", 80, "fab fa-react", 3),
    ] {
        let skill = NewSkill {
            name: name.to_string(),
            category: Some("frontend".to_string()),
            proficiency: Some(proficiency),
            icon: Some(icon.to_string()),
            display_order: Some(order),
        };
        state.skills.insert_with(|id| skill.into_record(id, now));
    }
}
