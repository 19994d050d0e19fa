//! Portfolio content records.
//!
//! The records ship as `assets/portfolio.json`, are parsed once on first
//! use and never change afterwards.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::placement::ComponentType;

#[derive(Debug, Clone, Deserialize)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub location: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

/// Fields every section carries.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionHeader {
    pub id: String,
    pub component_type: ComponentType,
    pub label: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct About {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub summary: String,
    pub details: Vec<String>,
    pub focus_areas: Vec<String>,
    pub learning_style: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Advanced,
    Intermediate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    /// Translation key under `skills.` for the category heading.
    pub key: String,
    pub items: Vec<String>,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skills {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub institution: String,
    pub degree: String,
    pub period: String,
    pub gpa: String,
    pub year: String,
    pub expected_graduation: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub name: String,
    pub role: String,
    pub period: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub items: Vec<Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    pub role: String,
    pub period: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Projects {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub items: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpokenLanguage {
    pub name: String,
    pub level: String,
    /// Percentage, 0..=100.
    pub proficiency: u8,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Languages {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub items: Vec<SpokenLanguage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Goals {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub content: String,
    pub career_goals: Vec<String>,
    pub avoided_paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Principle {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Workflow {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub principles: Vec<Principle>,
    pub approach: String,
    pub preferred: Vec<String>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    #[serde(flatten)]
    pub header: SectionHeader,
    pub email: String,
    pub location: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub personal: Personal,
    pub about: About,
    pub skills: Skills,
    pub education: Education,
    pub experience: Experience,
    pub projects: Projects,
    pub languages: Languages,
    pub goals: Goals,
    pub workflow: Workflow,
    pub contact: Contact,
}

/// A borrowed view of one section, selected by data key.
#[derive(Debug, Clone, Copy)]
pub enum Section<'a> {
    About(&'a About),
    Skills(&'a Skills),
    Education(&'a Education),
    Experience(&'a Experience),
    Projects(&'a Projects),
    Languages(&'a Languages),
    Goals(&'a Goals),
    Workflow(&'a Workflow),
    Contact(&'a Contact),
}

impl<'a> Section<'a> {
    pub fn header(&self) -> &'a SectionHeader {
        match *self {
            Section::About(s) => &s.header,
            Section::Skills(s) => &s.header,
            Section::Education(s) => &s.header,
            Section::Experience(s) => &s.header,
            Section::Projects(s) => &s.header,
            Section::Languages(s) => &s.header,
            Section::Goals(s) => &s.header,
            Section::Workflow(s) => &s.header,
            Section::Contact(s) => &s.header,
        }
    }
}

pub const DATA_KEYS: [&str; 9] = [
    "about",
    "skills",
    "education",
    "experience",
    "projects",
    "languages",
    "goals",
    "workflow",
    "contact",
];

impl Portfolio {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn section(&self, data_key: &str) -> Option<Section<'_>> {
        Some(match data_key {
            "about" => Section::About(&self.about),
            "skills" => Section::Skills(&self.skills),
            "education" => Section::Education(&self.education),
            "experience" => Section::Experience(&self.experience),
            "projects" => Section::Projects(&self.projects),
            "languages" => Section::Languages(&self.languages),
            "goals" => Section::Goals(&self.goals),
            "workflow" => Section::Workflow(&self.workflow),
            "contact" => Section::Contact(&self.contact),
            _ => return None,
        })
    }
}

const PORTFOLIO_JSON: &str = include_str!("../assets/portfolio.json");

/// The shipped portfolio, or `None` if the embedded records failed to
/// parse; callers render their "not found" fallback in that case.
pub fn portfolio() -> Option<&'static Portfolio> {
    static STORE: OnceLock<Option<Portfolio>> = OnceLock::new();
    STORE
        .get_or_init(|| {
            Portfolio::from_json(PORTFOLIO_JSON)
                .map_err(|e| log::error!("portfolio records are malformed: {e}"))
                .ok()
        })
        .as_ref()
}

/// Looks a section up in the shipped portfolio.
pub fn lookup(data_key: &str) -> Option<Section<'static>> {
    portfolio()?.section(data_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_records_parse() {
        let p = portfolio().expect("portfolio.json should parse");
        assert_eq!(p.personal.github, "https://github.com/siimsek");
        assert_eq!(p.projects.items.len(), 4);
        assert_eq!(p.languages.items[0].proficiency, 100);
    }

    #[test]
    fn every_data_key_resolves_to_its_own_section() {
        for key in DATA_KEYS {
            let section = lookup(key).unwrap_or_else(|| panic!("{key} missing"));
            assert_eq!(section.header().id, key);
        }
    }

    #[test]
    fn section_component_types_match_the_board() {
        assert_eq!(lookup("about").unwrap().header().component_type, ComponentType::Mcu);
        assert_eq!(lookup("workflow").unwrap().header().component_type, ComponentType::Cap);
        assert_eq!(lookup("goals").unwrap().header().component_type, ComponentType::Swd);
    }

    #[test]
    fn unknown_key_is_none() {
        assert!(lookup("hobbies").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn optional_project_fields_default() {
        let p = portfolio().unwrap();
        assert!(p.projects.items[0].link.is_none());
        assert_eq!(p.projects.items[3].link.as_deref(), Some("https://www.npmjs.com/package/codelly"));
    }
}
