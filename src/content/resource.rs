//! Resource directory - curated links shipped with the binary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Section of the resource directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceCategory {
    Frontend,
    Backend,
    Database,
    Devops,
    Cloud,
    Security,
    Testing,
    Design,
    Productivity,
    Learning,
    Documentation,
    Tools,
    Ai,
    SystemDesign,
    Career,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 15] = [
        Self::Frontend,
        Self::Backend,
        Self::Database,
        Self::Devops,
        Self::Cloud,
        Self::Security,
        Self::Testing,
        Self::Design,
        Self::Productivity,
        Self::Learning,
        Self::Documentation,
        Self::Tools,
        Self::Ai,
        Self::SystemDesign,
        Self::Career,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Database => "Database",
            Self::Devops => "DevOps",
            Self::Cloud => "Cloud",
            Self::Security => "Security",
            Self::Testing => "Testing",
            Self::Design => "Design",
            Self::Productivity => "Productivity",
            Self::Learning => "Learning",
            Self::Documentation => "Documentation",
            Self::Tools => "Tools",
            Self::Ai => "AI",
            Self::SystemDesign => "System Design",
            Self::Career => "Career",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A link in the resource directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: ResourceCategory,
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    pub date_added: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[allow(clippy::too_many_arguments)]
fn resource(
    id: &str,
    title: &str,
    description: &str,
    url: &str,
    category: ResourceCategory,
    tags: &[&str],
    favorite: bool,
    date_added: &str,
    icon: Option<&str>,
) -> Resource {
    Resource {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        favorite,
        date_added: date_added.to_string(),
        icon: icon.map(String::from),
    }
}

/// The built-in resource list
pub fn sample_resources() -> Vec<Resource> {
    use ResourceCategory::*;
    vec![
        resource(
            "mdn",
            "MDN Web Docs",
            "Reference for HTML, CSS and JavaScript.",
            "https://developer.mozilla.org",
            Documentation,
            &["web", "reference"],
            true,
            "2024-01-10",
            Some("book"),
        ),
        resource(
            "rust-book",
            "The Rust Programming Language",
            "The official introduction to Rust.",
            "https://doc.rust-lang.org/book/",
            Learning,
            &["rust", "book"],
            true,
            "2024-02-03",
            Some("rust"),
        ),
        resource(
            "use-the-index-luke",
            "Use The Index, Luke",
            "SQL indexing and tuning explained for developers.",
            "https://use-the-index-luke.com",
            Database,
            &["sql", "performance"],
            false,
            "2024-03-18",
            None,
        ),
        resource(
            "system-design-primer",
            "The System Design Primer",
            "Learn how to design large-scale systems.",
            "https://github.com/donnemartin/system-design-primer",
            SystemDesign,
            &["architecture", "interviews"],
            true,
            "2024-04-22",
            Some("github"),
        ),
        resource(
            "owasp-top-ten",
            "OWASP Top Ten",
            "The most critical web application security risks.",
            "https://owasp.org/www-project-top-ten/",
            Security,
            &["web", "security"],
            false,
            "2024-05-09",
            Some("shield"),
        ),
        resource(
            "excalidraw",
            "Excalidraw",
            "Hand-drawn style whiteboard for diagrams.",
            "https://excalidraw.com",
            Tools,
            &["diagrams"],
            false,
            "2024-06-14",
            Some("pen"),
        ),
        resource(
            "twelve-factor",
            "The Twelve-Factor App",
            "Methodology for building software-as-a-service apps.",
            "https://12factor.net",
            Devops,
            &["deployment", "architecture"],
            false,
            "2024-07-01",
            None,
        ),
    ]
}

/// Resources in one category, in list order
pub fn resources_by_category(
    resources: &[Resource],
    category: ResourceCategory,
) -> Vec<&Resource> {
    resources.iter().filter(|r| r.category == category).collect()
}

/// Resources flagged as favorites
pub fn favorite_resources(resources: &[Resource]) -> Vec<&Resource> {
    resources.iter().filter(|r| r.favorite).collect()
}
