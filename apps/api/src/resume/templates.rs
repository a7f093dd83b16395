use serde::Serialize;

/// A resume layout offered by the front end.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub preview: &'static str,
    pub category: &'static str,
}

pub const TEMPLATES: &[ResumeTemplate] = &[
    ResumeTemplate {
        id: "modern",
        name: "Modern Professional",
        description: "Clean and modern design perfect for tech and creative industries",
        preview: "/templates/modern-preview.png",
        category: "professional",
    },
    ResumeTemplate {
        id: "classic",
        name: "Classic Business",
        description: "Traditional format ideal for corporate and finance roles",
        preview: "/templates/classic-preview.png",
        category: "traditional",
    },
    ResumeTemplate {
        id: "creative",
        name: "Creative Designer",
        description: "Bold and creative layout for designers and artists",
        preview: "/templates/creative-preview.png",
        category: "creative",
    },
    ResumeTemplate {
        id: "minimal",
        name: "Minimal Clean",
        description: "Simple and elegant design that works for any industry",
        preview: "/templates/minimal-preview.png",
        category: "minimal",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_ids_are_unique() {
        let mut ids: Vec<_> = TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
    }

    #[test]
    fn test_previews_match_ids() {
        for template in TEMPLATES {
            assert_eq!(
                template.preview,
                format!("/templates/{}-preview.png", template.id)
            );
        }
    }
}
