//! Sections of the settings shell and the selector choosing between them.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Store,
    Managers,
    Ai,
    Integrations,
}

/// Menu entry rendered by the sidebar and the mobile tabs.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SectionLink {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

impl Section {
    /// Static menu, in display order.
    pub const ALL: [Section; 4] = [
        Section::Store,
        Section::Managers,
        Section::Ai,
        Section::Integrations,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Section::Store => "store",
            Section::Managers => "managers",
            Section::Ai => "ai",
            Section::Integrations => "integrations",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Store => "Настройка магазина",
            Section::Managers => "Менеджеры",
            Section::Ai => "Настройка ИИ",
            Section::Integrations => "Интеграции",
        }
    }

    /// Resolves a query value, falling back to the default section.
    pub fn from_slug(slug: Option<&str>) -> Self {
        slug.map(str::trim)
            .and_then(|slug| Self::ALL.into_iter().find(|section| section.slug() == slug))
            .unwrap_or_default()
    }

    /// Menu with this section marked active.
    pub fn links(self) -> Vec<SectionLink> {
        Self::ALL
            .into_iter()
            .map(|section| SectionLink {
                slug: section.slug(),
                label: section.label(),
                active: section == self,
            })
            .collect()
    }
}
