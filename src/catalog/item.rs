use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The fixed set of interest categories a skill can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Communication,
    Leadership,
    TimeManagement,
    EmotionalIntelligence,
    ProblemSolving,
    Teamwork,
    Adaptability,
    CriticalThinking,
    Creativity,
    Mindfulness,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Communication,
        Category::Leadership,
        Category::TimeManagement,
        Category::EmotionalIntelligence,
        Category::ProblemSolving,
        Category::Teamwork,
        Category::Adaptability,
        Category::CriticalThinking,
        Category::Creativity,
        Category::Mindfulness,
    ];

    /// Human label, also the wire form
    pub fn label(&self) -> &'static str {
        match self {
            Category::Communication => "Communication",
            Category::Leadership => "Leadership",
            Category::TimeManagement => "Time Management",
            Category::EmotionalIntelligence => "Emotional Intelligence",
            Category::ProblemSolving => "Problem Solving",
            Category::Teamwork => "Teamwork",
            Category::Adaptability => "Adaptability",
            Category::CriticalThinking => "Critical Thinking",
            Category::Creativity => "Creativity",
            Category::Mindfulness => "Mindfulness",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the label in any case, with spaces, dashes or underscores
    /// between words ("Time Management", "time_management", "time-management").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalize = |v: &str| -> String {
            v.trim()
                .chars()
                .filter(|c| !matches!(c, ' ' | '_' | '-'))
                .flat_map(|c| c.to_lowercase())
                .collect()
        };
        let wanted = normalize(s);
        Category::ALL
            .iter()
            .find(|c| normalize(c.label()) == wanted)
            .copied()
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};

        struct CategoryVisitor;

        impl<'de> Visitor<'de> for CategoryVisitor {
            type Value = Category;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a category label such as \"Time Management\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse::<Category>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CategoryVisitor)
    }
}

/// One practicable skill in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
}

impl CatalogItem {
    pub fn new(id: &str, title: &str, description: &str, category: Category) -> Self {
        CatalogItem {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
        }
    }
}
