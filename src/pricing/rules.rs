//! Keyword rule tables for field, item-type, and complexity inference.
//!
//! The tables are explicit data rather than inline conditionals so rules can
//! be unit-tested in isolation and extended without touching aggregation
//! logic. Matching is plain lowercase containment; within each table the
//! first matching rule wins.

use std::fmt;

/// Rule table revision. Bump when keywords or canonical values change so
/// audit entries can be traced back to the rules that produced them.
pub const RULE_TABLE_VERSION: &str = "2025.1";

/// Canonical domain fields. Closed set; free-text field names are mapped
/// onto one of these (or `General` when nothing matches).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    WebFrontend,
    WebBackend,
    MobileApp,
    ContentWriting,
    GraphicDesign,
    DigitalMarketing,
    DataAnalytics,
    General,
}

impl Field {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WebFrontend => "Web Frontend",
            Self::WebBackend => "Web Backend",
            Self::MobileApp => "Mobile App",
            Self::ContentWriting => "Content Writing & Strategy",
            Self::GraphicDesign => "Graphic Design",
            Self::DigitalMarketing => "Digital Marketing",
            Self::DataAnalytics => "Data & Analytics",
            Self::General => "General Services",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Item types recognized within the canonical fields.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    // Web frontend
    Page,
    Form,
    Shop,
    Embed,
    // Web backend
    Endpoint,
    DataModel,
    AuthFlow,
    // Mobile
    Screen,
    AppFeature,
    Release,
    // Content
    BlogPost,
    Article,
    ProductCopy,
    ContentPlan,
    // Design
    Logo,
    BrandKit,
    Illustration,
    // Marketing
    Campaign,
    SeoAudit,
    SocialPlan,
    // Data
    Dashboard,
    Report,
    Pipeline,
    /// No item rule matched; resolution falls through to field averages.
    General,
}

/// Work complexity inferred from the line text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Basic,
    Standard,
    Complex,
}

/// Maps a keyword set to a canonical field.
pub struct FieldRule {
    pub field: Field,
    pub keywords: &'static [&'static str],
}

/// Maps a keyword set to an item type, scoped to one canonical field.
pub struct ItemRule {
    pub field: Field,
    pub kind: ItemKind,
    pub keywords: &'static [&'static str],
}

/// Maps a keyword set to a complexity level.
pub struct ComplexityRule {
    pub complexity: Complexity,
    pub keywords: &'static [&'static str],
}

/// The versioned rule tables used by the classifier.
pub struct RuleSet {
    version: &'static str,
    field_rules: Vec<FieldRule>,
    item_rules: Vec<ItemRule>,
    complexity_rules: Vec<ComplexityRule>,
}

impl RuleSet {
    /// The standard rule tables.
    pub fn standard() -> Self {
        let field_rules = vec![
            FieldRule {
                field: Field::WebFrontend,
                keywords: &[
                    "frontend",
                    "front-end",
                    "wordpress",
                    "web design",
                    "website",
                    "landing",
                    "webshop",
                ],
            },
            FieldRule {
                field: Field::WebBackend,
                keywords: &["backend", "back-end", "api", "server", "database"],
            },
            FieldRule {
                field: Field::MobileApp,
                keywords: &["mobile", "ios", "android", "flutter", "react native"],
            },
            FieldRule {
                field: Field::ContentWriting,
                keywords: &[
                    "content",
                    "writing",
                    "copywriting",
                    "blog",
                    "article",
                    "newsletter",
                ],
            },
            FieldRule {
                field: Field::GraphicDesign,
                keywords: &["design", "logo", "brand", "illustration", "graphic"],
            },
            FieldRule {
                field: Field::DigitalMarketing,
                keywords: &["marketing", "seo", "social media", "ads", "campaign"],
            },
            FieldRule {
                field: Field::DataAnalytics,
                keywords: &["data", "analytics", "dashboard", "etl", "reporting"],
            },
        ];

        let item_rules = vec![
            // Web frontend
            ItemRule {
                field: Field::WebFrontend,
                kind: ItemKind::Form,
                keywords: &["form", "contact"],
            },
            ItemRule {
                field: Field::WebFrontend,
                kind: ItemKind::Shop,
                keywords: &["shop", "store", "checkout", "e-commerce", "ecommerce"],
            },
            ItemRule {
                field: Field::WebFrontend,
                kind: ItemKind::Embed,
                keywords: &["integration", "embed", "connect"],
            },
            ItemRule {
                field: Field::WebFrontend,
                kind: ItemKind::Page,
                keywords: &["page", "landing", "layout"],
            },
            // Web backend
            ItemRule {
                field: Field::WebBackend,
                kind: ItemKind::AuthFlow,
                keywords: &["auth", "login", "signup", "sign-up"],
            },
            ItemRule {
                field: Field::WebBackend,
                kind: ItemKind::DataModel,
                keywords: &["schema", "model", "migration", "database"],
            },
            ItemRule {
                field: Field::WebBackend,
                kind: ItemKind::Endpoint,
                keywords: &["endpoint", "api", "rest", "webhook"],
            },
            // Mobile
            ItemRule {
                field: Field::MobileApp,
                kind: ItemKind::Screen,
                keywords: &["screen", "view", "onboarding"],
            },
            ItemRule {
                field: Field::MobileApp,
                kind: ItemKind::Release,
                keywords: &["app store", "play store", "release", "publish"],
            },
            ItemRule {
                field: Field::MobileApp,
                kind: ItemKind::AppFeature,
                keywords: &["feature", "push", "notification", "offline"],
            },
            // Content
            ItemRule {
                field: Field::ContentWriting,
                kind: ItemKind::BlogPost,
                keywords: &["blog"],
            },
            ItemRule {
                field: Field::ContentWriting,
                kind: ItemKind::Article,
                keywords: &["article", "whitepaper", "guide"],
            },
            ItemRule {
                field: Field::ContentWriting,
                kind: ItemKind::ProductCopy,
                keywords: &["product description", "product copy", "sales copy"],
            },
            ItemRule {
                field: Field::ContentWriting,
                kind: ItemKind::ContentPlan,
                keywords: &["strategy", "editorial", "calendar"],
            },
            // Design
            ItemRule {
                field: Field::GraphicDesign,
                kind: ItemKind::Logo,
                keywords: &["logo"],
            },
            ItemRule {
                field: Field::GraphicDesign,
                kind: ItemKind::BrandKit,
                keywords: &["brand", "identity", "style guide"],
            },
            ItemRule {
                field: Field::GraphicDesign,
                kind: ItemKind::Illustration,
                keywords: &["illustration", "icon", "banner"],
            },
            // Marketing
            ItemRule {
                field: Field::DigitalMarketing,
                kind: ItemKind::Campaign,
                keywords: &["campaign", "ads", "adwords"],
            },
            ItemRule {
                field: Field::DigitalMarketing,
                kind: ItemKind::SeoAudit,
                keywords: &["seo", "audit", "ranking"],
            },
            ItemRule {
                field: Field::DigitalMarketing,
                kind: ItemKind::SocialPlan,
                keywords: &["social", "posting", "schedule"],
            },
            // Data
            ItemRule {
                field: Field::DataAnalytics,
                kind: ItemKind::Dashboard,
                keywords: &["dashboard", "visualization"],
            },
            ItemRule {
                field: Field::DataAnalytics,
                kind: ItemKind::Report,
                keywords: &["report", "analysis"],
            },
            ItemRule {
                field: Field::DataAnalytics,
                kind: ItemKind::Pipeline,
                keywords: &["pipeline", "etl", "import"],
            },
        ];

        let complexity_rules = vec![
            ComplexityRule {
                complexity: Complexity::Basic,
                keywords: &["simple", "minimal", "basic", "small"],
            },
            ComplexityRule {
                complexity: Complexity::Complex,
                keywords: &["advanced", "enterprise", "complex", "custom"],
            },
        ];

        Self {
            version: RULE_TABLE_VERSION,
            field_rules,
            item_rules,
            complexity_rules,
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    /// Map a free-text field name to a canonical field. Falls back to
    /// `General` when no keyword matches.
    pub fn canonical_field(&self, text: &str) -> Field {
        let haystack = text.trim().to_lowercase();
        for rule in &self.field_rules {
            if rule.keywords.iter().any(|k| haystack.contains(k)) {
                return rule.field;
            }
        }
        Field::General
    }

    /// Infer an item type from a line, scoped to the canonical field.
    pub fn item_kind(&self, field: Field, text: &str) -> ItemKind {
        let haystack = text.trim().to_lowercase();
        for rule in self.item_rules.iter().filter(|r| r.field == field) {
            if rule.keywords.iter().any(|k| haystack.contains(k)) {
                return rule.kind;
            }
        }
        ItemKind::General
    }

    /// Infer complexity from a line. Defaults to `Standard`.
    pub fn complexity(&self, text: &str) -> Complexity {
        let haystack = text.trim().to_lowercase();
        for rule in &self.complexity_rules {
            if rule.keywords.iter().any(|k| haystack.contains(k)) {
                return rule.complexity;
            }
        }
        Complexity::Standard
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_mapping() {
        let rules = RuleSet::standard();

        assert_eq!(
            rules.canonical_field("Content Writing & Strategy"),
            Field::ContentWriting
        );
        assert_eq!(rules.canonical_field("Web Frontend"), Field::WebFrontend);
        assert_eq!(rules.canonical_field("WordPress site"), Field::WebFrontend);
        assert_eq!(rules.canonical_field("REST API work"), Field::WebBackend);
        assert_eq!(rules.canonical_field("Dog walking"), Field::General);
    }

    #[test]
    fn test_field_rule_order_breaks_keyword_overlap() {
        let rules = RuleSet::standard();

        // "web design" contains "design" too; the frontend rule is checked
        // first and wins.
        assert_eq!(rules.canonical_field("Web design"), Field::WebFrontend);
        assert_eq!(rules.canonical_field("Logo design"), Field::GraphicDesign);
    }

    #[test]
    fn test_item_kind_is_scoped_to_field() {
        let rules = RuleSet::standard();

        assert_eq!(
            rules.item_kind(Field::WebFrontend, "Build a contact form"),
            ItemKind::Form
        );
        // The same line in another field matches nothing there.
        assert_eq!(
            rules.item_kind(Field::ContentWriting, "Build a contact form"),
            ItemKind::General
        );
        assert_eq!(
            rules.item_kind(Field::ContentWriting, "Write 2 blog posts"),
            ItemKind::BlogPost
        );
    }

    #[test]
    fn test_complexity_inference() {
        let rules = RuleSet::standard();

        assert_eq!(rules.complexity("simple landing page"), Complexity::Basic);
        assert_eq!(
            rules.complexity("enterprise integration"),
            Complexity::Complex
        );
        assert_eq!(rules.complexity("blog post"), Complexity::Standard);
    }
}
