//! CSS selectors and placeholder texts used to read a profile page.
//!
//! The profile markup changes without notice, so every class name lives here as
//! data. The `[selectors]` table of the config file can override any part of it.
//!
//! A selector like `span.t-bold` matches any element carrying that class. A rule
//! with `classes` additionally requires the element's class list to be exactly
//! those classes in that order, however the attribute is spaced. This keeps
//! e.g. the duration span from also matching the location span, whose classes
//! are a superset.

use serde::{Deserialize, Serialize};

/// Where to find one field, and what to write when it is not there.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FieldRule {
    pub selector: String,
    /// When non-empty, the whitespace-separated `class` attribute of the
    /// matched element must equal this list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    pub sentinel: String,
}
impl FieldRule {
    fn new(selector: &str, sentinel: &str) -> Self {
        Self::with_classes(selector, &[], sentinel)
    }

    fn with_classes(selector: &str, classes: &[&str], sentinel: &str) -> Self {
        Self {
            selector: selector.to_owned(),
            classes: classes.iter().map(|&c| c.to_owned()).collect(),
            sentinel: sentinel.to_owned(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorTable {
    pub profile: ProfileRules,
    pub experience: ExperienceRules,
    pub education: EducationRules,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRules {
    pub name: FieldRule,
    pub location: FieldRule,
    pub connections: FieldRule,
    pub headline: FieldRule,
}
impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            name: FieldRule::new("h1.text-heading-xlarge", "N/A"),
            location: FieldRule::with_classes(
                "span",
                &["text-body-small", "inline", "t-black--light", "break-words"],
                "No Location Found",
            ),
            connections: FieldRule::new("span.t-bold", "No Connections Found"),
            headline: FieldRule::with_classes(
                "div",
                &["text-body-medium", "break-words"],
                "No Headline Found",
            ),
        }
    }
}

/// Entries are the `block` elements inside the parent of the `anchor` element.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRules {
    pub anchor: String,
    pub block: String,
    pub company: FieldRule,
    pub duration: FieldRule,
    pub location: FieldRule,
}
impl Default for ExperienceRules {
    fn default() -> Self {
        Self {
            anchor: "div#experience".to_owned(),
            block: ENTITY_BLOCK.to_owned(),
            company: FieldRule::new(TITLE, "No Company Found"),
            duration: FieldRule::with_classes("span", SUBTITLE, "No Duration Found"),
            location: FieldRule::with_classes("span", CAPTION, "No Location Found"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationRules {
    pub anchor: String,
    pub block: String,
    pub institution: FieldRule,
    pub degree: FieldRule,
    pub duration: FieldRule,
}
impl Default for EducationRules {
    fn default() -> Self {
        Self {
            anchor: "div#education".to_owned(),
            block: ENTITY_BLOCK.to_owned(),
            institution: FieldRule::new(TITLE, "No Institution Found"),
            degree: FieldRule::with_classes("span", SUBTITLE, "No Degree Found"),
            duration: FieldRule::with_classes("span", CAPTION, "No Duration Found"),
        }
    }
}

// Both sections render their items with the same entity component.
const ENTITY_BLOCK: &str = r#"div[data-view-name="profile-component-entity"]"#;
const TITLE: &str = "div.hoverable-link-text";
const SUBTITLE: &[&str] = &["t-14", "t-normal"];
const CAPTION: &[&str] = &["t-14", "t-normal", "t-black--light"];

#[cfg(test)]
mod tests {
    use super::{FieldRule, SelectorTable};

    #[test]
    fn partial_override_keeps_other_rules() {
        let table: SelectorTable = toml::from_str(
            r#"
            [profile.name]
            selector = "h1.profile-name"
            sentinel = "Unknown"

            [experience.duration]
            selector = "span"
            classes = ["pvs-entity__caption"]
            sentinel = "?"

            [education]
            anchor = "section#education"
            "#,
        )
        .unwrap();
        let default = SelectorTable::default();

        assert_eq!(
            table.profile.name,
            FieldRule {
                selector: "h1.profile-name".into(),
                classes: vec![],
                sentinel: "Unknown".into(),
            }
        );
        assert_eq!(table.experience.duration.classes, ["pvs-entity__caption"]);
        assert_eq!(table.experience.company, default.experience.company);
        assert_eq!(table.profile.headline, default.profile.headline);
        assert_eq!(table.education.anchor, "section#education");
        assert_eq!(table.education.block, default.education.block);
    }
}
