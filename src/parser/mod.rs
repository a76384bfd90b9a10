//! Reads profile records out of a saved profile page.
//!
//! Nothing here fails on a page that lacks an element: every field falls back
//! to the sentinel text of its [`FieldRule`], and a missing section yields no
//! entries.

pub mod profile;
pub mod section;

use anyhow::Context;
use linkedin_scraping_utils::html_util::{parse_selector, stripped_text};
use scraper::{ElementRef, Html, Selector};

use crate::{
    schema::ProfileData,
    selector_table::{FieldRule, SelectorTable},
};

use self::{
    profile::ProfileSelectors,
    section::{EducationFields, ExperienceFields, Section},
};

/// A [`SelectorTable`] with every selector parsed, ready to run against pages.
pub struct Extractor {
    profile: ProfileSelectors,
    experience: Section<ExperienceFields>,
    education: Section<EducationFields>,
}

impl Extractor {
    pub fn new(table: &SelectorTable) -> anyhow::Result<Self> {
        Ok(Self {
            profile: ProfileSelectors::compile(&table.profile)?,
            experience: ExperienceFields::compile(&table.experience)?,
            education: EducationFields::compile(&table.education)?,
        })
    }

    pub fn with_default_selectors() -> anyhow::Result<Self> {
        Self::new(&SelectorTable::default())
    }

    pub fn extract(&self, html: &Html) -> ProfileData {
        ProfileData {
            profile: self.extract_profile_info(html),
            experiences: self.extract_experience(html),
            educations: self.extract_education(html),
        }
    }
}

struct FieldSelector {
    selector: Selector,
    classes: Vec<String>,
    sentinel: String,
}

impl FieldSelector {
    fn compile(rule: &FieldRule, field: &str) -> anyhow::Result<Self> {
        Ok(Self {
            selector: parse_selector(&rule.selector)
                .with_context(|| format!("While compiling the selector for {field}"))?,
            classes: rule.classes.clone(),
            sentinel: rule.sentinel.clone(),
        })
    }

    fn has_class_list(&self, element: ElementRef) -> bool {
        self.classes.is_empty()
            || element
                .value()
                .attr("class")
                .unwrap_or_default()
                .split_whitespace()
                .eq(self.classes.iter().map(String::as_str))
    }

    /// Text of the first match below `scope`, or the sentinel.
    fn text_or_sentinel(&self, scope: ElementRef) -> String {
        let first = scope
            .select(&self.selector)
            .find(|&element| self.has_class_list(element));
        match first {
            Some(element) => stripped_text(element),
            None => self.sentinel.clone(),
        }
    }
}
