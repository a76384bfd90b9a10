use anyhow::Context;
use log::debug;
use scraper::{ElementRef, Html, Selector};

use linkedin_scraping_utils::html_util::parse_selector;

use crate::{
    schema::{EducationEntry, ExperienceEntry},
    selector_table::{EducationRules, ExperienceRules},
};

use super::{Extractor, FieldSelector};

/// A list section of the profile, e.g. "Experience".
pub(super) struct Section<F> {
    name: &'static str,
    anchor: Selector,
    block: Selector,
    fields: F,
}

impl<F> Section<F> {
    fn compile(name: &'static str, anchor: &str, block: &str, fields: F) -> anyhow::Result<Self> {
        Ok(Self {
            name,
            anchor: parse_selector(anchor)
                .with_context(|| format!("While compiling the {name} anchor"))?,
            block: parse_selector(block)
                .with_context(|| format!("While compiling the {name} block"))?,
            fields,
        })
    }

    /// Parses every block of this section in document order.
    ///
    /// The section is the parent of the anchor element. A page without the
    /// anchor has no entries.
    fn entries<'a, T>(&self, html: &'a Html, parse: impl Fn(&F, ElementRef<'a>) -> T) -> Vec<T> {
        let Some(anchor) = html.select(&self.anchor).next() else {
            debug!("No {} section on this page", self.name);
            return vec![];
        };
        let Some(container) = anchor.parent().and_then(ElementRef::wrap) else {
            debug!("The {} anchor has no parent element", self.name);
            return vec![];
        };
        let entries: Vec<_> = container
            .select(&self.block)
            .map(|block| parse(&self.fields, block))
            .collect();
        debug!("Found {} {} entries", entries.len(), self.name);
        entries
    }
}

pub(super) struct ExperienceFields {
    company: FieldSelector,
    duration: FieldSelector,
    location: FieldSelector,
}

impl ExperienceFields {
    pub(super) fn compile(rules: &ExperienceRules) -> anyhow::Result<Section<Self>> {
        let fields = Self {
            company: FieldSelector::compile(&rules.company, "experience company")?,
            duration: FieldSelector::compile(&rules.duration, "experience duration")?,
            location: FieldSelector::compile(&rules.location, "experience location")?,
        };
        Section::compile("experience", &rules.anchor, &rules.block, fields)
    }
}

pub(super) struct EducationFields {
    institution: FieldSelector,
    degree: FieldSelector,
    duration: FieldSelector,
}

impl EducationFields {
    pub(super) fn compile(rules: &EducationRules) -> anyhow::Result<Section<Self>> {
        let fields = Self {
            institution: FieldSelector::compile(&rules.institution, "education institution")?,
            degree: FieldSelector::compile(&rules.degree, "education degree")?,
            duration: FieldSelector::compile(&rules.duration, "education duration")?,
        };
        Section::compile("education", &rules.anchor, &rules.block, fields)
    }
}

impl Extractor {
    pub fn extract_experience(&self, html: &Html) -> Vec<ExperienceEntry> {
        self.experience.entries(html, |fields, block| ExperienceEntry {
            company: fields.company.text_or_sentinel(block),
            duration: fields.duration.text_or_sentinel(block),
            location: fields.location.text_or_sentinel(block),
        })
    }

    pub fn extract_education(&self, html: &Html) -> Vec<EducationEntry> {
        self.education.entries(html, |fields, block| EducationEntry {
            institution: fields.institution.text_or_sentinel(block),
            degree: fields.degree.text_or_sentinel(block),
            duration: fields.duration.text_or_sentinel(block),
        })
    }
}
