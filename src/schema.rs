use serde::{Deserialize, Serialize};

/// Top card of a profile page. Exactly one per scraped page.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Profile {
    pub name: String,
    pub location: String,
    pub connections: String,
    pub headline: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub duration: String,
    pub location: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub duration: String,
}

/// Everything extracted from one profile page. Entries keep document order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub profile: Profile,
    pub experiences: Vec<ExperienceEntry>,
    pub educations: Vec<EducationEntry>,
}
