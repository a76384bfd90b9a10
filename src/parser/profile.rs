use scraper::Html;

use crate::{schema::Profile, selector_table::ProfileRules};

use super::{Extractor, FieldSelector};

pub(super) struct ProfileSelectors {
    name: FieldSelector,
    location: FieldSelector,
    connections: FieldSelector,
    headline: FieldSelector,
}

impl ProfileSelectors {
    pub(super) fn compile(rules: &ProfileRules) -> anyhow::Result<Self> {
        Ok(Self {
            name: FieldSelector::compile(&rules.name, "profile name")?,
            location: FieldSelector::compile(&rules.location, "profile location")?,
            connections: FieldSelector::compile(&rules.connections, "profile connections")?,
            headline: FieldSelector::compile(&rules.headline, "profile headline")?,
        })
    }
}

impl Extractor {
    pub fn extract_profile_info(&self, html: &Html) -> Profile {
        Profile {
            name: self.extract_name(html),
            location: self.extract_location_info(html),
            connections: self.extract_connections(html),
            headline: self.extract_headline(html),
        }
    }

    pub fn extract_name(&self, html: &Html) -> String {
        self.profile.name.text_or_sentinel(html.root_element())
    }

    pub fn extract_location_info(&self, html: &Html) -> String {
        self.profile.location.text_or_sentinel(html.root_element())
    }

    /// The connection count as displayed, e.g. `500+`.
    pub fn extract_connections(&self, html: &Html) -> String {
        self.profile.connections.text_or_sentinel(html.root_element())
    }

    pub fn extract_headline(&self, html: &Html) -> String {
        self.profile.headline.text_or_sentinel(html.root_element())
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use crate::parser::Extractor;

    fn extractor() -> Extractor {
        Extractor::with_default_selectors().unwrap()
    }

    #[test]
    fn name_from_heading() {
        let html = Html::parse_document(
            r#"<h1 class="text-heading-xlarge inline t-24 v-align-middle break-words">
                 Jane Doe
               </h1>"#,
        );
        assert_eq!(extractor().extract_name(&html), "Jane Doe");
    }

    #[test]
    fn name_without_heading() {
        let html = Html::parse_document(r#"<h1 class="text-heading-large">Jane Doe</h1>"#);
        assert_eq!(extractor().extract_name(&html), "N/A");
    }

    #[test]
    fn first_match_wins() {
        let html = Html::parse_document(
            r#"<span class="t-bold">500+</span><span class="t-bold">12 followers</span>"#,
        );
        assert_eq!(extractor().extract_connections(&html), "500+");
    }

    #[test]
    fn location_needs_exact_class_list() {
        let extractor = extractor();
        let partial = Html::parse_document(
            r#"<span class="text-body-small inline t-black--light">Berlin</span>"#,
        );
        assert_eq!(extractor.extract_location_info(&partial), "No Location Found");

        let exact = Html::parse_document(
            r#"<span class="text-body-small inline t-black--light break-words">Berlin</span>"#,
        );
        assert_eq!(extractor.extract_location_info(&exact), "Berlin");

        let spaced = Html::parse_document(
            "<span class=\" text-body-small\tinline\n t-black--light  break-words \">Berlin</span>",
        );
        assert_eq!(extractor.extract_location_info(&spaced), "Berlin");
    }

    #[test]
    fn headline_drops_inner_markup() {
        let html = Html::parse_document(
            r#"<div class="text-body-medium break-words">
                 Engineer <!-- --> at <b>Acme</b>
               </div>"#,
        );
        assert_eq!(extractor().extract_headline(&html), "EngineeratAcme");
    }

    #[test]
    fn missing_fields_use_their_own_sentinels() {
        let profile = extractor().extract_profile_info(&Html::parse_document(
            r#"<h1 class="text-heading-xlarge">Jane Doe</h1>"#,
        ));
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.location, "No Location Found");
        assert_eq!(profile.connections, "No Connections Found");
        assert_eq!(profile.headline, "No Headline Found");
    }
}
