use crate::scrapers::grammar::LabelGrammar;

/// What to do when the same detail URL shows up twice on one results page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateLinks {
    Keep,
    /// Keep the first occurrence only
    Remove,
}

/// How to report a repeating element that carries no usable link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingAnchor {
    Warn,
    /// The item selector also matches wrappers that never hold a link
    Ignore,
}

/// Where detail links live on a search results page
#[derive(Debug, Clone, Copy)]
pub struct LinkRule {
    /// Element wrapping the whole result list
    pub container: &'static str,
    /// Repeating element, one per ad, searched inside the container
    pub item: &'static str,
    /// Anchor inside the item; the first match is used
    pub anchor: &'static str,
    pub duplicates: DuplicateLinks,
    pub missing_anchor: MissingAnchor,
}

/// Where the reference lives on a detail page and how to read it
#[derive(Debug, Clone, Copy)]
pub struct ReferenceRule {
    /// Optional element the node is searched in
    pub scope: Option<&'static str>,
    pub node: &'static str,
    /// Only nodes whose text contains this marker are considered
    pub contains: Option<&'static str>,
    pub grammar: LabelGrammar,
}

/// Everything hardcoded about one agency site
#[derive(Debug, Clone, Copy)]
pub struct AgencyProfile {
    pub name: &'static str,
    /// Base for resolving relative hrefs
    pub origin: &'static str,
    pub links: LinkRule,
    pub reference: ReferenceRule,
}
