use crate::models::Listing;
use crate::scrapers::extract::{discover_links, extract_reference};
use crate::scrapers::grammar::LabelGrammar;
use crate::scrapers::traits::ListingExtractor;
use crate::scrapers::types::{AgencyProfile, DuplicateLinks, LinkRule, MissingAnchor, ReferenceRule};
use scraper::Html;
use serde::{Deserialize, Serialize};

/// Supported agency sites
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Agency {
    Afedim,
    Giboire,
    Foncia,
    AgenceDuColombier,
    LaFrancaiseImmobiliere,
    Guenno,
    LaMotte,
    Kermarrec,
    Nestenn,
}

impl Agency {
    pub const ALL: [Agency; 9] = [
        Agency::Afedim,
        Agency::Giboire,
        Agency::Foncia,
        Agency::AgenceDuColombier,
        Agency::LaFrancaiseImmobiliere,
        Agency::Guenno,
        Agency::LaMotte,
        Agency::Kermarrec,
        Agency::Nestenn,
    ];

    pub fn profile(&self) -> &'static AgencyProfile {
        match self {
            Agency::Afedim => &AFEDIM,
            Agency::Giboire => &GIBOIRE,
            Agency::Foncia => &FONCIA,
            Agency::AgenceDuColombier => &AGENCE_DU_COLOMBIER,
            Agency::LaFrancaiseImmobiliere => &LA_FRANCAISE_IMMOBILIERE,
            Agency::Guenno => &GUENNO,
            Agency::LaMotte => &LA_MOTTE,
            Agency::Kermarrec => &KERMARREC,
            Agency::Nestenn => &NESTENN,
        }
    }

    pub fn name(&self) -> &'static str {
        self.profile().name
    }
}

impl ListingExtractor for Agency {
    fn discover_detail_links(&self, document: &Html) -> Vec<String> {
        discover_links(self.profile(), document)
    }

    fn extract_listing(&self, document: &Html, page_url: &str) -> Option<Listing> {
        extract_reference(self.profile(), document, page_url)
    }
}

static AFEDIM: AgencyProfile = AgencyProfile {
    name: "Afedim",
    origin: "https://www.afedim.fr",
    links: LinkRule {
        // The id contains ':' and '.', an attribute selector avoids escaping
        container: r#"[id="C:blocRecherche.blocRechercheDesk.P.C:U"]"#,
        item: "li.item",
        anchor: "div div div:last-child span a",
        duplicates: DuplicateLinks::Keep,
        missing_anchor: MissingAnchor::Warn,
    },
    reference: ReferenceRule {
        scope: None,
        node: "span[class*='note']",
        contains: None,
        grammar: LabelGrammar::Token("Référence du bien :"),
    },
};

static GIBOIRE: AgencyProfile = AgencyProfile {
    name: "Giboire",
    origin: "https://www.giboire.com",
    links: LinkRule {
        container: ".result-grid_wrap",
        item: "article",
        anchor: "div:nth-child(2) h2 a",
        duplicates: DuplicateLinks::Keep,
        missing_anchor: MissingAnchor::Warn,
    },
    reference: ReferenceRule {
        scope: None,
        node: "p.presentation-bien_exclu_desc_ref",
        contains: None,
        grammar: LabelGrammar::Token("Réf :"),
    },
};

// Foncia cards nest `div:nth-child(2)` elements, the same link shows up more than once
static FONCIA: AgencyProfile = AgencyProfile {
    name: "Foncia",
    origin: "https://fr.foncia.com",
    links: LinkRule {
        container: "div.p-col-12.mosaic-list.large.ng-star-inserted",
        item: "div:nth-child(2)",
        anchor: "a",
        duplicates: DuplicateLinks::Remove,
        missing_anchor: MissingAnchor::Ignore,
    },
    reference: ReferenceRule {
        scope: None,
        node: "p.section-reference",
        contains: None,
        grammar: LabelGrammar::Token("Réf."),
    },
};

static AGENCE_DU_COLOMBIER: AgencyProfile = AgencyProfile {
    name: "Agence du Colombier",
    origin: "https://agenceducolombier.com",
    links: LinkRule {
        container: "div#listing_ajax_container",
        item: "div.listing_wrapper",
        anchor: "a",
        duplicates: DuplicateLinks::Keep,
        missing_anchor: MissingAnchor::Warn,
    },
    reference: ReferenceRule {
        scope: Some("div.wpestate_estate_property_design_intext_details"),
        node: "p",
        contains: Some("REF:"),
        grammar: LabelGrammar::Token("REF:"),
    },
};

static LA_FRANCAISE_IMMOBILIERE: AgencyProfile = AgencyProfile {
    name: "La Française Immobilière",
    origin: "https://www.la-francaise-immobiliere.fr",
    links: LinkRule {
        container: "div#liste_annonces",
        item: "div.row > article",
        anchor: "a[rel='bookmark']",
        duplicates: DuplicateLinks::Keep,
        missing_anchor: MissingAnchor::Warn,
    },
    reference: ReferenceRule {
        scope: None,
        node: "p.ref.d-inline",
        contains: None,
        grammar: LabelGrammar::Token("Réf :"),
    },
};

static GUENNO: AgencyProfile = AgencyProfile {
    name: "Guenno",
    origin: "https://www.guenno.com",
    links: LinkRule {
        container: "div.section-content",
        item: "article",
        anchor: "a",
        duplicates: DuplicateLinks::Keep,
        missing_anchor: MissingAnchor::Warn,
    },
    reference: ReferenceRule {
        scope: Some("div#realty_area.realty_details"),
        node: "span.grey-ref",
        contains: None,
        grammar: LabelGrammar::Remainder("Ref :"),
    },
};

static LA_MOTTE: AgencyProfile = AgencyProfile {
    name: "La Motte",
    origin: "https://www.kermarrec-habitation.fr",
    links: LinkRule {
        container: "div#result",
        item: "div.bien__wrapper--annonce",
        anchor: "a",
        duplicates: DuplicateLinks::Keep,
        missing_anchor: MissingAnchor::Warn,
    },
    reference: ReferenceRule {
        scope: Some("div.heading__delivery"),
        node: "p.tva",
        contains: None,
        grammar: LabelGrammar::Remainder("Lot"),
    },
};

static KERMARREC: AgencyProfile = AgencyProfile {
    name: "Kermarrec",
    origin: "https://www.kermarrec-habitation.fr",
    links: LinkRule {
        container: "div#primary.content-area.listofposts.grid",
        item: "article",
        anchor: "div.panel div.entry-content a",
        duplicates: DuplicateLinks::Keep,
        missing_anchor: MissingAnchor::Warn,
    },
    reference: ReferenceRule {
        scope: Some("header.container.entry-header"),
        node: "span.ref",
        contains: None,
        grammar: LabelGrammar::Enclosed {
            prefix: "(ref :",
            suffix: ")",
        },
    },
};

static NESTENN: AgencyProfile = AgencyProfile {
    name: "Nestenn",
    origin: "https://immobilier-rennes-centre.nestenn.com",
    links: LinkRule {
        container: "div#gridPropertyOnlyWidening",
        item: "div.relative.grid_map_container",
        anchor: "a",
        duplicates: DuplicateLinks::Keep,
        missing_anchor: MissingAnchor::Warn,
    },
    reference: ReferenceRule {
        scope: None,
        node: "div.property_ref",
        contains: None,
        grammar: LabelGrammar::After("Réf :"),
    },
};
