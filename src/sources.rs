use crate::models::Source;
use crate::scrapers::Agency;
use anyhow::{bail, Result};
use std::collections::HashSet;

/// Search pages watched by default (rentals around Rennes), in polling order
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new(
            Agency::Afedim.name(),
            "AFEDIM",
            "https://www.afedim.fr/fr/location/annonces/Appartement-Maison-Parking-Garage/Rennes-France/1-5-pieces/surface-0-100-m2/budget-0-90000-euros/rayon-10-km/disponible-/options-/exclusPlafondRess-/Resultats",
            Agency::Afedim,
        ),
        Source::new(
            Agency::Giboire.name(),
            "GIBOIRE",
            "https://www.giboire.com/recherche-location/appartement/?searchBy=default&address%5B%5D=RENNES&address%5B%5D=CHANTEPIE&address%5B%5D=CESSON+SEVIGNE&priceMax=700&nbBedrooms%5B%5D=1&transactionType%5B%5D=Location&searchBy=default",
            Agency::Giboire,
        ),
        Source::new(
            Agency::Foncia.name(),
            "FONCIA",
            "https://fr.foncia.com/location/rennes-35--chantepie-35135--cesson-sevigne-35510/appartement?nbPiece=2--&prix=--700&advanced=",
            Agency::Foncia,
        ),
        Source::new(
            Agency::AgenceDuColombier.name(),
            "AGENCE DU COLOMBIER",
            "https://agenceducolombier.com/annonces/?filter_search_action%5B%5D=louer&filter_search_type%5B%5D=&nb-pieces=&min-chambres=&min-surface=&max-surface=&price_low=0&price_max=6000000&submit=LANCER+MA+RECHERCHE",
            Agency::AgenceDuColombier,
        ),
        Source::new(
            Agency::LaFrancaiseImmobiliere.name(),
            "LA FRANCAISE IMMOBILIERE",
            "https://www.la-francaise-immobiliere.fr/location/?post_types=location&categorie%5B%5D=27&zone%5B%5D=6212&zone%5B%5D=6204&zone%5B%5D=6214&nb_chambres_min=0&nb_chambres_max=&prix_min=0&prix_max=700&submitted=1&o=date-desc&action=load_search_results&wia_6_type=&searchOnMap=0&wia_1_reference=",
            Agency::LaFrancaiseImmobiliere,
        ),
        Source::new(
            Agency::Guenno.name(),
            "GUENNO",
            "https://www.guenno.com/biens/recherche?mandate_type=2&realty_type%5B%5D=1&number_room%5B%5D=2&min_surface=&town=RENNES+35000&price_max=700",
            Agency::Guenno,
        ),
        // La Motte lots are listed on the Kermarrec search page
        Source::new(
            Agency::LaMotte.name(),
            "LA MOTTE",
            "https://www.kermarrec-habitation.fr/location/?post_type=location&false-select=on&99795fbc=&ville%5B%5D=cesson-sevigne-35510&ville%5B%5D=chantepie-35135&ville%5B%5D=rennes-35000&typebien%5B%5D=appartement&budget_max=700&reference=&rayon=0&avec_carte=false&tri=pertinence",
            Agency::LaMotte,
        ),
        Source::new(
            Agency::Kermarrec.name(),
            "KERMARREC",
            "https://www.kermarrec-habitation.fr/location/?post_type=location&false-select=on&99795fbc=&ville%5B%5D=cesson-sevigne-35510&ville%5B%5D=chantepie-35135&ville%5B%5D=rennes-35000&typebien%5B%5D=appartement&budget_max=700&reference=&rayon=0&avec_carte=false&tri=pertinence",
            Agency::Kermarrec,
        ),
        Source::new(
            Agency::Nestenn.name(),
            "NESTENN",
            "https://immobilier-rennes-centre.nestenn.com/?action=listing&prestige=0&meuble=0&transaction=louer&list_ville=35+Rennes%2C35135+Chantepie%2C35510+Cesson-S%C3%A9vign%C3%A9&list_type=Appartement&type=Appartement&prix_max=700&pieces=2",
            Agency::Nestenn,
        ),
    ]
}

/// Source names partition the dedup store and must not collide
pub fn validate(sources: &[Source]) -> Result<()> {
    let mut names = HashSet::new();
    for source in sources {
        if source.name.trim().is_empty() {
            bail!("Source with search URL {} has an empty name", source.search_url);
        }
        if !names.insert(source.name.as_str()) {
            bail!("Duplicate source name: {}", source.name);
        }
    }
    Ok(())
}
