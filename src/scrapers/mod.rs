pub mod agency;
pub mod extract;
pub mod grammar;
pub mod traits;
pub mod types;

pub use agency::Agency;
pub use grammar::LabelGrammar;
pub use traits::ListingExtractor;
