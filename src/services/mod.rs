pub mod catalog;
pub mod context;
pub mod features;
pub mod platforms;
pub mod providers;
pub mod recommendations;
pub mod recommender;
pub mod similarity;
pub mod vectorizer;

pub use catalog::{build_catalog, MergedCatalog};
pub use context::{load_context, RecommenderContext};
pub use platforms::{aggregate, tally_records};
pub use recommender::{recommend, RECOMMENDATION_LIMIT};
pub use similarity::SimilarityMode;
