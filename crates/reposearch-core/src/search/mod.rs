//! Remote repository search: result models and the gateway seam.

pub mod gateway;
pub mod model;

pub use gateway::SearchGateway;
pub use model::{
    FIRST_PAGE, NO_DESCRIPTION_PLACEHOLDER, PageLink, RepositoryOwner, ResultItem, ResultPage,
    SearchResponse,
};
