//! Remote search gateway implementations.

pub mod github_gateway;

pub use github_gateway::GithubSearchGateway;
