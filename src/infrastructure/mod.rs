pub mod client;
pub mod corpus;
pub mod http;
