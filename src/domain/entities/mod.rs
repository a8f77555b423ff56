pub mod embedding_store;
pub mod query_result;
