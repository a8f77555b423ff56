pub mod metric;
pub mod top_k;
