pub mod corpus_loader;
