//! Shared test helpers.

#![allow(dead_code)]

use embedserve::infrastructure::corpus::memory::InMemoryLoader;
use embedserve::EmbedServe;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// The three-vector store used throughout: a=[1,0], b=[0,1], c=[1,1].
pub fn setup() -> EmbedServe {
    setup_with(vec![
        ("a", vec![1.0, 0.0]),
        ("b", vec![0.0, 1.0]),
        ("c", vec![1.0, 1.0]),
    ])
}

pub fn setup_with(entries: Vec<(&str, Vec<f32>)>) -> EmbedServe {
    EmbedServe::with_loader(Arc::new(InMemoryLoader::new(entries))).unwrap()
}

pub fn write_embedding(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
