use crate::domain::error::DomainError;

/// Immutable collection of equal-length vectors, each paired with the
/// identifier it was loaded from.
///
/// Rows live in one contiguous row-major buffer; row `i` is
/// `data[i * dimension..(i + 1) * dimension]` and is named by
/// `identifiers[i]`. Nothing mutates a store once `build` returns, so it can
/// be shared across request handlers behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingStore {
    dimension: usize,
    data: Vec<f32>,
    identifiers: Vec<String>,
    rejected: Vec<String>,
}

impl EmbeddingStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a store from parallel sequences of vectors and identifiers.
    ///
    /// The first non-empty vector fixes the dimension. Any later vector of a
    /// different length is left out and its identifier recorded in
    /// `rejected()`; the rest of the batch still loads.
    pub fn build(vectors: Vec<Vec<f32>>, identifiers: Vec<String>) -> Result<Self, DomainError> {
        if vectors.len() != identifiers.len() {
            return Err(DomainError::InvalidArgument(format!(
                "{} vectors but {} identifiers",
                vectors.len(),
                identifiers.len()
            )));
        }

        let mut dimension = 0usize;
        let mut data = Vec::new();
        let mut kept = Vec::with_capacity(identifiers.len());
        let mut rejected = Vec::new();

        for (vector, identifier) in vectors.into_iter().zip(identifiers) {
            if dimension == 0 && !vector.is_empty() {
                dimension = vector.len();
                data.reserve(dimension * kept.capacity());
            }
            if vector.is_empty() || vector.len() != dimension {
                rejected.push(identifier);
                continue;
            }
            data.extend_from_slice(&vector);
            kept.push(identifier);
        }

        Ok(Self {
            dimension,
            data,
            identifiers: kept,
            rejected,
        })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let (identifiers, vectors): (Vec<String>, Vec<Vec<f32>>) =
            pairs.into_iter().map(|(id, v)| (id.into(), v)).unzip();
        Self::build(vectors, identifiers)
    }

    /// Feature length shared by every row; `0` when the store is empty.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.len() {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.data[start..start + self.dimension])
    }

    pub fn identifier(&self, index: usize) -> Option<&str> {
        self.identifiers.get(index).map(String::as_str)
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// The whole row-major buffer, `len() * dimension()` values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Identifiers of entries left out because their length disagreed with
    /// the store's dimension.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> + '_ {
        (0..self.len()).filter_map(move |i| Some((self.identifier(i)?, self.row(i)?)))
    }
}
