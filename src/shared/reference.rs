use uuid::Uuid;

/// Outcome of following a weak id reference through a lookup.
///
/// `Dangling` means the id was present but nothing answers to it any more,
/// which callers must be able to tell apart from "no relation at all"
/// (that case is `Option::<Reference<T>>::None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference<T> {
    Resolved(T),
    Dangling(Uuid),
}

impl<T> Reference<T> {
    pub fn from_lookup(id: Uuid, found: Option<T>) -> Self {
        match found {
            Some(value) => Reference::Resolved(value),
            None => Reference::Dangling(id),
        }
    }

    pub fn is_dangling(&self) -> bool {
        matches!(self, Reference::Dangling(_))
    }
}
