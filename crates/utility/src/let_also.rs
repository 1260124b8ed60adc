/// Scoping helpers for chaining expressions without temporary bindings.
pub trait LetAlso: Sized {
    /// Passes `self` by value into `f` and returns its result.
    fn let_owned<R, F: FnOnce(Self) -> R>(self, f: F) -> R {
        f(self)
    }
}

impl<T> LetAlso for T {}

#[cfg(test)]
mod tests {
    use super::LetAlso;

    #[test]
    fn let_owned_maps_value() {
        let len = "DEVX000001".to_owned().let_owned(|s| s.len());
        assert_eq!(len, 10);
    }
}
