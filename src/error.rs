/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use alloc::collections::TryReserveError;
use core::fmt;

/// Returned by [`RedBlackTree::insert()`](crate::RedBlackTree::insert) when no storage could be
/// obtained for the new node.  The tree is left exactly as it was and the payload is handed back.
pub struct InsertError<T> {
    value: T,
    source: TryReserveError,
}

impl<T> InsertError<T> {
    pub(crate) fn new(value: T, source: TryReserveError) -> InsertError<T> {
        InsertError { value, source }
    }

    /// Returns the payload that could not be inserted.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }
}

// Manual impl so that `T` does not need to be `Debug`.
impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError").field("source", &self.source).finish_non_exhaustive()
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to allocate a tree node: {}", self.source)
    }
}

impl<T> core::error::Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    fn reserve_error() -> TryReserveError {
        let mut v: Vec<u64> = Vec::new();

        v.try_reserve(usize::MAX).unwrap_err()
    }

    #[test]
    fn test_into_value() {
        let error = InsertError::new("payload", reserve_error());

        assert_eq!(*error.value(), "payload");
        assert_eq!(error.into_value(), "payload");
    }

    #[test]
    fn test_display_and_source() {
        use core::error::Error;

        let error = InsertError::new(3, reserve_error());

        assert!(format!("{}", error).starts_with("failed to allocate a tree node: "));
        assert!(error.source().is_some());
        assert!(format!("{:?}", error).starts_with("InsertError"));
    }
}
