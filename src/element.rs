use std::{fmt::Debug, hash::Hash};

use num_traits::PrimInt;

use crate::error::RangeError;

///An integer type objects can be spelled with. Implemented for every primitive integer.
pub trait Element: PrimInt + Debug + Hash + Send + Sync + 'static {}

impl<T: PrimInt + Debug + Hash + Send + Sync + 'static> Element for T {}

///Checks that `T` can hold every value up to `max`.
pub(crate) fn check_fits<T: Element>(max: usize) -> Result<(), RangeError> {
    match T::from(max) {
        Some(_) => Ok(()),
        None => {
            let type_name = std::any::type_name::<T>();
            tracing::debug!(max, type_name, "element type too narrow");
            Err(RangeError::ElementOverflow {
                value: max,
                type_name,
            })
        }
    }
}

///Converts a value that [`check_fits`] already accepted for the family.
#[inline]
pub(crate) fn cast<T: Element>(value: usize) -> T {
    T::from(value).expect("value was checked against the element type at construction")
}

///Reads back an element the crate wrote itself.
#[inline]
pub(crate) fn uncast<T: Element>(value: T) -> usize {
    value
        .to_usize()
        .expect("objects only hold values written by their family")
}

///Reads a caller-supplied element as an index. Negative elements map to `None`.
#[inline]
pub(crate) fn index<T: Element>(value: T) -> Option<usize> {
    value.to_usize()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn narrow_types_are_rejected() {
        assert!(check_fits::<u8>(255).is_ok());
        assert_eq!(
            check_fits::<u8>(256),
            Err(RangeError::ElementOverflow {
                value: 256,
                type_name: "u8"
            })
        );
        assert!(check_fits::<i8>(128).is_err());
        assert_eq!(index(-1i32), None);
        assert_eq!(index(7u16), Some(7));
    }
}
