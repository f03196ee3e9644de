use crate::{Discrete, Result, RlError};

/// Fails with [`RlError::IndexOutOfRange`] unless `index < bound`.
pub fn check_index(what: &'static str, index: Discrete, bound: usize) -> Result<Discrete> {
    if index < bound {
        Ok(index)
    } else {
        Err(RlError::IndexOutOfRange { what, index, bound })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("context", 0, 3)]
    #[case("context", 2, 3)]
    #[case("action", 0, 1)]
    fn test_check_index_in_range(
        #[case] what: &'static str,
        #[case] index: Discrete,
        #[case] bound: usize,
    ) {
        assert_eq!(check_index(what, index, bound).unwrap(), index);
    }

    #[rstest]
    #[case("action", 3, 3, "action index 3 out of range [0, 3)")]
    #[case("state", 10, 4, "state index 10 out of range [0, 4)")]
    #[case("next_state", 0, 0, "next_state index 0 out of range [0, 0)")]
    fn test_check_index_out_of_range(
        #[case] what: &'static str,
        #[case] index: Discrete,
        #[case] bound: usize,
        #[case] message: &str,
    ) {
        let err = check_index(what, index, bound).unwrap_err();

        assert!(matches!(err, RlError::IndexOutOfRange { .. }));
        assert_eq!(err.to_string(), message);
    }
}
