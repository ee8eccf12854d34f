//! Splitting the id list into delete batches.

use std::num::NonZeroUsize;

use webling_debtors_api_models::DebtorId;

/// Splits `ids` into consecutive batches of at most `batch_size` ids.
///
/// The batches keep the input order and only the last one may be
/// shorter. An empty input yields no batches.
#[must_use]
pub fn partition(ids: &[DebtorId], batch_size: NonZeroUsize) -> Vec<&[DebtorId]> {
    ids.chunks(batch_size.get()).collect()
}

/// Number of decimal digits needed to print `total`.
#[must_use]
pub const fn digit_width(total: usize) -> usize {
    let mut width = 1;
    let mut rest = total / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}
