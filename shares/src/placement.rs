//! Non-interactive default rules for placing blobs in a square.
//!
//! Every node must derive the same index for every blob without coordination. Blobs start at a
//! multiple of their subtree width (or at the start of a row), so the roots of the subtrees that
//! make up a blob's share commitment can be found in the row roots of the square.

use std::num::NonZeroUsize;

/// Returns the smallest power of two greater than or equal to `input` (1 for 0).
pub fn round_up_power_of_two(input: usize) -> usize {
    input.max(1).next_power_of_two()
}

/// Returns the width of the smallest square (with a power of two width) that holds
/// `share_count` shares.
pub fn blob_min_square_size(share_count: usize) -> usize {
    let mut width = 1usize;
    while width * width < share_count {
        width <<= 1;
    }
    width
}

/// Rounds `cursor` up to the next multiple of `multiple`.
pub fn round_up_by_multiple_of(cursor: usize, multiple: usize) -> usize {
    if multiple == 0 || cursor % multiple == 0 {
        return cursor;
    }
    (cursor / multiple + 1) * multiple
}

/// Returns the width of the subtrees a blob of `share_count` shares is aligned to.
///
/// The width is the number of shares per subtree root needed to keep the commitment under
/// `threshold` roots, rounded up to a power of two and capped by [blob_min_square_size].
pub fn sub_tree_width(share_count: usize, threshold: NonZeroUsize) -> usize {
    let width = round_up_power_of_two(share_count.div_ceil(threshold.get()));
    width.min(blob_min_square_size(share_count))
}

/// Returns the index at which a blob of `blob_share_len` shares starts when the next free share
/// is `cursor`.
///
/// A cursor at the start of a row is returned as is. Otherwise the cursor is rounded up to the
/// subtree width of the blob, unless not even one subtree of the blob fits in the rest of the
/// row, in which case the blob starts on the next row.
pub fn next_share_index(
    cursor: usize,
    blob_share_len: usize,
    square_size: usize,
    threshold: NonZeroUsize,
) -> usize {
    if square_size == 0 || cursor % square_size == 0 {
        return cursor;
    }
    let tree_width = sub_tree_width(blob_share_len, threshold);
    let index = round_up_by_multiple_of(cursor, tree_width);
    let next_row = round_up_by_multiple_of(cursor, square_size);

    // The blob fits in the current row.
    if index + blob_share_len <= next_row {
        return index;
    }

    // The first subtree fits in the current row and the blob spills into the next.
    if index + tree_width <= next_row {
        return index;
    }
    next_row
}

/// Returns the number of shares used by blobs of `blob_share_lens` shares, placed in order
/// starting at `cursor`, and the index at which each starts.
///
/// The count includes the namespace padding between blobs but not the padding before the first.
pub fn blob_shares_used_non_interactive_defaults(
    cursor: usize,
    square_size: usize,
    threshold: NonZeroUsize,
    blob_share_lens: &[usize],
) -> (usize, Vec<usize>) {
    let start = cursor;
    let mut cursor = cursor;
    let mut indexes = Vec::with_capacity(blob_share_lens.len());
    for len in blob_share_lens {
        cursor = next_share_index(cursor, *len, square_size, threshold);
        indexes.push(cursor);
        cursor += len;
    }
    (cursor - start, indexes)
}

/// Returns whether blobs of `blob_share_lens` shares fit in a square of width `square_size`
/// when the next free share is `cursor`, along with the number of shares they use.
///
/// With no blobs, returns whether `cursor` itself is within the square.
pub fn fits_in_square(
    cursor: usize,
    square_size: usize,
    threshold: NonZeroUsize,
    blob_share_lens: &[usize],
) -> (bool, usize) {
    let capacity = square_size * square_size;
    let Some(first) = blob_share_lens.first() else {
        return (cursor <= capacity, 0);
    };

    // Account for the padding between the compact shares and the first blob.
    let cursor = next_share_index(cursor, *first, square_size, threshold);
    let (used, _) =
        blob_shares_used_non_interactive_defaults(cursor, square_size, threshold, blob_share_lens);
    (cursor + used <= capacity, used)
}
