/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use core::mem::size_of;

pub fn lg_floor(size: usize) -> usize {
    debug_assert!(size > 0);

    let c: usize = 8 * size_of::<usize>() - size.leading_zeros() as usize;

    c - 1
}

/// Expected depth of a red-black tree holding `size` elements, used to size path stacks.  The
/// true bound is `2·log₂(size + 1)`; stacks grow past this estimate when needed.
pub fn conservative_height(size: usize) -> usize {
    if size > 0 {
        2 * lg_floor(size + 1)
    } else {
        0
    }
}

#[cfg(test)]
mod test;
