/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_lg_floor() {
    assert_eq!(lg_floor(1), 0);
    assert_eq!(lg_floor(2), 1);
    assert_eq!(lg_floor(3), 1);
    assert_eq!(lg_floor(4), 2);
    assert_eq!(lg_floor(5), 2);
    assert_eq!(lg_floor(7), 2);
    assert_eq!(lg_floor(8), 3);
    assert_eq!(lg_floor(9), 3);
    assert_eq!(lg_floor(15), 3);
    assert_eq!(lg_floor(16), 4);
    assert_eq!(lg_floor(17), 4);
}

#[test]
fn test_conservative_height() {
    assert_eq!(conservative_height(0), 0);
    assert_eq!(conservative_height(1), 2);
    assert_eq!(conservative_height(6), 4);
    assert_eq!(conservative_height(7), 6);
    assert_eq!(conservative_height(1_000_000), 38);
}
