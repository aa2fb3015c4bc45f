// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// My ternary expression handler.  While it may seem redundant, it's
/// surprisingly useful when working with small logic tables, such as
/// deciding which cells of the padded grid are sentinels.  Only the
/// chosen branch is evaluated.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
