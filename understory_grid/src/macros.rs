// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "tracing")]
macro_rules! gtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "understory_grid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! gtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! gdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "understory_grid", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! gdebug {
    ($($tt:tt)*) => {};
}
