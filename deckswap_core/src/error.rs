// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time errors.
//!
//! Runtime triggers never fail; they report an outcome value instead. Only
//! building content that could never be displayed is rejected.

use alloc::string::String;

/// Invalid content handed to a [`ContentRotator`](crate::rotator::ContentRotator).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// A group was built without any display items.
    #[error("content group `{id}` has no display items")]
    EmptyGroup {
        /// Id of the offending group.
        id: String,
    },
    /// A rotator was built without any groups.
    #[error("content rotator needs at least one group")]
    NoGroups,
}
