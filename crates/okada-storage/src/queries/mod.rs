// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per record family.

pub mod orders;
pub mod riders;
pub mod sessions;
