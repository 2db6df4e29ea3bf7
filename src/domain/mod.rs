// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with no dependencies beyond `std`.
//!
//! # Modules
//!
//! - [`diagnostics`]: [`BufferCapacity`](diagnostics::BufferCapacity)
//! - [`status`]: [`HistoryCapacity`](status::HistoryCapacity),
//!   [`QueueCapacity`](status::QueueCapacity), [`DisplayDuration`](status::DisplayDuration)

pub mod diagnostics;
pub mod status;
