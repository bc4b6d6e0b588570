// ABOUTME: Re-exports the application constants from plateit-core
// ABOUTME: Storage keys, catalog identifiers, and defaults under `crate::constants`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

pub use plateit_core::constants::{billing, defaults, service_names, storage_keys};
