// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries, written once in Diesel DSL and generated per backend.

pub mod accounts;
pub mod applications;

pub use applications::ApplicationFilter;
