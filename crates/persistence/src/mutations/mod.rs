// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Multi-row writes run inside a single transaction so that a record, its
//! history and its documents never diverge.

pub mod accounts;
pub mod applications;
