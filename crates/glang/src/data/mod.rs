// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

pub mod binders;
pub mod declarations;
pub mod expressions;
pub mod file;
pub mod types;
