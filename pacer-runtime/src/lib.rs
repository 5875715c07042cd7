// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod impls;
pub mod scheduler;

pub use self::scheduler::{Callback, Scheduler};
