// Copyright 2025 The pacer authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod cancellation_token;
pub mod error;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{PacerError, Result};
