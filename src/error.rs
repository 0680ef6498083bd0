use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("declared body length {declared} exceeds the {limit} byte limit")]
    BodyTooLarge { declared: usize, limit: usize },
}
