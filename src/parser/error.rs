use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed heading, no balanced trailing album group: {heading:?}")]
    MalformedHeading { heading: String },
}
