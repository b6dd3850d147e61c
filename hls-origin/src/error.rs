#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
	/// No segment is currently retained, or the requested stream is unknown.
	#[error("not found")]
	NotFound,

	/// The container metadata carries no codec descriptor.
	#[error("missing codec")]
	MissingCodec,

	/// The container carries no initialization segment.
	#[error("missing init segment")]
	MissingInit,

	#[error("invalid container: {0}")]
	InvalidContainer(String),
}

pub type Result<T> = std::result::Result<T, Error>;
