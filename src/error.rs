use std::path::PathBuf;

use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From, strum_macros::AsRefStr)]
pub enum Error {
	Error { message: String },

	// -- Input errors.
	FileNotFound(PathBuf),
	ArtifactNotFound(PathBuf),
	MalformedArtifact { path: PathBuf, message: String },
	UndecodableImage { path: PathBuf, message: String },

	// -- Credential errors.
	MissingCredential(String),

	// -- Remote service errors.
	RemoteService { endpoint: String, message: String },
	ComparisonCall { first: usize, second: usize, message: String },

	// -- Annotation errors.
	StaleReference { number: usize, faces: usize },
	Viewer(String),

	// -- Externals

	#[from]
	Io(std::io::Error),

	#[from]
	Serde(serde_json::Error),

	#[from]
	Reqwest(reqwest::Error),

	#[from]
	Image(image::ImageError),
}

/// Coarse classification used to decide whether a failure aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	Input,
	Credential,
	RemoteService,
	ComparisonCall,
	StaleReference,
	Internal,
}

impl ErrorKind {
	pub fn is_fatal(&self) -> bool {
		!matches!(self, ErrorKind::ComparisonCall | ErrorKind::StaleReference)
	}
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::FileNotFound(_)
			| Self::ArtifactNotFound(_)
			| Self::MalformedArtifact { .. }
			| Self::UndecodableImage { .. }
			| Self::Image(_) => ErrorKind::Input,

			Self::MissingCredential(_) => ErrorKind::Credential,

			Self::RemoteService { .. } | Self::Reqwest(_) => ErrorKind::RemoteService,
			Self::ComparisonCall { .. } => ErrorKind::ComparisonCall,
			Self::StaleReference { .. } => ErrorKind::StaleReference,

			Self::Error { .. } | Self::Viewer(_) | Self::Io(_) | Self::Serde(_) => ErrorKind::Internal,
		}
	}

	/// Process exit status for an error that reached the top of a binary.
	pub fn exit_code(&self) -> u8 {
		if self.kind().is_fatal() { 1 } else { 0 }
	}

	pub fn remote(endpoint: &str, message: impl Into<String>) -> Self {
		Self::RemoteService { endpoint: endpoint.to_string(), message: message.into() }
	}
}

// region:    --- Error Boilerplate
impl core::fmt::Display for Error {
	fn fmt(
		&self,
		fmt: &mut core::fmt::Formatter,
	) -> core::result::Result<(), core::fmt::Error> {
		match self {
			Self::Error { message } => write!(fmt, "{message}"),
			Self::FileNotFound(path) => write!(fmt, "file not found: {}", path.display()),
			Self::ArtifactNotFound(path) => write!(fmt, "{} file not found", path.display()),
			Self::MalformedArtifact { path, message } => write!(fmt, "malformed artifact {}: {message}", path.display()),
			Self::UndecodableImage { path, message } => write!(fmt, "could not decode image {}: {message}", path.display()),
			Self::MissingCredential(name) => write!(fmt, "API credentials not found: {name} is not set"),
			Self::RemoteService { endpoint, message } => write!(fmt, "{endpoint} call failed: {message}"),
			Self::ComparisonCall { first, second, message } => write!(fmt, "error comparing faces {first} and {second}: {message}"),
			Self::StaleReference { number, faces } => write!(fmt, "face {number} is not part of the {faces} detected faces"),
			_ => write!(fmt, "{self:?}"),
		}
	}
}

impl std::error::Error for Error {}
// endregion: --- Error Boilerplate

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_per_pair_and_stale_errors_are_recoverable() {
		let compare = Error::ComparisonCall { first: 1, second: 2, message: "timeout".into() };
		let stale = Error::StaleReference { number: 5, faces: 3 };
		assert!(!compare.kind().is_fatal());
		assert!(!stale.kind().is_fatal());

		assert!(Error::FileNotFound(PathBuf::from("nope.jpg")).kind().is_fatal());
		assert!(Error::MissingCredential("FACEPP_API_KEY".into()).kind().is_fatal());
		assert_eq!(Error::remote("detect", "boom").kind(), ErrorKind::RemoteService);
	}

	#[test]
	fn exit_code_follows_kind() {
		assert_eq!(Error::ArtifactNotFound(PathBuf::from("face_tokens.json")).exit_code(), 1);
		assert_eq!(Error::remote("facepp/v3/detect", "503").exit_code(), 1);
		assert_eq!(Error::Viewer("no display".into()).exit_code(), 1);
		assert_eq!(Error::StaleReference { number: 4, faces: 2 }.exit_code(), 0);
	}

	#[test]
	fn io_errors_convert() {
		let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
		assert_eq!(err.as_ref(), "Io");
	}
}
