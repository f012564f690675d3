pub mod errors;
pub mod hasher;

pub use errors::CredentialError;
pub use hasher::Credential;
pub use hasher::CredentialHasher;
