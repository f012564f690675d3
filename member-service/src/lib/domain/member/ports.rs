use async_trait::async_trait;

use crate::domain::member::models::AuthenticatedMember;
use crate::domain::member::models::IdentityContext;
use crate::domain::member::models::LoginCommand;
use crate::domain::member::models::Member;
use crate::domain::member::models::MemberId;
use crate::domain::member::models::PhotoUpload;
use crate::domain::member::models::RegisterCommand;
use crate::domain::member::models::Username;
use crate::domain::member::photos::Photo;
use crate::domain::member::photos::PhotoId;
use crate::member::errors::MemberError;
use crate::member::errors::PhotoStoreError;

/// Port for member domain service operations.
#[async_trait]
pub trait MemberServicePort: Send + Sync + 'static {
    /// Register a new member and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username and password
    ///
    /// # Returns
    /// Normalized username plus a signed session token
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `Credential` / `Token` - Credential derivation or signing failed
    /// * `Database` - Persistence failed; nothing was created
    async fn register(&self, command: RegisterCommand)
        -> Result<AuthenticatedMember, MemberError>;

    /// Authenticate an existing member and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Username and password to verify
    ///
    /// # Returns
    /// Username, session token, and the main photo URL when one is selected
    ///
    /// # Errors
    /// * `UnknownUsername` - No member with this username
    /// * `InvalidPassword` - Password does not match
    /// * `Database` - Lookup failed
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedMember, MemberError>;

    /// Retrieve a member by unique username.
    ///
    /// # Errors
    /// * `UnknownUsername` - No member with this username
    /// * `Database` - Lookup failed
    async fn get_member(&self, username: &Username) -> Result<Member, MemberError>;

    /// Retrieve all members.
    ///
    /// # Errors
    /// * `Database` - Lookup failed
    async fn list_members(&self) -> Result<Vec<Member>, MemberError>;

    /// Upload a photo into the caller's gallery.
    ///
    /// The upload to blob storage completes before the gallery mutation is
    /// persisted. The first photo in an empty gallery becomes the main photo.
    ///
    /// # Arguments
    /// * `identity` - Authenticated caller
    /// * `upload` - File contents to store
    ///
    /// # Returns
    /// The created photo
    ///
    /// # Errors
    /// * `NotFound` - Caller's member record is missing
    /// * `Storage` - Blob upload failed; nothing was added
    /// * `Conflict` / `Database` - Persistence failed; nothing was added
    async fn add_photo(
        &self,
        identity: &IdentityContext,
        upload: PhotoUpload,
    ) -> Result<Photo, MemberError>;

    /// Select a photo in the caller's gallery as the main photo.
    ///
    /// # Errors
    /// * `NotFound` - Caller's member record is missing
    /// * `Photo(NotFound)` - No photo with this ID
    /// * `Photo(AlreadyMain)` - Photo is already the main photo
    /// * `Conflict` / `Database` - Persistence failed; selection unchanged
    async fn set_main_photo(
        &self,
        identity: &IdentityContext,
        photo_id: &PhotoId,
    ) -> Result<(), MemberError>;

    /// Delete a photo from the caller's gallery.
    ///
    /// When the photo references blob storage, the external object is deleted
    /// first; a failed external deletion leaves the photo in the gallery.
    ///
    /// # Errors
    /// * `NotFound` - Caller's member record is missing
    /// * `Photo(NotFound)` - No photo with this ID
    /// * `Photo(CannotDeleteMain)` - Photo is the main photo
    /// * `Storage` - External deletion failed; photo retained
    /// * `Conflict` / `Database` - Persistence failed; photo retained
    async fn delete_photo(
        &self,
        identity: &IdentityContext,
        photo_id: &PhotoId,
    ) -> Result<(), MemberError>;
}

/// Persistence operations for the member aggregate.
///
/// A member is loaded and saved whole, photos included. `update` is the
/// save-all-or-fail step: it matches on the version the member was loaded at
/// and fails with `Conflict` when the stored record moved on, serializing
/// check-then-act sequences per member without cross-member locking.
#[async_trait]
pub trait MemberRepository: Send + Sync + 'static {
    /// Persist a new member.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `Database` - Database operation failed
    async fn create(&self, member: Member) -> Result<Member, MemberError>;

    /// Retrieve a member by identifier.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, MemberError>;

    /// Retrieve a member by normalized username.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<Member>, MemberError>;

    /// Retrieve all members.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Member>, MemberError>;

    /// Save a loaded member, photos included, bumping its version.
    ///
    /// # Returns
    /// The saved member at its new version
    ///
    /// # Errors
    /// * `Conflict` - Stored version no longer matches; nothing was written
    /// * `Database` - Database operation failed
    async fn update(&self, member: Member) -> Result<Member, MemberError>;
}

/// A stored blob object: its public URL and the storage-side reference used
/// for later deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    pub url: String,
    pub external_id: String,
}

/// External blob storage for photo files.
#[async_trait]
pub trait PhotoStore: Send + Sync + 'static {
    /// Upload file contents, returning the public URL and storage reference.
    ///
    /// # Errors
    /// * `Upload` - Storage rejected or failed the upload
    async fn upload(&self, upload: PhotoUpload) -> Result<StoredPhoto, PhotoStoreError>;

    /// Delete a stored object.
    ///
    /// Deleting an object that no longer exists succeeds, so a retried
    /// gallery deletion converges instead of failing forever.
    ///
    /// # Errors
    /// * `Delete` - Storage failed the deletion
    async fn delete(&self, external_id: &str) -> Result<(), PhotoStoreError>;
}
