use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;

use crate::domain::member::models::AuthenticatedMember;
use crate::domain::member::models::IdentityContext;
use crate::domain::member::models::LoginCommand;
use crate::domain::member::models::Member;
use crate::domain::member::models::PhotoUpload;
use crate::domain::member::models::RegisterCommand;
use crate::domain::member::models::Username;
use crate::domain::member::photos::Photo;
use crate::domain::member::photos::PhotoId;
use crate::member::errors::MemberError;
use crate::member::ports::MemberRepository;
use crate::member::ports::MemberServicePort;
use crate::member::ports::PhotoStore;

/// Domain service implementation for member operations.
///
/// Stateless orchestration over the repository and blob-store collaborators;
/// per-member serialization of photo mutations comes from the repository's
/// versioned save, not from locks held here.
pub struct MemberService<MR, PS>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    repository: Arc<MR>,
    photo_store: Arc<PS>,
    authenticator: Arc<Authenticator>,
    token_expiration_days: i64,
}

impl<MR, PS> MemberService<MR, PS>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    /// Create a new member service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Member persistence implementation
    /// * `photo_store` - Photo blob storage implementation
    /// * `authenticator` - Credential and token coordinator
    /// * `token_expiration_days` - Session token validity window
    pub fn new(
        repository: Arc<MR>,
        photo_store: Arc<PS>,
        authenticator: Arc<Authenticator>,
        token_expiration_days: i64,
    ) -> Self {
        Self {
            repository,
            photo_store,
            authenticator,
            token_expiration_days,
        }
    }

    async fn load(&self, identity: &IdentityContext) -> Result<Member, MemberError> {
        self.repository
            .find_by_id(&identity.member_id)
            .await?
            .ok_or(MemberError::NotFound(identity.member_id.to_string()))
    }

    fn claims_for(&self, member: &Member) -> Claims {
        Claims::for_member(
            member.id,
            member.username.as_str().to_string(),
            self.token_expiration_days,
        )
    }
}

#[async_trait]
impl<MR, PS> MemberServicePort for MemberService<MR, PS>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedMember, MemberError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(MemberError::UsernameTaken(command.username.to_string()));
        }

        // Hash the password using the auth library
        let credential = self
            .authenticator
            .create_credential(&command.password)
            .map_err(|e| MemberError::Credential(e.to_string()))?;

        let member = Member::new(command.username, credential);

        // The unique constraint backstops the lookup above; a lost race
        // surfaces as UsernameTaken from the repository
        let member = self.repository.create(member).await?;

        let token = self
            .authenticator
            .issue_token(&self.claims_for(&member))
            .map_err(|e| MemberError::Token(e.to_string()))?;

        Ok(AuthenticatedMember {
            username: member.username.to_string(),
            token,
            main_photo_url: None,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedMember, MemberError> {
        let member = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or(MemberError::UnknownUsername(command.username.to_string()))?;

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &member.password_hash,
                &member.password_salt,
                &self.claims_for(&member),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => MemberError::InvalidPassword,
                AuthenticationError::CredentialError(err) => {
                    MemberError::Credential(err.to_string())
                }
                AuthenticationError::TokenError(err) => MemberError::Token(err.to_string()),
            })?;

        Ok(AuthenticatedMember {
            username: member.username.to_string(),
            token: result.access_token,
            main_photo_url: member.photos.main_url().map(String::from),
        })
    }

    async fn get_member(&self, username: &Username) -> Result<Member, MemberError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(MemberError::UnknownUsername(username.to_string()))
    }

    async fn list_members(&self) -> Result<Vec<Member>, MemberError> {
        self.repository.list_all().await
    }

    async fn add_photo(
        &self,
        identity: &IdentityContext,
        upload: PhotoUpload,
    ) -> Result<Photo, MemberError> {
        let mut member = self.load(identity).await?;

        // The blob upload runs to completion before the gallery changes, so a
        // failed upload leaves nothing to roll back
        let stored = self.photo_store.upload(upload).await?;

        let photo = member
            .photos
            .add(stored.url, Some(stored.external_id))
            .clone();

        self.repository.update(member).await?;

        Ok(photo)
    }

    async fn set_main_photo(
        &self,
        identity: &IdentityContext,
        photo_id: &PhotoId,
    ) -> Result<(), MemberError> {
        let mut member = self.load(identity).await?;

        member.photos.set_main(photo_id)?;

        self.repository.update(member).await?;

        Ok(())
    }

    async fn delete_photo(
        &self,
        identity: &IdentityContext,
        photo_id: &PhotoId,
    ) -> Result<(), MemberError> {
        let mut member = self.load(identity).await?;

        // Invariant checks run before the external call; a rejected delete
        // never touches blob storage
        let photo = member.photos.remove(photo_id)?;

        // The external object goes first and must be gone before the local
        // removal commits. A failure here aborts with the stored gallery
        // unchanged; only the in-memory copy mutated.
        if let Some(external_id) = &photo.external_id {
            self.photo_store.delete(external_id).await?;
        }

        if let Err(e) = self.repository.update(member).await {
            // The external object is already gone; the store treats a missing
            // object as deleted, so retrying the whole operation converges
            tracing::warn!(
                photo_id = %photo_id,
                member_id = %identity.member_id,
                error = %e,
                "Photo removal not persisted after external deletion"
            );
            return Err(e);
        }

        Ok(())
    }
}
