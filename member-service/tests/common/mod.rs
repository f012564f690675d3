use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use member_service::domain::member::models::Member;
use member_service::domain::member::models::MemberId;
use member_service::domain::member::models::PhotoUpload;
use member_service::domain::member::models::Username;
use member_service::domain::member::service::MemberService;
use member_service::inbound::http::router::create_router;
use member_service::member::errors::MemberError;
use member_service::member::errors::PhotoStoreError;
use member_service::member::ports::MemberRepository;
use member_service::member::ports::PhotoStore;
use member_service::member::ports::StoredPhoto;

pub const JWT_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

/// In-memory member repository with the same versioned-save contract as the
/// Postgres adapter.
pub struct InMemoryMemberRepository {
    members: Mutex<HashMap<MemberId, Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn create(&self, member: Member) -> Result<Member, MemberError> {
        let mut members = self.members.lock().unwrap();

        if members.values().any(|m| m.username == member.username) {
            return Err(MemberError::UsernameTaken(
                member.username.as_str().to_string(),
            ));
        }

        members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, MemberError> {
        let members = self.members.lock().unwrap();
        Ok(members.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<Member>, MemberError> {
        let members = self.members.lock().unwrap();
        Ok(members.values().find(|m| m.username == *username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Member>, MemberError> {
        let members = self.members.lock().unwrap();
        Ok(members.values().cloned().collect())
    }

    async fn update(&self, member: Member) -> Result<Member, MemberError> {
        let mut members = self.members.lock().unwrap();

        let stored = members
            .get(&member.id)
            .ok_or_else(|| MemberError::Conflict(member.id.to_string()))?;

        if stored.version != member.version {
            return Err(MemberError::Conflict(member.id.to_string()));
        }

        let saved = Member {
            version: member.version + 1,
            ..member
        };
        members.insert(saved.id, saved.clone());
        Ok(saved)
    }
}

/// In-memory photo blob store. Uploads get sequential URLs and references;
/// deletions can be switched to fail to exercise the all-or-nothing delete
/// path.
pub struct InMemoryPhotoStore {
    uploads: AtomicUsize,
    deleted: Mutex<Vec<String>>,
    fail_deletes: AtomicBool,
}

impl InMemoryPhotoStore {
    pub fn new() -> Self {
        Self {
            uploads: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
            fail_deletes: AtomicBool::new(false),
        }
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoStore for InMemoryPhotoStore {
    async fn upload(&self, _upload: PhotoUpload) -> Result<StoredPhoto, PhotoStoreError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(StoredPhoto {
            url: format!("https://photos.test/{}.jpg", n),
            external_id: format!("photo-{}", n),
        })
    }

    async fn delete(&self, external_id: &str) -> Result<(), PhotoStoreError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(PhotoStoreError::Delete("storage offline".to_string()));
        }

        self.deleted.lock().unwrap().push(external_id.to_string());
        Ok(())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub photo_store: Arc<InMemoryPhotoStore>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryMemberRepository::new());
        let photo_store = Arc::new(InMemoryPhotoStore::new());

        let authenticator =
            Arc::new(Authenticator::new(JWT_SECRET).expect("Failed to create authenticator"));

        let member_service = Arc::new(MemberService::new(
            repository,
            Arc::clone(&photo_store),
            Arc::clone(&authenticator),
            7,
        ));

        let router = create_router(member_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            photo_store,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a member and return the session token
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/account/register")
            .json(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }

    /// Upload a small photo and return the created photo data
    pub async fn upload_photo(&self, token: &str) -> serde_json::Value {
        let part = reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .expect("Invalid mime type");
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .api_client
            .post(format!("{}/api/members/photos", self.address))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}
