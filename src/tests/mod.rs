//! Integration tests for the petition client.
//!
//! Each test drives the real [`ApiClient`] over HTTP against a fresh
//! in-process fake of the petition API.

mod flows;

use std::sync::{Arc, Mutex};

use reqwest::Client;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{Image, ImageSubject, PetitionId, UserId};
use crate::search::{PetitionQuery, SortDirection, SortKey, SortOrder};
use crate::session::{Credentials, Session};

use fake_api::{lock, FakeState, Shared};

const ADA: UserId = 1;
const GRACE: UserId = 2;
const ALAN: UserId = 3;
/// Ada's petition with tiers 1..=3; tier 1 is supported by Grace
const WETLANDS: PetitionId = 1;
const GARDEN: PetitionId = 2;
const KIWI: PetitionId = 3;

/// Test fixture for integration tests.
struct TestFixture {
    api: ApiClient,
    state: Shared,
}

impl TestFixture {
    async fn new() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState::seeded()));
        let app = fake_api::router(state.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = ApiClient::with_client(Client::new(), &format!("http://{}", addr));
        TestFixture { api, state }
    }

    /// Credentials for a seeded user without going through login.
    fn login_as(&self, user_id: UserId) -> Credentials {
        let token = lock(&self.state).issue_token(user_id);
        Credentials { user_id, token }
    }

    fn requests(&self) -> Vec<String> {
        lock(&self.state).requests.clone()
    }

    fn clear_requests(&self) {
        lock(&self.state).requests.clear();
    }

    /// Requests other than GETs.
    fn writes(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| !r.starts_with("GET "))
            .collect()
    }

    fn petition_exists(&self, id: PetitionId) -> bool {
        lock(&self.state).petition(id).is_some()
    }

    fn tier_titles(&self, id: PetitionId) -> Vec<String> {
        lock(&self.state)
            .petition(id)
            .map(|p| p.tiers.iter().map(|t| t.title.clone()).collect())
            .unwrap_or_default()
    }
}

fn png() -> Image {
    Image::new(ImageSubject::HeroImage, "image/png", vec![0x89, b'P', b'N', b'G']).unwrap()
}

fn gif() -> Image {
    Image::new(ImageSubject::HeroImage, "image/gif", b"GIF89a".to_vec()).unwrap()
}

#[tokio::test]
async fn test_search_all_and_count() {
    let fixture = TestFixture::new().await;

    let result = fixture
        .api
        .search_petitions(&PetitionQuery::new())
        .await
        .unwrap();
    assert_eq!(result.count, 3);
    assert_eq!(result.petitions[0].petition_id, WETLANDS);
    assert_eq!(result.petitions[0].supporting_cost, 10);
    assert_eq!(result.petitions[0].number_of_supporters, 1);
}

#[tokio::test]
async fn test_search_filters_and_sort() {
    let fixture = TestFixture::new().await;

    let mut query = PetitionQuery::in_category(1);
    query.sort = Some(SortOrder::new(SortKey::Alphabetical, SortDirection::Descending));
    let result = fixture.api.search_petitions(&query).await.unwrap();
    let ids: Vec<PetitionId> = result.petitions.iter().map(|p| p.petition_id).collect();
    assert_eq!(ids, vec![WETLANDS, KIWI]);

    let query = PetitionQuery {
        category_ids: vec![1, 2],
        supporting_cost: Some(10),
        ..PetitionQuery::default()
    };
    let result = fixture.api.search_petitions(&query).await.unwrap();
    let ids: Vec<PetitionId> = result.petitions.iter().map(|p| p.petition_id).collect();
    assert_eq!(ids, vec![WETLANDS, GARDEN]);

    let query = PetitionQuery {
        q: Some("KIWI".to_string()),
        ..PetitionQuery::default()
    };
    let result = fixture.api.search_petitions(&query).await.unwrap();
    assert_eq!(result.count, 1);
}

#[tokio::test]
async fn test_search_by_owner_and_supporter() {
    let fixture = TestFixture::new().await;

    let owned = fixture
        .api
        .search_petitions(&PetitionQuery::owned_by(ADA))
        .await
        .unwrap();
    assert_eq!(owned.count, 2);

    let supported = fixture
        .api
        .search_petitions(&PetitionQuery::supported_by(GRACE))
        .await
        .unwrap();
    assert_eq!(supported.petitions.len(), 1);
    assert_eq!(supported.petitions[0].petition_id, WETLANDS);
}

#[tokio::test]
async fn test_get_petition_reads_null_money_as_zero() {
    let fixture = TestFixture::new().await;

    let garden = fixture.api.get_petition(GARDEN).await.unwrap();
    assert_eq!(garden.money_raised, 0);
    assert_eq!(garden.support_tiers.len(), 1);

    let wetlands = fixture.api.get_petition(WETLANDS).await.unwrap();
    assert_eq!(wetlands.money_raised, 10);
}

#[tokio::test]
async fn test_not_found_is_rejected() {
    let fixture = TestFixture::new().await;

    let err = fixture.api.get_petition(999).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.error_code(), crate::errors::codes::REJECTED);
}

#[tokio::test]
async fn test_rejection_carries_status_text() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let err = fixture.api.delete_petition(&ada.token, WETLANDS).await.unwrap_err();
    match err {
        ClientError::Rejected {
            status,
            status_text,
        } => {
            assert_eq!(status, 403);
            assert!(status_text.contains("one or more supporters"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_auth_header_is_required() {
    let fixture = TestFixture::new().await;

    let err = fixture.api.delete_petition("bogus", GARDEN).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(fixture.petition_exists(GARDEN));
}

#[tokio::test]
async fn test_categories() {
    let fixture = TestFixture::new().await;

    let categories = fixture.api.list_categories().await.unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(crate::models::category_name(&categories, 2), Some("Community"));
}

#[tokio::test]
async fn test_petition_image_round_trip() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    assert_eq!(fixture.api.get_petition_image(GARDEN).await.unwrap(), None);

    fixture
        .api
        .put_petition_image(&ada.token, GARDEN, &gif())
        .await
        .unwrap();
    let image = fixture.api.get_petition_image(GARDEN).await.unwrap().unwrap();
    assert_eq!(image, gif());

    assert!(fixture
        .api
        .petition_image_url(GARDEN)
        .ends_with("/petitions/2/image"));
}

#[tokio::test]
async fn test_user_image_delete() {
    let fixture = TestFixture::new().await;
    let alan = fixture.login_as(ALAN);

    fixture
        .api
        .put_user_image(&alan.token, ALAN, &png())
        .await
        .unwrap();
    assert!(fixture.api.get_user_image(ALAN).await.unwrap().is_some());

    fixture.api.delete_user_image(&alan.token, ALAN).await.unwrap();
    assert!(fixture.api.get_user_image(ALAN).await.unwrap().is_none());

    let err = fixture
        .api
        .delete_user_image(&alan.token, ALAN)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_user_email_only_for_self() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let me = fixture.api.get_user(Some(&ada.token), ADA).await.unwrap();
    assert_eq!(me.email.as_deref(), Some("ada@example.com"));

    let other = fixture.api.get_user(Some(&ada.token), GRACE).await.unwrap();
    assert_eq!(other.email, None);
    assert_eq!(other.first_name, "Grace");
}
