//! Create, edit and account flows against the fake API.

use super::*;
use crate::draft::PetitionDraft;
use crate::errors::{user_message, FormKind, ValidationError};
use crate::flows::{
    self, create_petition, EditSession, PictureChange, ProfileForm, RegisterForm, Rollback, Step,
    StepOutcome,
};
use crate::routes::{guard, Route};
use crate::session::{MemoryStorage, SessionStorage, TOKEN_KEY, USER_ID_KEY};

fn river_draft() -> PetitionDraft {
    let mut draft = PetitionDraft::new();
    draft.title = "Clean the river".to_string();
    draft.description = "Remove the rubbish from the river".to_string();
    draft.category_id = Some(3);
    draft.set_tier_title(0, "Supporter").unwrap();
    draft.set_tier_description(0, "Every bit helps").unwrap();
    draft.set_tier_cost(0, "5").unwrap();
    draft
}

fn outcomes(steps: &[crate::flows::StepRecord]) -> Vec<(Step, StepOutcome)> {
    steps
        .iter()
        .map(|r| (r.step.clone(), r.outcome.clone()))
        .collect()
}

#[tokio::test]
async fn test_create_petition_with_image() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);
    fixture.clear_requests();

    let created = create_petition(&fixture.api, &ada, &river_draft(), Some(&png()))
        .await
        .unwrap();

    assert_eq!(created.petition_id, 4);
    assert_eq!(created.next_route(), Route::Petition(4));
    assert_eq!(
        fixture.writes(),
        vec!["POST /petitions", "PUT /petitions/4/image"]
    );
    assert_eq!(
        outcomes(&created.steps),
        vec![
            (Step::CreatePetition, StepOutcome::Done),
            (Step::UploadImage, StepOutcome::Done),
        ]
    );
    let details = fixture.api.get_petition(4).await.unwrap();
    assert_eq!(details.support_tiers[0].description, "Every bit helps");
    assert!(fixture.api.get_petition_image(4).await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_without_image_deletes_petition() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);
    fixture.clear_requests();

    let err = create_petition(&fixture.api, &ada, &river_draft(), None)
        .await
        .unwrap_err();

    assert_eq!(err.step, Step::UploadImage);
    assert_eq!(err.rollback, Rollback::Completed);
    assert_eq!(
        err.user_message(FormKind::CreatePetition).as_deref(),
        Some("Hero Image is required")
    );
    assert_eq!(
        fixture.writes(),
        vec!["POST /petitions", "DELETE /petitions/4"]
    );
    assert!(!fixture.petition_exists(4));
}

#[tokio::test]
async fn test_create_image_failure_deletes_petition() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);
    lock(&fixture.state).fail.petition_image = true;

    let err = create_petition(&fixture.api, &ada, &river_draft(), Some(&png()))
        .await
        .unwrap_err();

    assert_eq!(err.step, Step::UploadImage);
    assert_eq!(err.cause.status(), Some(500));
    assert_eq!(err.rollback, Rollback::Completed);
    assert!(!fixture.petition_exists(4));
}

#[tokio::test]
async fn test_create_with_zero_tiers_sends_nothing() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let mut details = fixture.api.get_petition(GARDEN).await.unwrap();
    details.title = "Tierless".to_string();
    details.support_tiers.clear();
    let draft = PetitionDraft::from_details(&details, &Default::default());
    fixture.clear_requests();

    let err = create_petition(&fixture.api, &ada, &draft, Some(&png()))
        .await
        .unwrap_err();

    assert_eq!(err.step, Step::Validate);
    assert!(matches!(
        err.cause,
        ClientError::Validation(ValidationError::NoTiers)
    ));
    assert_eq!(err.rollback, Rollback::NotNeeded);
    assert!(fixture.requests().is_empty());
}

#[tokio::test]
async fn test_create_duplicate_title_needs_no_rollback() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let mut draft = river_draft();
    draft.title = "Protect the kiwi".to_string();
    let err = create_petition(&fixture.api, &ada, &draft, Some(&png()))
        .await
        .unwrap_err();

    assert_eq!(err.step, Step::CreatePetition);
    assert_eq!(err.rollback, Rollback::NotNeeded);
    assert_eq!(
        err.user_message(FormKind::CreatePetition).as_deref(),
        Some("Petition title already exists, please choose a different one")
    );
}

#[tokio::test]
async fn test_edit_load_redirects() {
    let fixture = TestFixture::new().await;
    let grace = fixture.login_as(GRACE);
    let ada = fixture.login_as(ADA);

    let redirect = EditSession::load(&fixture.api, None, WETLANDS).await.unwrap_err();
    assert_eq!(redirect, Route::Petition(WETLANDS));

    let redirect = EditSession::load(&fixture.api, Some(&grace), WETLANDS)
        .await
        .unwrap_err();
    assert_eq!(redirect, Route::Petition(WETLANDS));

    let redirect = EditSession::load(&fixture.api, Some(&ada), 999)
        .await
        .unwrap_err();
    assert_eq!(redirect, Route::Explore);
}

#[tokio::test]
async fn test_edit_locks_supported_tier() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let mut edit = EditSession::load(&fixture.api, Some(&ada), WETLANDS)
        .await
        .unwrap();
    assert_eq!(edit.original_tier_ids(), vec![1, 2, 3]);
    assert!(edit.draft.tiers()[0].has_support);
    assert_eq!(
        edit.draft.set_tier_title(0, "Renamed"),
        Err(ValidationError::TierLocked(1))
    );
    assert_eq!(edit.draft.remove_tier(0), Err(ValidationError::TierLocked(1)));
}

#[tokio::test]
async fn test_edit_replaces_a_tier() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let mut edit = EditSession::load(&fixture.api, Some(&ada), WETLANDS)
        .await
        .unwrap();
    edit.draft.remove_tier(1).unwrap();
    let i = edit.draft.add_tier().unwrap();
    edit.draft.set_tier_title(i, "Platinum").unwrap();
    edit.draft.set_tier_description(i, "The works").unwrap();
    edit.draft.set_tier_cost(i, "40").unwrap();
    fixture.clear_requests();

    let saved = edit.save(&fixture.api, &ada, None).await.unwrap();

    // Bronze is supported and never touched
    assert_eq!(
        fixture.writes(),
        vec![
            "PATCH /petitions/1",
            "DELETE /petitions/1/supportTiers/2",
            "PATCH /petitions/1/supportTiers/3",
            "PUT /petitions/1/supportTiers",
        ]
    );
    assert_eq!(fixture.tier_titles(WETLANDS), vec!["Bronze", "Gold", "Platinum"]);
    assert!(!saved.image_failed());
    assert_eq!(saved.steps[0].outcome, StepOutcome::Skipped);
    assert_eq!(saved.next_route(), Route::Petition(WETLANDS));
}

#[tokio::test]
async fn test_edit_renames_a_tier_into_a_removed_title() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let mut edit = EditSession::load(&fixture.api, Some(&ada), WETLANDS)
        .await
        .unwrap();
    edit.draft.remove_tier(1).unwrap();
    edit.draft.set_tier_title(1, "Silver").unwrap();
    fixture.clear_requests();

    edit.save(&fixture.api, &ada, None).await.unwrap();

    assert_eq!(
        fixture.writes(),
        vec![
            "PATCH /petitions/1",
            "DELETE /petitions/1/supportTiers/2",
            "PATCH /petitions/1/supportTiers/3",
        ]
    );
    assert_eq!(fixture.tier_titles(WETLANDS), vec!["Bronze", "Silver"]);
}

#[tokio::test]
async fn test_fake_refuses_a_duplicate_tier_title() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);
    let request = crate::models::TierRequest {
        title: "silver".to_string(),
        description: "Clash".to_string(),
        cost: 30,
    };

    let err = fixture
        .api
        .update_tier(&ada.token, WETLANDS, 3, &request)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(fixture.tier_titles(WETLANDS), vec!["Bronze", "Silver", "Gold"]);
}

#[tokio::test]
async fn test_edit_tier_failure_rolls_back() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let mut edit = EditSession::load(&fixture.api, Some(&ada), WETLANDS)
        .await
        .unwrap();
    edit.draft.title = "Save the marshes".to_string();
    edit.draft.set_tier_cost(2, "35").unwrap();
    edit.draft.remove_tier(1).unwrap();
    let i = edit.draft.add_tier().unwrap();
    edit.draft.set_tier_title(i, "Platinum").unwrap();
    edit.draft.set_tier_description(i, "The works").unwrap();
    edit.draft.set_tier_cost(i, "40").unwrap();
    lock(&fixture.state).fail.tier_create = true;

    let err = edit.save(&fixture.api, &ada, None).await.unwrap_err();

    assert_eq!(err.step, Step::CreateTier("Platinum".to_string()));
    assert_eq!(err.rollback, Rollback::Completed);

    let details = fixture.api.get_petition(WETLANDS).await.unwrap();
    assert_eq!(details.title, "Save the wetlands");
    let mut titles = fixture.tier_titles(WETLANDS);
    titles.sort();
    assert_eq!(titles, vec!["Bronze", "Gold", "Silver"]);
    let gold = details
        .support_tiers
        .iter()
        .find(|t| t.title == "Gold")
        .unwrap();
    assert_eq!(gold.cost, 30);
}

#[tokio::test]
async fn test_edit_image_failure_is_best_effort() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let mut edit = EditSession::load(&fixture.api, Some(&ada), GARDEN)
        .await
        .unwrap();
    edit.draft.title = "Community orchard".to_string();
    lock(&fixture.state).fail.petition_image = true;

    let saved = edit.save(&fixture.api, &ada, Some(&png())).await.unwrap();

    assert!(saved.image_failed());
    let details = fixture.api.get_petition(GARDEN).await.unwrap();
    assert_eq!(details.title, "Community orchard");
}

#[tokio::test]
async fn test_edit_rollback_restores_replaced_image() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);
    fixture
        .api
        .put_petition_image(&ada.token, GARDEN, &gif())
        .await
        .unwrap();

    let edit = EditSession::load(&fixture.api, Some(&ada), GARDEN)
        .await
        .unwrap();
    assert_eq!(edit.existing_image, Some(gif()));
    lock(&fixture.state).fail.patch_petition = true;

    let err = edit.save(&fixture.api, &ada, Some(&png())).await.unwrap_err();

    assert_eq!(err.step, Step::PatchPetition);
    assert_eq!(err.rollback, Rollback::Completed);
    let image = fixture.api.get_petition_image(GARDEN).await.unwrap();
    assert_eq!(image, Some(gif()));
}

#[tokio::test]
async fn test_login_then_logout_clears_session() {
    let fixture = TestFixture::new().await;
    let mut session = Session::restore(MemoryStorage::new()).await.unwrap();

    let route = flows::login(&fixture.api, &mut session, "ada@example.com", "password1")
        .await
        .unwrap();
    assert_eq!(route, Route::Explore);
    assert!(session.is_user(ADA));
    assert!(session.storage().load(TOKEN_KEY).await.unwrap().is_some());
    assert_eq!(
        session.storage().load(USER_ID_KEY).await.unwrap().as_deref(),
        Some("\"1\"")
    );
    assert_eq!(guard(Route::MyPetitions, session.credentials()), Route::MyPetitions);

    let token = session.credentials().unwrap().token.clone();
    flows::logout(&fixture.api, &mut session).await.unwrap();

    assert!(!session.is_authenticated());
    assert_eq!(session.storage().load(TOKEN_KEY).await.unwrap(), None);
    assert_eq!(session.storage().load(USER_ID_KEY).await.unwrap(), None);
    assert!(!lock(&fixture.state).tokens.contains_key(&token));
    assert_eq!(guard(Route::MyPetitions, session.credentials()), Route::Login);
    assert_eq!(guard(Route::CreatePetition, session.credentials()), Route::Login);
}

#[tokio::test]
async fn test_login_rejections() {
    let fixture = TestFixture::new().await;
    let mut session = Session::restore(MemoryStorage::new()).await.unwrap();

    let err = flows::login(&fixture.api, &mut session, "ada@example.com", "wrongpass")
        .await
        .unwrap_err();
    assert_eq!(
        user_message(FormKind::Login, &err).as_deref(),
        Some("Incorrect email or password")
    );
    assert!(!session.is_authenticated());

    fixture.clear_requests();
    let err = flows::login(&fixture.api, &mut session, "ada.example.com", "password1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Validation(ValidationError::EmailFormat)
    ));
    assert!(fixture.requests().is_empty());
}

#[tokio::test]
async fn test_logout_keeps_session_on_server_error() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);
    let mut session = Session::restore(MemoryStorage::new()).await.unwrap();
    session.login(ada).await.unwrap();
    lock(&fixture.state).fail.logout = true;

    assert!(flows::logout(&fixture.api, &mut session).await.is_err());
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_logout_with_stale_token_clears_session() {
    let fixture = TestFixture::new().await;
    let mut session = Session::restore(MemoryStorage::new()).await.unwrap();
    session
        .login(Credentials {
            user_id: ADA,
            token: "expired".to_string(),
        })
        .await
        .unwrap();

    let route = flows::logout(&fixture.api, &mut session).await.unwrap();
    assert_eq!(route, Route::Explore);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_register_logs_in_and_uploads_picture() {
    let fixture = TestFixture::new().await;
    let mut session = Session::restore(MemoryStorage::new()).await.unwrap();
    let form = RegisterForm {
        first_name: "Katherine".to_string(),
        last_name: "Johnson".to_string(),
        email: "katherine@example.com".to_string(),
        password: "orbital".to_string(),
    };
    let picture = Image::new(ImageSubject::ProfilePicture, "image/jpeg", vec![0xFF, 0xD8]).unwrap();

    let route = flows::register(&fixture.api, &mut session, &form, Some(&picture))
        .await
        .unwrap();

    assert_eq!(route, Route::Explore);
    assert!(session.is_user(4));
    assert!(lock(&fixture.state).user_images.contains_key(&4));
}

#[tokio::test]
async fn test_register_email_in_use() {
    let fixture = TestFixture::new().await;
    let mut session = Session::restore(MemoryStorage::new()).await.unwrap();
    let form = RegisterForm {
        first_name: "Ada".to_string(),
        last_name: "Again".to_string(),
        email: "ada@example.com".to_string(),
        password: "password9".to_string(),
    };

    let err = flows::register(&fixture.api, &mut session, &form, None)
        .await
        .unwrap_err();
    assert_eq!(
        user_message(FormKind::Register, &err).as_deref(),
        Some("Email already in use")
    );
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_update_profile_password_change() {
    let fixture = TestFixture::new().await;
    let ada = fixture.login_as(ADA);

    let profile = flows::load_profile(&fixture.api, &ada).await.unwrap();
    assert!(!profile.has_picture);
    let mut form: ProfileForm = profile.form();
    form.first_name = "Augusta".to_string();
    form.current_password = "not-my-password".to_string();
    form.new_password = "analytical".to_string();

    let err = flows::update_profile(&fixture.api, &ada, &form, &PictureChange::Keep)
        .await
        .unwrap_err();
    assert_eq!(
        user_message(FormKind::EditProfile, &err).as_deref(),
        Some("Your current password is incorrect")
    );

    form.current_password = "password1".to_string();
    let saved = flows::update_profile(&fixture.api, &ada, &form, &PictureChange::Remove)
        .await
        .unwrap();
    // Nothing to remove counts as done
    assert_eq!(saved.picture, StepOutcome::Done);

    let user = fixture.api.get_user(Some(&ada.token), ADA).await.unwrap();
    assert_eq!(user.first_name, "Augusta");

    let mut session = Session::restore(MemoryStorage::new()).await.unwrap();
    flows::login(&fixture.api, &mut session, "ada@example.com", "analytical")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_profile_replaces_picture() {
    let fixture = TestFixture::new().await;
    let alan = fixture.login_as(ALAN);
    let form = flows::load_profile(&fixture.api, &alan).await.unwrap().form();

    let saved = flows::update_profile(&fixture.api, &alan, &form, &PictureChange::Replace(png()))
        .await
        .unwrap();

    assert_eq!(saved.picture, StepOutcome::Done);
    assert!(flows::load_profile(&fixture.api, &alan).await.unwrap().has_picture);
    let requests = fixture.writes();
    assert_eq!(requests, vec!["PATCH /users/3", "PUT /users/3/image"]);
}
