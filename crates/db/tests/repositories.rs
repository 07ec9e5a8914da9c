//! Postgres repository and trigger tests.
//!
//! These need a live database (`DATABASE_URL`); run them with
//! `cargo test -p folio-db -- --ignored`.

use folio_core::catalog::Collection;
use folio_core::site_content::SitePage;
use folio_core::variants::ProjectImage;
use folio_db::models::project::{CreateProject, UpdateProject};
use folio_db::models::review::CreateReview;
use folio_db::models::user::CreateEmailUser;
use folio_db::repositories::{ProjectRepo, ReviewRepo};
use folio_db::{ContentStore, IdentityStore, PgContentStore, PgIdentityStore, StoreError};
use sqlx::postgres::PgListener;
use sqlx::PgPool;

fn knight() -> CreateProject {
    CreateProject {
        title: "Knight".into(),
        description: "Low-poly knight".into(),
        image_url: "https://cdn.test/knight.png".into(),
        images: vec![ProjectImage {
            url: "https://cdn.test/knight.png".into(),
            color: "#ff0000".into(),
            name: "Red".into(),
        }],
        category: "Characters".into(),
        tags: vec!["low-poly".into(), "rigged".into()],
        order_index: 1,
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn project_round_trip_keeps_images_and_tags(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &knight()).await.unwrap();
    let found = ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("project should exist");

    assert_eq!(found.images.len(), 1);
    assert_eq!(found.images[0].name, "Red");
    assert_eq!(found.tags, vec!["low-poly", "rigged"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn project_update_leaves_absent_fields(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &knight()).await.unwrap();
    let patch = UpdateProject {
        title: Some("Paladin".into()),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&pool, created.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Paladin");
    assert_eq!(updated.description, "Low-poly knight");
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn unknown_category_is_rejected_by_the_schema(pool: PgPool) {
    let mut input = knight();
    input.category = "Buildings".into();
    assert!(ProjectRepo::create(&pool, &input).await.is_err());
}

// ---------------------------------------------------------------------------
// Reviews and site content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn approved_list_excludes_hidden_reviews(pool: PgPool) {
    let input = CreateReview {
        user_id: None,
        name: "Mika".into(),
        rating: 5,
        review_text: "Great topology".into(),
        discord_username: None,
        discord_avatar: None,
    };
    ReviewRepo::create(&pool, &input, true).await.unwrap();
    ReviewRepo::create(&pool, &input, false).await.unwrap();

    assert_eq!(ReviewRepo::list_approved(&pool).await.unwrap().len(), 1);
    assert_eq!(ReviewRepo::list_all(&pool).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn site_content_upsert_is_unique_per_section(pool: PgPool) {
    let store = PgContentStore::new(pool);
    let page = SitePage::Home;
    store
        .upsert_site_content(page, "hero", &serde_json::json!({"name": "A"}))
        .await
        .unwrap();
    store
        .upsert_site_content(page, "hero", &serde_json::json!({"name": "B"}))
        .await
        .unwrap();

    let content = store.get_site_content(page).await.unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content["hero"]["name"], "B");
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn duplicate_email_maps_to_conflict(pool: PgPool) {
    let store = PgIdentityStore::new(pool);
    let input = CreateEmailUser {
        email: "mika@site.test".into(),
        password_hash: "hash".into(),
    };
    store.create_email_user(&input).await.unwrap();
    let err = store.create_email_user(&input).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

// ---------------------------------------------------------------------------
// Change notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn writes_notify_the_content_channel(pool: PgPool) {
    let mut listener = PgListener::connect_with(&pool).await.unwrap();
    listener.listen("content_changes").await.unwrap();

    ProjectRepo::create(&pool, &knight()).await.unwrap();

    let notification = listener.recv().await.unwrap();
    assert_eq!(
        notification.payload(),
        format!("{}:insert", Collection::Projects)
    );
}
