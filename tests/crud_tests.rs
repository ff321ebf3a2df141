// The generic CRUD contract exercised end-to-end against an in-memory
// database, through the same CrudResource implementations the routers use.

use minhaty::db::create_test_pool;
use minhaty::error::AppError;
use minhaty::models::scholarship::{ScholarshipFilter, ScholarshipPayload};
use minhaty::models::settings::SettingsPayload;
use minhaty::models::taxonomy::TermPayload;
use minhaty::services::catalog_service::{self, ScholarshipResource};
use minhaty::services::resource::{CrudResource, ListParams};
use minhaty::services::taxonomy_service::CountryResource;
use minhaty::services::{settings_service, subscriber_service};

fn term(name: &str, slug: Option<&str>) -> TermPayload {
    TermPayload {
        name: name.into(),
        slug: slug.map(str::to_string),
        description: String::new(),
    }
}

fn scholarship(title: &str, slug: Option<&str>) -> ScholarshipPayload {
    ScholarshipPayload {
        title: title.into(),
        slug: slug.map(str::to_string),
        summary: "ملخص".into(),
        body: String::new(),
        country_id: None,
        level_id: None,
        category_id: None,
        funding: "full".into(),
        deadline: None,
        apply_url: "https://example.org/apply".into(),
        image_url: None,
        featured: false,
        published: true,
    }
}

#[tokio::test]
async fn create_derives_the_slug_from_the_name() {
    let pool = create_test_pool().await.unwrap();
    let created = CountryResource::create(&pool, term("United  Kingdom", None))
        .await
        .unwrap();
    assert_eq!(created.slug, "united-kingdom");

    // Explicit slug wins over derivation.
    let explicit = CountryResource::create(&pool, term("تركيا", Some("turkey")))
        .await
        .unwrap();
    assert_eq!(explicit.slug, "turkey");
}

#[tokio::test]
async fn arabic_only_name_without_slug_is_rejected() {
    let pool = create_test_pool().await.unwrap();
    let err = CountryResource::create(&pool, term("تركيا", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict_not_a_500() {
    let pool = create_test_pool().await.unwrap();
    CountryResource::create(&pool, term("Turkey", None))
        .await
        .unwrap();
    let err = CountryResource::create(&pool, term("Anywhere", Some("turkey")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn list_find_update_delete_round_trip() {
    let pool = create_test_pool().await.unwrap();
    let created = CountryResource::create(&pool, term("Germany", None))
        .await
        .unwrap();

    let mut params = ListParams::new();
    assert_eq!(CountryResource::list(&pool, &params).await.unwrap().len(), 1);

    params.insert("q".into(), "germ".into());
    assert_eq!(CountryResource::list(&pool, &params).await.unwrap().len(), 1);
    params.insert("q".into(), "nomatch".into());
    assert!(CountryResource::list(&pool, &params).await.unwrap().is_empty());

    let updated = CountryResource::update(&pool, created.id, term("Deutschland", None))
        .await
        .unwrap();
    assert_eq!(updated.name, "Deutschland");
    assert_eq!(updated.slug, "deutschland");

    let found = CountryResource::find(&pool, created.id).await.unwrap();
    assert_eq!(found.unwrap().name, "Deutschland");

    assert!(CountryResource::delete(&pool, created.id).await.unwrap());
    assert!(!CountryResource::delete(&pool, created.id).await.unwrap());
    assert!(CountryResource::find(&pool, created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_of_a_missing_row_is_not_found() {
    let pool = create_test_pool().await.unwrap();
    let err = CountryResource::update(&pool, 999, term("Ghost", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_any_insert() {
    let pool = create_test_pool().await.unwrap();
    let err = CountryResource::create(&pool, term("   ", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(CountryResource::list(&pool, &ListParams::new())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn public_listing_honors_filters_and_publication() {
    let pool = create_test_pool().await.unwrap();
    let turkey = CountryResource::create(&pool, term("Turkey", None))
        .await
        .unwrap();

    let mut in_turkey = scholarship("Turkey Government Scholarship", None);
    in_turkey.country_id = Some(turkey.id);
    ScholarshipResource::create(&pool, in_turkey).await.unwrap();

    let mut draft = scholarship("Unpublished Draft", None);
    draft.published = false;
    ScholarshipResource::create(&pool, draft).await.unwrap();

    ScholarshipResource::create(&pool, scholarship("DAAD Masters Grant", None))
        .await
        .unwrap();

    // Drafts never reach the public listing.
    let all = catalog_service::list_published(&pool, &ScholarshipFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    // Country filter by slug.
    let filter = ScholarshipFilter {
        country: Some("turkey".into()),
        ..Default::default()
    };
    let in_country = catalog_service::list_published(&pool, &filter).await.unwrap();
    assert_eq!(in_country.len(), 1);
    assert_eq!(in_country[0].slug, "turkey-government-scholarship");

    // Substring search over title and summary.
    let filter = ScholarshipFilter {
        q: Some("DAAD".into()),
        ..Default::default()
    };
    let hits = catalog_service::list_published(&pool, &filter).await.unwrap();
    assert_eq!(hits.len(), 1);

    // The admin list sees drafts too.
    let admin_view = ScholarshipResource::list(&pool, &ListParams::new())
        .await
        .unwrap();
    assert_eq!(admin_view.len(), 3);
}

#[tokio::test]
async fn featured_home_query_only_returns_published_featured() {
    let pool = create_test_pool().await.unwrap();

    let mut featured = scholarship("Featured One", None);
    featured.featured = true;
    ScholarshipResource::create(&pool, featured).await.unwrap();

    let mut hidden = scholarship("Featured Draft", None);
    hidden.featured = true;
    hidden.published = false;
    ScholarshipResource::create(&pool, hidden).await.unwrap();

    ScholarshipResource::create(&pool, scholarship("Plain", None))
        .await
        .unwrap();

    let featured = catalog_service::featured(&pool, 6).await.unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].title, "Featured One");
}

#[tokio::test]
async fn slug_lookup_only_serves_published_entries() {
    let pool = create_test_pool().await.unwrap();
    let mut draft = scholarship("Hidden", None);
    draft.published = false;
    ScholarshipResource::create(&pool, draft).await.unwrap();

    assert!(catalog_service::find_published_by_slug(&pool, "hidden")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn subscribing_twice_is_idempotent() {
    let pool = create_test_pool().await.unwrap();

    let (first, created) = subscriber_service::subscribe(&pool, "Reader@Example.com")
        .await
        .unwrap();
    assert!(created);
    assert_eq!(first.email, "reader@example.com");

    let (again, created_again) = subscriber_service::subscribe(&pool, "reader@example.com")
        .await
        .unwrap();
    assert!(!created_again);
    assert_eq!(again.id, first.id);

    assert_eq!(subscriber_service::list(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn settings_row_is_seeded_and_updatable() {
    let pool = create_test_pool().await.unwrap();

    let seeded = settings_service::get(&pool).await.unwrap();
    assert_eq!(seeded.id, 1);
    assert!(!seeded.site_name.is_empty());

    let updated = settings_service::update(
        &pool,
        SettingsPayload {
            site_name: "منحتي".into(),
            tagline: "كل المنح في مكان واحد".into(),
            contact_email: "info@example.com".into(),
            facebook_url: Some("https://facebook.com/minhaty".into()),
            twitter_url: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.tagline, "كل المنح في مكان واحد");
    assert_eq!(updated.facebook_url.as_deref(), Some("https://facebook.com/minhaty"));
}
