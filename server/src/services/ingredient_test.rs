use super::*;
use time::macros::date;

fn new_ingredient(name: &str) -> NewIngredient {
    NewIngredient {
        name: name.into(),
        quantity: 1.0,
        unit: " 개 ".into(),
        purchase_date: None,
        expiry_date: Some(date!(2024 - 06 - 12)),
        location: String::new(),
        category: "  채소 ".into(),
    }
}

// =============================================================================
// validate_new
// =============================================================================

#[test]
fn validate_new_trims_and_fills_defaults() {
    let valid = validate_new(new_ingredient("  양파 ")).unwrap();
    assert_eq!(valid.name, "양파");
    assert_eq!(valid.unit, "개");
    assert_eq!(valid.location, DEFAULT_LOCATION);
    assert_eq!(valid.category, "채소");
    assert_eq!(valid.expiry_date, Some(date!(2024 - 06 - 12)));
}

#[test]
fn validate_new_blank_category_is_default() {
    let mut input = new_ingredient("두부");
    input.category = " ".into();
    assert_eq!(validate_new(input).unwrap().category, DEFAULT_CATEGORY);
}

#[test]
fn validate_new_rejects_blank_name() {
    let err = validate_new(new_ingredient("   ")).unwrap_err();
    assert!(matches!(err, StoreError::Invalid(ref msg) if msg == "name is required"));
}

#[test]
fn validate_new_rejects_negative_quantity() {
    let mut input = new_ingredient("우유");
    input.quantity = -1.0;
    assert!(matches!(validate_new(input), Err(StoreError::Invalid(_))));
}

#[test]
fn validate_new_accepts_zero_quantity() {
    let mut input = new_ingredient("우유");
    input.quantity = 0.0;
    assert!(validate_new(input).is_ok());
}

// =============================================================================
// validate_patch
// =============================================================================

#[test]
fn empty_patch_rejected() {
    assert!(matches!(validate_patch(IngredientPatch::default()), Err(StoreError::Invalid(_))));
}

#[test]
fn patch_name_is_trimmed_and_required() {
    let patch = IngredientPatch { name: Some("  당근 ".into()), ..IngredientPatch::default() };
    assert_eq!(validate_patch(patch).unwrap().name.as_deref(), Some("당근"));

    let blank = IngredientPatch { name: Some("  ".into()), ..IngredientPatch::default() };
    assert!(validate_patch(blank).is_err());
}

#[test]
fn patch_rejects_negative_quantity() {
    let patch = IngredientPatch { quantity: Some(-0.5), ..IngredientPatch::default() };
    assert!(validate_patch(patch).is_err());
}

#[test]
fn patch_with_only_expiry_is_valid() {
    let patch = IngredientPatch { expiry_date: Some(date!(2024 - 07 - 01)), ..IngredientPatch::default() };
    assert!(validate_patch(patch).is_ok());
}

// =============================================================================
// filters and cutoffs
// =============================================================================

#[test]
fn blank_filter_values_are_ignored() {
    let blank = Some("  ".to_owned());
    assert_eq!(IngredientFilter::normalized(blank.as_ref()), None);
    let set = Some(" 채소 ".to_owned());
    assert_eq!(IngredientFilter::normalized(set.as_ref()), Some("채소"));
}

#[test]
fn expiring_cutoff_adds_window() {
    assert_eq!(expiring_cutoff(date!(2024 - 06 - 29), 3), date!(2024 - 07 - 02));
}

#[test]
fn expiring_cutoff_clamps_negative_window() {
    assert_eq!(expiring_cutoff(date!(2024 - 06 - 10), -5), date!(2024 - 06 - 10));
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::db;

    async fn seeded_user(pool: &sqlx::PgPool) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO users (email, password_salt, password_hash) VALUES ($1, 's', 'h') RETURNING id",
        )
        .bind(format!("ing-{}@example.test", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn rows_are_invisible_to_other_users() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        let pool = db::init_pool(&url, crate::config::PoolSettings::default()).await.expect("pool");
        let owner = seeded_user(&pool).await;
        let stranger = seeded_user(&pool).await;

        let mut tx = db::begin_for_user(&pool, owner).await.unwrap();
        let created = create(&mut tx, new_ingredient("김치")).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = db::begin_for_user(&pool, stranger).await.unwrap();
        assert!(matches!(get(&mut tx, created.id).await, Err(StoreError::NotFound)));
        assert!(matches!(delete(&mut tx, created.id).await, Err(StoreError::NotFound)));
        assert!(list(&mut tx, &IngredientFilter::default()).await.unwrap().is_empty());
        tx.rollback().await.unwrap();

        let mut tx = db::begin_for_user(&pool, owner).await.unwrap();
        assert_eq!(get(&mut tx, created.id).await.unwrap().name, "김치");
        delete(&mut tx, created.id).await.unwrap();
        tx.commit().await.unwrap();
    }
}
