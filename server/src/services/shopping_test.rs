use super::*;

#[test]
fn validate_new_requires_item_name() {
    let err = validate_new(NewShoppingItem::default()).unwrap_err();
    assert_eq!(err.to_string(), "item_name is required");
}

#[test]
fn validate_new_checks_optional_quantity() {
    let negative = NewShoppingItem { item_name: "우유".into(), quantity: Some(-2.0), unit: String::new() };
    assert!(validate_new(negative).is_err());

    let open = NewShoppingItem { item_name: " 우유 ".into(), quantity: None, unit: " L ".into() };
    let valid = validate_new(open).unwrap();
    assert_eq!(valid.item_name, "우유");
    assert_eq!(valid.unit, "L");
    assert_eq!(valid.quantity, None);
}

#[test]
fn merged_quantity_adds_known_amounts() {
    assert_eq!(merged_quantity(Some(2.0), Some(1.5)), Some(3.5));
}

#[test]
fn merged_quantity_keeps_a_known_amount() {
    assert_eq!(merged_quantity(Some(2.0), None), Some(2.0));
    assert_eq!(merged_quantity(None, Some(3.0)), Some(3.0));
    assert_eq!(merged_quantity(None, None), None);
}

#[test]
fn added_unwraps_either_outcome() {
    let item = ShoppingItem {
        id: Uuid::new_v4(),
        item_name: "두부".into(),
        quantity: Some(1.0),
        unit: "모".into(),
        is_purchased: false,
    };
    assert_eq!(Added::Inserted(item.clone()).into_item(), item);
    assert_eq!(Added::Merged(item.clone()).into_item(), item);
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
        .bind(format!("shop-{}@example.test", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn item(name: &str, quantity: Option<f64>, unit: &str) -> NewShoppingItem {
        NewShoppingItem { item_name: name.into(), quantity, unit: unit.into() }
    }

    #[tokio::test]
    async fn duplicate_open_item_is_merged() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        let pool = db::init_pool(&url, crate::config::PoolSettings::default()).await.expect("pool");
        let user = seeded_user(&pool).await;
        let mut tx = db::begin_for_user(&pool, user).await.unwrap();

        let first = create(&mut tx, item("우유", Some(1.0), "L")).await.unwrap();
        assert!(matches!(first, Added::Inserted(_)));
        let first = first.into_item();

        let again = create(&mut tx, item(" 우유", Some(2.0), "l")).await.unwrap();
        let Added::Merged(merged) = again else { panic!("expected a merge, got {again:?}") };
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, Some(3.0));

        let other_unit = create(&mut tx, item("우유", Some(1.0), "팩")).await.unwrap();
        assert!(matches!(other_unit, Added::Inserted(_)));
        assert_eq!(list(&mut tx).await.unwrap().len(), 2);
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn purchased_items_are_not_merged() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        let pool = db::init_pool(&url, crate::config::PoolSettings::default()).await.expect("pool");
        let user = seeded_user(&pool).await;
        let mut tx = db::begin_for_user(&pool, user).await.unwrap();

        let bought = create(&mut tx, item("계란", Some(10.0), "개")).await.unwrap().into_item();
        set_purchased(&mut tx, bought.id, true).await.unwrap();
        let fresh = create(&mut tx, item("계란", Some(10.0), "개")).await.unwrap();
        let Added::Inserted(fresh) = fresh else { panic!("purchased row must not absorb new items") };
        assert_ne!(fresh.id, bought.id);
        tx.rollback().await.unwrap();
    }
}
