//! Pool setup, migrations, and caller-scoped transactions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` opens the pool once and runs the embedded migrations before the
//! listener binds. Tables holding kitchen data (`profiles`, `ingredients`,
//! `recipes`, `meal_plans`, `shopping_list`) are protected by row-level
//! security keyed on the `app.user_id` setting, so services must reach them
//! through a [`UserTx`] opened with [`begin_for_user`]. `users` and
//! `sessions` are read on the bare pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::config::PoolSettings;

/// Transaction acting as one authenticated user.
pub type UserTx = Transaction<'static, Postgres>;

/// Connect, then bring the schema up to date.
///
/// # Errors
///
/// Connection failures and migration failures.
pub async fn init_pool(database_url: &str, settings: PoolSettings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;
    info!(max_connections = settings.max_connections, "database ready");
    Ok(pool)
}

/// Start a transaction whose row-level-security identity is `user_id`.
///
/// # Errors
///
/// Fails when no connection is available or the identity cannot be set.
pub async fn begin_for_user(pool: &PgPool, user_id: Uuid) -> Result<UserTx, sqlx::Error> {
    let mut tx = pool.begin().await?;
    act_as(&mut tx, user_id).await?;
    Ok(tx)
}

/// Switch the identity of an open transaction. The setting is
/// transaction-local and ends with the commit or rollback.
///
/// # Errors
///
/// Fails when the setting cannot be applied.
pub async fn act_as(conn: &mut PgConnection, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT set_config('app.user_id', $1, true)")
        .bind(user_id.to_string())
        .execute(conn)
        .await?;
    Ok(())
}
