//! Menu creation writes the menu and its subgroups as one unit.

use back_office::db::repository::{RepoError, menu};
use back_office::{AppError, DbService, ErrorCode};
use shared::models::MenuCreate;
use sqlx::AnyPool;

async fn pool() -> AnyPool {
    DbService::open_in_memory().await.unwrap().pool
}

async fn count(pool: &AnyPool, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
}

#[tokio::test]
async fn dinner_menu_keeps_subgroup_order() {
    let pool = pool().await;
    let data = MenuCreate::new("Dinner", "DIN", ["Appetizers", "Entrees"]).unwrap();
    let id = menu::create_with_subgroups(&pool, data).await.unwrap();

    assert_eq!(
        menu::subgroup_names(&pool, id).await.unwrap(),
        vec!["Appetizers", "Entrees"]
    );
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM menus").await, 1);
    let subgroups = menu::find_subgroups(&pool, id).await.unwrap();
    assert_eq!(subgroups.len(), 2);
    assert!(subgroups.iter().all(|s| s.menu_id == id));
}

#[tokio::test]
async fn menu_without_subgroups_commits() {
    let pool = pool().await;
    let data = MenuCreate::new("Late night", "LATE", Vec::<String>::new()).unwrap();
    let id = menu::create_with_subgroups(&pool, data).await.unwrap();

    assert!(menu::find_by_id(&pool, id).await.unwrap().is_some());
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM menu_subgroups").await, 0);
}

#[tokio::test]
async fn failed_subgroup_leaves_no_rows() {
    let pool = pool().await;
    let first = menu::create_with_subgroups(
        &pool,
        MenuCreate::new("Dinner", "DIN", ["Mains"]).unwrap(),
    )
    .await
    .unwrap();

    let broken = MenuCreate {
        name: "Brunch".into(),
        pos_name: "BRN".into(),
        subgroups: vec!["Eggs".into(), "Pancakes".into(), "Eggs".into()],
    };
    let err = menu::create_with_subgroups(&pool, broken).await.unwrap_err();
    assert!(matches!(err, RepoError::Transaction(_)));

    // only the earlier menu and its subgroup remain
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM menus").await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM menu_subgroups").await, 1);
    assert!(menu::find_by_name(&pool, "Brunch").await.unwrap().is_none());
    assert_eq!(menu::subgroup_names(&pool, first).await.unwrap(), vec!["Mains"]);

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::TransactionFailed);

    // the connection is usable again after the rollback
    let next = menu::create_with_subgroups(
        &pool,
        MenuCreate::new("Brunch", "BRN", ["Eggs"]).unwrap(),
    )
    .await
    .unwrap();
    assert!(next > first);
}
