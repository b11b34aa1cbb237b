//! Menu Item Repository
//!
//! An item placed in a subgroup always belongs to that subgroup's menu.

use super::{Entity, RepoError, RepoResult, ensure_affected, insert_with_pool, menu};
use shared::ValidationError;
use shared::models::{Availability, MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::AnyPool;

const ITEM_SELECT: &str = "SELECT menu_item_id AS id, name, description, price, category, \
     availability, menu_id, subgroup_id FROM Menu_Items";

pub async fn find_all(pool: &AnyPool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{ITEM_SELECT} ORDER BY menu_item_id");
    let items = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &AnyPool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{ITEM_SELECT} WHERE menu_item_id = ?");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

/// Items placed in a subgroup, by name
pub async fn find_by_subgroup(pool: &AnyPool, subgroup_id: i64) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{ITEM_SELECT} WHERE subgroup_id = ? ORDER BY name");
    let items = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(subgroup_id)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

/// Insert an item. With a subgroup and no menu, the subgroup's menu is used.
pub async fn create(pool: &AnyPool, mut data: MenuItemCreate) -> RepoResult<MenuItem> {
    if let Some(subgroup_id) = data.subgroup_id {
        let subgroup = menu::find_subgroup_by_id(pool, subgroup_id)
            .await?
            .ok_or_else(|| RepoError::not_found(Entity::Subgroup, subgroup_id))?;
        match data.menu_id {
            None => data.menu_id = Some(subgroup.menu_id),
            Some(menu_id) if menu_id != subgroup.menu_id => {
                return Err(ValidationError::OutOfRange {
                    field: "subgroup_id",
                    value: subgroup_id.to_string(),
                    expected: "a subgroup of the chosen menu",
                }
                .into());
            }
            Some(_) => {}
        }
    }

    let insert = sqlx::query(
        "INSERT INTO Menu_Items (name, description, price, category, availability, menu_id, subgroup_id) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.availability.flag())
    .bind(data.menu_id)
    .bind(data.subgroup_id);
    let id = insert_with_pool(pool, insert, Entity::MenuItem).await?;
    tracing::info!(id, name = %data.name, "Menu item created");

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Partial update; absent fields keep their stored value.
pub async fn update(pool: &AnyPool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    data.validate()?;
    let result = sqlx::query(
        "UPDATE Menu_Items SET name = COALESCE(?, name), description = COALESCE(?, description), \
         price = COALESCE(?, price), category = COALESCE(?, category), \
         availability = COALESCE(?, availability) WHERE menu_item_id = ?",
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.price)
    .bind(data.category)
    .bind(data.availability.map(|a| a.flag()))
    .bind(id)
    .execute(pool)
    .await?;
    ensure_affected(&result, Entity::MenuItem, id)?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::not_found(Entity::MenuItem, id))
}

pub async fn set_availability(
    pool: &AnyPool,
    id: i64,
    availability: Availability,
) -> RepoResult<()> {
    let result = sqlx::query("UPDATE Menu_Items SET availability = ? WHERE menu_item_id = ?")
        .bind(availability.flag())
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::MenuItem, id)
}

pub async fn delete(pool: &AnyPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM Menu_Items WHERE menu_item_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::MenuItem, id)
}
