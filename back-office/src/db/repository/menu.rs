//! Menu Repository
//!
//! A menu and its subgroups are written as one unit: either the menu row
//! and every subgroup row exist afterwards, or none of them do.

use super::{Entity, RepoError, RepoResult, ensure_affected, insert_returning_id};
use crate::audit_log;
use shared::error::ErrorCode;
use shared::models::{Menu, MenuCreate, MenuItem, MenuSection, MenuSubgroup};
use sqlx::{Any, AnyPool, Transaction};

const MENU_SELECT: &str = "SELECT id, name, pos_name FROM menus";
const SUBGROUP_SELECT: &str = "SELECT id, menu_id, subgroup_name FROM menu_subgroups";

/// Create a menu with its subgroups in one transaction and return the menu id.
///
/// Subgroups are inserted in the given order, so their ids (and listing
/// order) follow it. An empty list commits a menu without subgroups. Any
/// failure after `BEGIN` rolls the whole unit back and is reported as
/// [`RepoError::Transaction`] wrapping the cause.
pub async fn create_with_subgroups(pool: &AnyPool, data: MenuCreate) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;

    match insert_menu_tree(&mut tx, &data).await {
        Ok(menu_id) => {
            tx.commit()
                .await
                .map_err(|e| RepoError::Transaction(Box::new(e.into())))?;
            tracing::info!(
                menu_id,
                name = %data.name,
                subgroups = data.subgroups.len(),
                "Menu created"
            );
            let resource = format!("menu:{menu_id}");
            audit_log!("create_menu", resource.as_str(), data.name.as_str());
            Ok(menu_id)
        }
        Err(cause) => {
            if let Err(e) = tx.rollback().await {
                // the connection is discarded by the pool either way
                tracing::error!(error = %e, "Rollback failed");
            }
            tracing::warn!(name = %data.name, error = %cause, "Menu creation rolled back");
            Err(RepoError::Transaction(Box::new(cause)))
        }
    }
}

async fn insert_menu_tree(tx: &mut Transaction<'_, Any>, data: &MenuCreate) -> RepoResult<i64> {
    let insert = sqlx::query("INSERT INTO menus (name, pos_name) VALUES (?, ?)")
        .bind(&data.name)
        .bind(&data.pos_name);
    let menu_id = insert_returning_id(&mut **tx, insert, Entity::Menu).await?;

    for name in &data.subgroups {
        sqlx::query("INSERT INTO menu_subgroups (menu_id, subgroup_name) VALUES (?, ?)")
            .bind(menu_id)
            .bind(name)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                RepoError::from(e).or_conflict(
                    ErrorCode::SubgroupNameExists,
                    format!("Subgroup '{name}' appears more than once"),
                )
            })?;
    }
    tracing::debug!(menu_id, count = data.subgroups.len(), "Subgroups inserted");
    Ok(menu_id)
}

pub async fn find_all(pool: &AnyPool) -> RepoResult<Vec<Menu>> {
    let sql = format!("{MENU_SELECT} ORDER BY id");
    let menus = sqlx::query_as::<_, Menu>(&sql).fetch_all(pool).await?;
    Ok(menus)
}

pub async fn find_by_id(pool: &AnyPool, id: i64) -> RepoResult<Option<Menu>> {
    let sql = format!("{MENU_SELECT} WHERE id = ?");
    let menu = sqlx::query_as::<_, Menu>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(menu)
}

/// First menu with this name (names are not unique)
pub async fn find_by_name(pool: &AnyPool, name: &str) -> RepoResult<Option<Menu>> {
    let sql = format!("{MENU_SELECT} WHERE name = ? ORDER BY id LIMIT 1");
    let menu = sqlx::query_as::<_, Menu>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(menu)
}

/// Subgroups of a menu in insertion order
pub async fn find_subgroups(pool: &AnyPool, menu_id: i64) -> RepoResult<Vec<MenuSubgroup>> {
    let sql = format!("{SUBGROUP_SELECT} WHERE menu_id = ? ORDER BY id");
    let subgroups = sqlx::query_as::<_, MenuSubgroup>(&sql)
        .bind(menu_id)
        .fetch_all(pool)
        .await?;
    Ok(subgroups)
}

pub async fn subgroup_names(pool: &AnyPool, menu_id: i64) -> RepoResult<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT subgroup_name FROM menu_subgroups WHERE menu_id = ? ORDER BY id",
    )
    .bind(menu_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

pub async fn find_subgroup_by_name(
    pool: &AnyPool,
    menu_id: i64,
    name: &str,
) -> RepoResult<Option<MenuSubgroup>> {
    let sql = format!("{SUBGROUP_SELECT} WHERE menu_id = ? AND subgroup_name = ?");
    let subgroup = sqlx::query_as::<_, MenuSubgroup>(&sql)
        .bind(menu_id)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(subgroup)
}

pub async fn find_subgroup_by_id(pool: &AnyPool, id: i64) -> RepoResult<Option<MenuSubgroup>> {
    let sql = format!("{SUBGROUP_SELECT} WHERE id = ?");
    let subgroup = sqlx::query_as::<_, MenuSubgroup>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(subgroup)
}

/// A menu's items grouped by subgroup: subgroups in insertion order, items
/// by name. Subgroups without items are included.
pub async fn find_sections(pool: &AnyPool, menu_id: i64) -> RepoResult<Vec<MenuSection>> {
    if find_by_id(pool, menu_id).await?.is_none() {
        return Err(RepoError::not_found(Entity::Menu, menu_id));
    }
    let subgroups = find_subgroups(pool, menu_id).await?;

    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT mi.menu_item_id AS id, mi.name, mi.description, mi.price, mi.category, \
         mi.availability, mi.menu_id, mi.subgroup_id \
         FROM Menu_Items mi JOIN menu_subgroups sg ON mi.subgroup_id = sg.id \
         WHERE sg.menu_id = ? ORDER BY sg.id, mi.name",
    )
    .bind(menu_id)
    .fetch_all(pool)
    .await?;

    let mut sections: Vec<MenuSection> = subgroups
        .into_iter()
        .map(|subgroup| MenuSection {
            subgroup,
            items: Vec::new(),
        })
        .collect();
    for item in items {
        if let Some(section) = sections
            .iter_mut()
            .find(|s| Some(s.subgroup.id) == item.subgroup_id)
        {
            section.items.push(item);
        }
    }
    Ok(sections)
}

/// Delete a menu; its subgroups go with it and items are detached.
pub async fn delete(pool: &AnyPool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM menus WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    ensure_affected(&result, Entity::Menu, id)?;
    let resource = format!("menu:{id}");
    audit_log!("delete_menu", resource.as_str());
    Ok(())
}
