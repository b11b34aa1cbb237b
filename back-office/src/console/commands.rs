//! Command handlers
//!
//! Each handler builds the validated payload, calls the repositories and
//! returns the text to print. Errors surface as [`AppError`] for the
//! console translation step.

use super::cli::{
    Command, InventoryCommand, LoginArgs, MenuCommand, MenuItemCommand, ReservationCommand,
    StaffCommand, TableCommand, TaskCommand, UserCommand,
};
use super::render::{TextTable, opt};
use crate::auth;
use crate::db::repository::{
    dining_table, inventory, menu, menu_item, reservation, staff_task, user,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    DiningTable, DiningTableCreate, InventoryCreate, InventoryItem, MenuCreate, MenuItem,
    MenuItemCreate, MenuItemUpdate, Reservation, ReservationCreate, StaffTask, StaffTaskCreate,
    User, UserCreate, parse_availability,
};
use shared::util::format_millis;
use sqlx::AnyPool;

/// Run one command and return its output.
pub async fn execute(pool: &AnyPool, command: Command) -> AppResult<String> {
    match command {
        Command::MenuItems(cmd) => menu_items(pool, cmd).await,
        Command::Menus(cmd) => menus(pool, cmd).await,
        Command::Users(cmd) => users(pool, cmd).await,
        Command::Staff(StaffCommand::List) => {
            let staff = user::find_staff(pool).await?;
            Ok(user_table(&staff, "No staff members found."))
        }
        Command::Inventory(cmd) => stock(pool, cmd).await,
        Command::LowStock => {
            let low = inventory::find_needing_reorder(pool).await?;
            Ok(inventory_table(&low, "All items are above their reorder threshold."))
        }
        Command::Reservations(cmd) => reservations(pool, cmd).await,
        Command::Tasks(cmd) => tasks(pool, cmd).await,
        Command::Tables(cmd) => tables(pool, cmd).await,
        Command::Login(args) => login(pool, args).await,
    }
}

async fn menu_items(pool: &AnyPool, cmd: MenuItemCommand) -> AppResult<String> {
    match cmd {
        MenuItemCommand::Add {
            name,
            price,
            description,
            category,
            availability,
            menu_id,
            subgroup_id,
        } => {
            let data = MenuItemCreate::new(
                name,
                description,
                price,
                category,
                availability,
                menu_id,
                subgroup_id,
            )?;
            let item = menu_item::create(pool, data).await?;
            Ok(format!("Menu item added with ID {}.\n", item.id))
        }
        MenuItemCommand::List { subgroup_id } => {
            let items = match subgroup_id {
                Some(id) => menu_item::find_by_subgroup(pool, id).await?,
                None => menu_item::find_all(pool).await?,
            };
            Ok(menu_item_table(&items))
        }
        MenuItemCommand::Update {
            id,
            name,
            description,
            price,
            category,
            availability,
        } => {
            let data = MenuItemUpdate {
                name: name.map(|n| n.trim().to_string()),
                description,
                price,
                category,
                availability: availability.map(parse_availability).transpose()?,
            };
            if data.is_empty() {
                return Err(AppError::invalid_request("Give at least one field to change"));
            }
            let item = menu_item::update(pool, id, data).await?;
            Ok(format!("Menu item {} updated.\n", item.id))
        }
        MenuItemCommand::Availability { id, value } => {
            let availability = parse_availability(value)?;
            menu_item::set_availability(pool, id, availability).await?;
            Ok(format!("Menu item {id} available: {availability}.\n"))
        }
        MenuItemCommand::Delete { id } => {
            menu_item::delete(pool, id).await?;
            Ok(format!("Menu item {id} deleted.\n"))
        }
    }
}

async fn menus(pool: &AnyPool, cmd: MenuCommand) -> AppResult<String> {
    match cmd {
        MenuCommand::Create {
            name,
            pos_name,
            subgroups,
        } => {
            let data = MenuCreate::new(name, pos_name, subgroups)?;
            let count = data.subgroups.len();
            let id = menu::create_with_subgroups(pool, data).await?;
            Ok(format!(
                "Menu created with ID {id} and {count} subgroup(s).\n"
            ))
        }
        MenuCommand::List => {
            let menus = menu::find_all(pool).await?;
            if menus.is_empty() {
                return Ok("No menus found.\n".into());
            }
            let mut table = TextTable::new(&["ID", "NAME", "POS NAME", "SUBGROUPS"]);
            for m in menus {
                let names = menu::subgroup_names(pool, m.id).await?;
                table.row([m.id.to_string(), m.name, m.pos_name, names.join(", ")]);
            }
            Ok(table.to_string())
        }
        MenuCommand::Show { id } => {
            let found = menu::find_by_id(pool, id).await?.ok_or_else(|| {
                AppError::with_message(ErrorCode::MenuNotFound, format!("Menu {id} not found"))
            })?;
            let sections = menu::find_sections(pool, id).await?;

            let mut out = format!("{} ({})\n", found.name, found.pos_name);
            if sections.is_empty() {
                out.push_str("  (no subgroups)\n");
            }
            for section in sections {
                out.push_str(&format!("\n{}\n", section.subgroup.subgroup_name));
                if section.items.is_empty() {
                    out.push_str("  (empty)\n");
                }
                for item in section.items {
                    let flag = if item.availability.is_available() {
                        ""
                    } else {
                        "  [unavailable]"
                    };
                    out.push_str(&format!("  {:<30} {:>8.2}{}\n", item.name, item.price, flag));
                }
            }
            Ok(out)
        }
    }
}

async fn users(pool: &AnyPool, cmd: UserCommand) -> AppResult<String> {
    match cmd {
        UserCommand::Add {
            username,
            password,
            role,
            email,
            phone,
        } => {
            let data = UserCreate::new(username, password, role, email, phone)?;
            let created = user::create(pool, data).await?;
            Ok(format!(
                "User '{}' added with ID {} ({}).\n",
                created.username, created.id, created.role
            ))
        }
        UserCommand::List => {
            let users = user::find_all(pool).await?;
            Ok(user_table(&users, "No users found."))
        }
    }
}

async fn stock(pool: &AnyPool, cmd: InventoryCommand) -> AppResult<String> {
    match cmd {
        InventoryCommand::Add {
            name,
            quantity,
            unit,
            threshold,
        } => {
            let data = InventoryCreate::new(name, quantity, unit, threshold)?;
            let item = inventory::create(pool, data).await?;
            Ok(format!(
                "Inventory item '{}' added with ID {}.\n",
                item.name, item.id
            ))
        }
        InventoryCommand::List => {
            let items = inventory::find_all(pool).await?;
            Ok(inventory_table(&items, "No inventory items found."))
        }
        InventoryCommand::Update { name, quantity } => {
            let item = inventory::update_quantity_by_name(pool, name.trim(), quantity).await?;
            let note = if item.needs_reorder() {
                " Below reorder threshold."
            } else {
                ""
            };
            Ok(format!(
                "'{}' now at {} {}.{}\n",
                item.name, item.quantity, item.unit, note
            ))
        }
        InventoryCommand::Delete { name } => {
            let name = name.trim();
            inventory::delete_by_name(pool, name).await?;
            Ok(format!("Inventory item '{name}' deleted.\n"))
        }
    }
}

async fn reservations(pool: &AnyPool, cmd: ReservationCommand) -> AppResult<String> {
    match cmd {
        ReservationCommand::Add {
            customer_name,
            table_id,
            time,
            email,
            phone,
            status,
        } => {
            let data = ReservationCreate::new(customer_name, email, phone, table_id, time)?
                .with_status(status);
            let created = reservation::create(pool, data).await?;
            Ok(format!("Reservation added with ID {}.\n", created.id))
        }
        ReservationCommand::List => {
            let all = reservation::find_all(pool).await?;
            Ok(reservation_table(&all))
        }
        ReservationCommand::Update { id, status } => {
            let updated = reservation::update_status(pool, id, status).await?;
            Ok(format!(
                "Reservation {} is now {}.\n",
                updated.id, updated.status
            ))
        }
    }
}

async fn tasks(pool: &AnyPool, cmd: TaskCommand) -> AppResult<String> {
    match cmd {
        TaskCommand::Assign {
            user_id,
            description,
            status,
        } => {
            let data = StaffTaskCreate::new(user_id, description)?.with_status(status);
            let task = staff_task::create(pool, data).await?;
            Ok(format!(
                "Task {} assigned to user {} ({}).\n",
                task.id, task.user_id, task.status
            ))
        }
        TaskCommand::List { user_id } => {
            let tasks = match user_id {
                Some(id) => staff_task::find_by_user(pool, id).await?,
                None => staff_task::find_all(pool).await?,
            };
            Ok(task_table(&tasks))
        }
        TaskCommand::Update { id, status } => {
            let task = staff_task::update_status(pool, id, status).await?;
            Ok(format!("Task {} is now {}.\n", task.id, task.status))
        }
    }
}

async fn tables(pool: &AnyPool, cmd: TableCommand) -> AppResult<String> {
    match cmd {
        TableCommand::Create {
            number,
            capacity,
            status,
        } => {
            let data = DiningTableCreate::new(number, capacity, status)?;
            let created = dining_table::create(pool, data).await?;
            Ok(format!(
                "Table {} added with ID {}.\n",
                created.table_number, created.id
            ))
        }
        TableCommand::List { status } => {
            let tables = match status {
                Some(status) => dining_table::find_by_status(pool, status).await?,
                None => dining_table::find_all(pool).await?,
            };
            Ok(dining_table_table(&tables))
        }
        TableCommand::UpdateStatus { id, status } => {
            dining_table::update_status(pool, id, status).await?;
            Ok(format!("Table {id} is now {status}.\n"))
        }
    }
}

async fn login(pool: &AnyPool, args: LoginArgs) -> AppResult<String> {
    let found = match (args.id, args.username) {
        (Some(id), _) => auth::login_by_id(pool, id, &args.password).await?,
        (None, Some(username)) => auth::login(pool, &username, &args.password).await?,
        (None, None) => {
            return Err(AppError::invalid_request("Give --username or --id"));
        }
    };
    if args.admin {
        auth::require_admin(&found)?;
    }
    Ok(format!(
        "Logged in as {} ({}).\n",
        found.username, found.role
    ))
}

// ── Output ──────────────────────────────────────────────────────────

fn menu_item_table(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return "No menu items found.\n".into();
    }
    let mut table = TextTable::new(&[
        "ID", "NAME", "PRICE", "CATEGORY", "AVAILABLE", "MENU", "SUBGROUP",
    ]);
    for item in items {
        table.row([
            item.id.to_string(),
            item.name.clone(),
            format!("{:.2}", item.price),
            opt(item.category.as_deref()),
            item.availability.to_string(),
            opt(item.menu_id),
            opt(item.subgroup_id),
        ]);
    }
    table.to_string()
}

fn user_table(users: &[User], empty: &str) -> String {
    if users.is_empty() {
        return format!("{empty}\n");
    }
    let mut table = TextTable::new(&["ID", "USERNAME", "ROLE", "EMAIL", "PHONE"]);
    for u in users {
        table.row([
            u.id.to_string(),
            u.username.clone(),
            u.role.to_string(),
            u.email.clone(),
            u.phone.clone(),
        ]);
    }
    table.to_string()
}

fn inventory_table(items: &[InventoryItem], empty: &str) -> String {
    if items.is_empty() {
        return format!("{empty}\n");
    }
    let mut table = TextTable::new(&[
        "ID", "NAME", "QUANTITY", "UNIT", "THRESHOLD", "UPDATED", "REORDER",
    ]);
    for item in items {
        table.row([
            item.id.to_string(),
            item.name.clone(),
            item.quantity.to_string(),
            item.unit.clone(),
            item.threshold.to_string(),
            format_millis(item.last_updated),
            if item.needs_reorder() { "yes" } else { "" }.to_string(),
        ]);
    }
    table.to_string()
}

fn reservation_table(reservations: &[Reservation]) -> String {
    if reservations.is_empty() {
        return "No reservations found.\n".into();
    }
    let mut table = TextTable::new(&[
        "ID", "CUSTOMER", "TABLE", "TIME", "STATUS", "EMAIL", "PHONE",
    ]);
    for r in reservations {
        table.row([
            r.id.to_string(),
            r.customer_name.clone(),
            r.table_id.to_string(),
            r.date_time.clone(),
            r.status.to_string(),
            opt(r.email.as_deref()),
            opt(r.phone.as_deref()),
        ]);
    }
    table.to_string()
}

fn task_table(tasks: &[StaffTask]) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".into();
    }
    let mut table = TextTable::new(&[
        "ID", "USER", "DESCRIPTION", "STATUS", "ASSIGNED", "COMPLETED",
    ]);
    for t in tasks {
        table.row([
            t.id.to_string(),
            t.user_id.to_string(),
            t.description.clone(),
            t.status.to_string(),
            format_millis(t.assigned_at),
            opt(t.completed_at.map(format_millis)),
        ]);
    }
    table.to_string()
}

fn dining_table_table(tables: &[DiningTable]) -> String {
    if tables.is_empty() {
        return "No tables found.\n".into();
    }
    let mut table = TextTable::new(&["ID", "NUMBER", "CAPACITY", "STATUS"]);
    for t in tables {
        table.row([
            t.id.to_string(),
            t.table_number.to_string(),
            t.capacity.to_string(),
            t.status.to_string(),
        ]);
    }
    table.to_string()
}
