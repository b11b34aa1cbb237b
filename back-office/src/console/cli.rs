//! Command-line definitions

use clap::{Args, Parser, Subcommand};
use shared::models::{ReservationStatus, Role, TableStatus, TaskStatus};

/// Fantastic Restaurant back office
#[derive(Debug, Parser)]
#[command(name = "back-office", version, about)]
pub struct Cli {
    /// Database connection URL (mysql:// or sqlite:)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Log filter, e.g. "info" or "debug,sqlx=warn"
    #[arg(long, env = "LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Menu items
    #[command(subcommand)]
    MenuItems(MenuItemCommand),
    /// Menus and their subgroups
    #[command(subcommand)]
    Menus(MenuCommand),
    /// User accounts
    #[command(subcommand)]
    Users(UserCommand),
    /// Staff members
    #[command(subcommand)]
    Staff(StaffCommand),
    /// Stock items
    #[command(subcommand)]
    Inventory(InventoryCommand),
    /// Items below their reorder threshold
    LowStock,
    /// Table reservations
    #[command(subcommand)]
    Reservations(ReservationCommand),
    /// Staff tasks
    #[command(subcommand)]
    Tasks(TaskCommand),
    /// Restaurant tables
    #[command(subcommand)]
    Tables(TableCommand),
    /// Check a set of credentials
    Login(LoginArgs),
}

#[derive(Debug, Subcommand)]
pub enum MenuItemCommand {
    /// Add a menu item
    Add {
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// 1 = available, 0 = unavailable
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        availability: i64,
        #[arg(long)]
        menu_id: Option<i64>,
        #[arg(long)]
        subgroup_id: Option<i64>,
    },
    /// List menu items
    List {
        /// Only items in this subgroup
        #[arg(long)]
        subgroup_id: Option<i64>,
    },
    /// Change fields of a menu item; omitted fields keep their value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        /// 1 = available, 0 = unavailable
        #[arg(long, allow_negative_numbers = true)]
        availability: Option<i64>,
    },
    /// Mark a menu item available (1) or unavailable (0)
    Availability {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Delete a menu item
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum MenuCommand {
    /// Create a menu together with its subgroups
    Create {
        name: String,
        pos_name: String,
        /// Subgroup name, repeat in display order
        #[arg(long = "subgroup")]
        subgroups: Vec<String>,
    },
    /// List menus
    List,
    /// Show a menu's items grouped by subgroup
    Show { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Add a user
    Add {
        username: String,
        #[arg(long)]
        password: String,
        /// admin, staff, customer (or 1, 2, 3)
        #[arg(long)]
        role: Role,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// List users
    List,
}

#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    /// List staff members
    List,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// Add a stock item
    Add {
        name: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
        unit: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        threshold: i64,
    },
    /// List stock items
    List,
    /// Set the stock level of an item
    Update {
        name: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Delete a stock item
    Delete { name: String },
}

#[derive(Debug, Subcommand)]
pub enum ReservationCommand {
    /// Book a table
    Add {
        customer_name: String,
        #[arg(long)]
        table_id: i64,
        /// Reservation time as free text, e.g. "2024-06-01 19:30"
        #[arg(long)]
        time: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// booked, cancelled, completed (or 1, 2, 3)
        #[arg(long, default_value = "booked")]
        status: ReservationStatus,
    },
    /// List reservations
    List,
    /// Change a reservation's status
    Update { id: i64, status: ReservationStatus },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Assign a task to a staff member
    Assign {
        user_id: i64,
        description: String,
        /// assigned, in_progress, completed (or 1, 2, 3)
        #[arg(long, default_value = "assigned")]
        status: TaskStatus,
    },
    /// List tasks
    List {
        /// Only tasks for this user
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Change a task's status
    Update { id: i64, status: TaskStatus },
}

#[derive(Debug, Subcommand)]
pub enum TableCommand {
    /// Add a table
    Create {
        #[arg(allow_negative_numbers = true)]
        number: i64,
        #[arg(allow_negative_numbers = true)]
        capacity: i64,
        /// free, occupied, reserved (or 1, 2, 3)
        #[arg(long, default_value = "free")]
        status: TableStatus,
    },
    /// List tables
    List {
        #[arg(long)]
        status: Option<TableStatus>,
    },
    /// Change a table's status
    UpdateStatus { id: i64, status: TableStatus },
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, required_unless_present = "id", conflicts_with = "id")]
    pub username: Option<String>,
    /// Numeric user id (passcode login)
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(long, env = "BACK_OFFICE_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Fail unless the user is an administrator
    #[arg(long)]
    pub admin: bool,
}
