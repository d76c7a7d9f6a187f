//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, NewCategory},
    database_id::new_id,
};

/// Create a category and return it with its generated ID.
///
/// If a category with the same name already exists, the existing category is
/// returned unchanged.
pub fn create_category(
    new_category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (id, name, type, color) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name) DO NOTHING;",
        (
            new_id(),
            &new_category.name,
            new_category.kind,
            &new_category.color,
        ),
    )?;

    get_category_by_name(&new_category.name, connection)
}

/// Retrieve a single category by its unique name.
///
/// # Errors
/// Returns [Error::NotFound] if no category has the name `name`.
pub fn get_category_by_name(name: &str, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, type, color FROM category WHERE name = :name;")?
        .query_row(&[(":name", name)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, type, color FROM category ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            color TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
        color: row.get(3)?,
    })
}
