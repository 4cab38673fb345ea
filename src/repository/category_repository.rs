use rusqlite::Connection;

use crate::model::kinds::CategoryType;
use crate::model::repository::Category;

/// creates a category row and returns the generated id. `user_id` on the
/// passed category must be set; default rows only ever come from init.sql
pub fn create_category(category: &Category, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/categories/create_category.sql"
    ))?;
    let id = pst.insert(rusqlite::params![
        category.user_id,
        category.name,
        category.kind,
        options_to_json(&category.options),
        category.sort_order,
        category.created_at,
        category.updated_at,
    ])? as u32;
    Ok(id)
}

/// the passed user's custom categories in sort order. Empty means the user
/// never replaced the defaults
pub fn get_categories_for_user(
    user_id: u32,
    con: &Connection,
) -> Result<Vec<Category>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/categories/get_categories_for_user.sql"
    ))?;
    let mapped = pst.query_map(rusqlite::params![user_id], category_mapper)?;
    let mut categories = Vec::new();
    for category in mapped {
        categories.push(category?);
    }
    Ok(categories)
}

/// the ownerless default set in sort order
pub fn get_default_categories(con: &Connection) -> Result<Vec<Category>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/categories/get_default_categories.sql"
    ))?;
    let mapped = pst.query_map([], category_mapper)?;
    let mut categories = Vec::new();
    for category in mapped {
        categories.push(category?);
    }
    Ok(categories)
}

/// removes every custom category the passed user has, reporting how many rows
/// that was. The default set is never touched by this
pub fn delete_categories_for_user(
    user_id: u32,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/categories/delete_categories_for_user.sql"
    ))?;
    pst.execute(rusqlite::params![user_id])
}

fn options_to_json(options: &[String]) -> String {
    serde_json::to_string(options).unwrap_or_else(|_| String::from("[]"))
}

/// 1. id
/// 2. user_id
/// 3. name
/// 4. type
/// 5. options
/// 6. sort_order
/// 7. created_at
/// 8. updated_at
fn category_mapper(row: &rusqlite::Row) -> Result<Category, rusqlite::Error> {
    let kind: String = row.get(3)?;
    let raw_options: String = row.get(4)?;
    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        kind: CategoryType::from(kind.as_str()),
        options: parse_options(raw_options.as_str()),
        sort_order: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn parse_options(raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(options) => options,
        Err(e) => {
            log::warn!(
                "options column does not hold a valid option list, substituting an empty one: {e:?}"
            );
            Vec::new()
        }
    }
}
