use std::collections::HashMap;

use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::Connection;

use crate::model::kinds::EmbedType;
use crate::model::repository::{Resource, ResourcePatch};

/// creates a new resource row and returns the generated id
pub fn create_resource(resource: &Resource, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/create_resource.sql"
    ))?;
    let id = pst.insert(rusqlite::params![
        resource.user_id,
        resource.title,
        resource.url,
        resource.screenshot,
        resource.embed_code,
        resource.embed_type,
        resource.notes,
        tags_to_json(&resource.tags),
        resource.created_at,
        resource.updated_at,
    ])? as u32;
    Ok(id)
}

/// retrieves the resource with the passed id, but only if the passed user owns
/// it. A row owned by someone else comes back as `QueryReturnedNoRows`, same
/// as a row that doesn't exist
pub fn get_resource(id: u32, user_id: u32, con: &Connection) -> Result<Resource, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/resources/get_resource.sql"))?;
    pst.query_row(rusqlite::params![id, user_id], resource_mapper)
}

/// pulls one page of the passed user's resources, newest first, honoring the
/// same filters as [`count_resources`]
pub fn search_resources(
    user_id: u32,
    search: &Option<String>,
    tag_filter: &HashMap<String, Vec<String>>,
    limit: u32,
    offset: i64,
    con: &Connection,
) -> Result<Vec<Resource>, rusqlite::Error> {
    let (clause, filter_params) = filter_clause(search, tag_filter);
    let query = format!(
        include_str!("../assets/queries/resources/search_resources.sql"),
        clause
    );
    let mut params: Vec<Value> = vec![Value::Integer(i64::from(user_id))];
    params.extend(filter_params);
    params.push(Value::Integer(i64::from(limit)));
    params.push(Value::Integer(offset));
    let mut pst = con.prepare(query.as_str())?;
    let mapped = pst.query_map(rusqlite::params_from_iter(params), resource_mapper)?;
    let mut resources = Vec::new();
    for resource in mapped {
        resources.push(resource?);
    }
    Ok(resources)
}

/// counts every resource of the passed user that the current filters match,
/// ignoring pagination
pub fn count_resources(
    user_id: u32,
    search: &Option<String>,
    tag_filter: &HashMap<String, Vec<String>>,
    con: &Connection,
) -> Result<u32, rusqlite::Error> {
    let (clause, filter_params) = filter_clause(search, tag_filter);
    let query = format!(
        include_str!("../assets/queries/resources/count_resources.sql"),
        clause
    );
    let mut params: Vec<Value> = vec![Value::Integer(i64::from(user_id))];
    params.extend(filter_params);
    let mut pst = con.prepare(query.as_str())?;
    pst.query_row(rusqlite::params_from_iter(params), |row| row.get(0))
}

/// applies the passed patch to the resource with that id, if the passed user
/// owns it. Returns how many rows were touched, so 0 covers both "not found"
/// and "not yours"
pub fn update_resource(
    id: u32,
    user_id: u32,
    patch: &ResourcePatch,
    updated_at: NaiveDateTime,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut assignments: Vec<&str> = Vec::new();
    let mut params: Vec<Value> = Vec::new();
    if let Some(title) = &patch.title {
        assignments.push("title = ?");
        params.push(Value::Text(title.clone()));
    }
    if let Some(url) = &patch.url {
        assignments.push("url = ?");
        params.push(nullable_text(url));
    }
    if let Some(screenshot) = &patch.screenshot {
        assignments.push("screenshot = ?");
        params.push(nullable_text(screenshot));
    }
    if let Some(embed_code) = &patch.embed_code {
        assignments.push("embed_code = ?");
        params.push(nullable_text(embed_code));
    }
    if let Some(embed_type) = &patch.embed_type {
        assignments.push("embed_type = ?");
        params.push(match embed_type {
            Some(kind) => Value::Text(kind.to_string()),
            None => Value::Null,
        });
    }
    if let Some(notes) = &patch.notes {
        assignments.push("notes = ?");
        params.push(nullable_text(notes));
    }
    if let Some(tags) = &patch.tags {
        assignments.push("tags = ?");
        params.push(Value::Text(tags_to_json(tags)));
    }
    // every successful patch bumps the update timestamp
    assignments.push("updated_at = ?");
    params.push(datetime_to_text(updated_at));
    params.push(Value::Integer(i64::from(id)));
    params.push(Value::Integer(i64::from(user_id)));
    let query = format!(
        include_str!("../assets/queries/resources/update_resource.sql"),
        assignments.join(", ")
    );
    let mut pst = con.prepare(query.as_str())?;
    pst.execute(rusqlite::params_from_iter(params))
}

/// deletes the resource with the passed id if the passed user owns it, and
/// reports how many rows that removed
pub fn delete_resource(id: u32, user_id: u32, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/resources/delete_resource.sql"
    ))?;
    pst.execute(rusqlite::params![id, user_id])
}

/// builds the predicate tail shared by the search and count queries, plus the
/// values it binds, in bind order. Each tag category becomes its own
/// `exists` check so categories combine with AND while the options inside one
/// category combine with OR
fn filter_clause(
    search: &Option<String>,
    tag_filter: &HashMap<String, Vec<String>>,
) -> (String, Vec<Value>) {
    let mut clause = String::new();
    let mut params: Vec<Value> = Vec::new();
    if let Some(search) = search {
        clause.push_str("\n  and (title like ? or notes like ?)");
        let pattern = format!("%{search}%");
        params.push(Value::Text(pattern.clone()));
        params.push(Value::Text(pattern));
    }
    for (category, options) in tag_filter {
        clause.push('\n');
        clause.push_str(include_str!("../assets/queries/resources/filter_tag_category.sql").trim_end());
        params.push(Value::Text(category.clone()));
        params.push(Value::Text(
            serde_json::to_string(options).unwrap_or_else(|_| String::from("[]")),
        ));
    }
    (clause, params)
}

fn nullable_text(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text.clone()),
        None => Value::Null,
    }
}

/// matches the format rusqlite itself uses when binding a NaiveDateTime, so
/// rows written through the patch path sort consistently with created rows
fn datetime_to_text(value: NaiveDateTime) -> Value {
    Value::Text(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

fn tags_to_json(tags: &HashMap<String, Vec<String>>) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| String::from("{}"))
}

/// 1. id
/// 2. user_id
/// 3. title
/// 4. url
/// 5. screenshot
/// 6. embed_code
/// 7. embed_type
/// 8. notes
/// 9. tags
/// 10. created_at
/// 11. updated_at
fn resource_mapper(row: &rusqlite::Row) -> Result<Resource, rusqlite::Error> {
    let embed_type: Option<String> = row.get(6)?;
    let raw_tags: String = row.get(8)?;
    Ok(Resource {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        url: row.get(3)?,
        screenshot: row.get(4)?,
        embed_code: row.get(5)?,
        embed_type: embed_type.as_deref().map(EmbedType::from),
        notes: row.get(7)?,
        tags: parse_tags(raw_tags.as_str()),
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn parse_tags(raw: &str) -> HashMap<String, Vec<String>> {
    match serde_json::from_str(raw) {
        Ok(tags) => tags,
        Err(e) => {
            log::warn!("tags column does not hold a valid tag map, substituting an empty one: {e:?}");
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;

    use super::*;
    use crate::repository::open_connection;
    use crate::test::{cleanup, create_user_db_entry, refresh_db};

    fn test_resource(user_id: u32, title: &str) -> Resource {
        let now = Utc::now().naive_utc();
        Resource {
            id: None,
            user_id,
            title: title.to_string(),
            url: None,
            screenshot: None,
            embed_code: None,
            embed_type: None,
            notes: None,
            tags: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn create_then_get_round_trips() {
        refresh_db();
        create_user_db_entry("username");
        let con = open_connection();
        let mut resource = test_resource(1, "saved thing");
        resource.url = Some("https://example.com".to_string());
        resource.embed_type = Some(EmbedType::Twitter);
        resource
            .tags
            .insert("Type".to_string(), vec!["UI".to_string()]);
        let id = create_resource(&resource, &con).unwrap();
        let fetched = get_resource(id, 1, &con).unwrap();
        con.close().unwrap();
        assert_eq!(Some(id), fetched.id);
        assert_eq!("saved thing", fetched.title);
        assert_eq!(Some("https://example.com".to_string()), fetched.url);
        assert_eq!(Some(EmbedType::Twitter), fetched.embed_type);
        assert_eq!(vec!["UI".to_string()], fetched.tags["Type"]);
        cleanup();
    }

    #[test]
    fn get_resource_hides_other_owners() {
        refresh_db();
        create_user_db_entry("username");
        create_user_db_entry("second");
        let con = open_connection();
        let id = create_resource(&test_resource(1, "mine"), &con).unwrap();
        let res = get_resource(id, 2, &con);
        con.close().unwrap();
        assert_eq!(Err(rusqlite::Error::QueryReturnedNoRows), res);
        cleanup();
    }

    #[test]
    fn search_matches_title_or_notes_case_insensitively() {
        refresh_db();
        create_user_db_entry("username");
        let con = open_connection();
        let mut with_notes = test_resource(1, "plain");
        with_notes.notes = Some("a NEON accent".to_string());
        create_resource(&with_notes, &con).unwrap();
        create_resource(&test_resource(1, "Neon signage"), &con).unwrap();
        create_resource(&test_resource(1, "unrelated"), &con).unwrap();
        let search = Some("neon".to_string());
        let found = search_resources(1, &search, &HashMap::new(), 20, 0, &con).unwrap();
        let total = count_resources(1, &search, &HashMap::new(), &con).unwrap();
        con.close().unwrap();
        assert_eq!(2, found.len());
        assert_eq!(2, total);
        cleanup();
    }

    #[test]
    fn tag_filter_needs_overlap_not_containment() {
        refresh_db();
        create_user_db_entry("username");
        let con = open_connection();
        let mut matching = test_resource(1, "has a");
        matching
            .tags
            .insert("Style".to_string(), vec!["Minimal".to_string()]);
        create_resource(&matching, &con).unwrap();
        let mut wrong_option = test_resource(1, "has c");
        wrong_option
            .tags
            .insert("Style".to_string(), vec!["Retro".to_string()]);
        create_resource(&wrong_option, &con).unwrap();
        // no Style key at all
        create_resource(&test_resource(1, "untagged"), &con).unwrap();
        let mut filter = HashMap::new();
        filter.insert(
            "Style".to_string(),
            vec!["Minimal".to_string(), "Bold".to_string()],
        );
        let found = search_resources(1, &None, &filter, 20, 0, &con).unwrap();
        let total = count_resources(1, &None, &filter, &con).unwrap();
        con.close().unwrap();
        assert_eq!(1, found.len());
        assert_eq!("has a", found[0].title);
        assert_eq!(1, total);
        cleanup();
    }

    #[test]
    fn tag_filter_categories_combine_with_and() {
        refresh_db();
        create_user_db_entry("username");
        let con = open_connection();
        let mut both = test_resource(1, "both");
        both.tags
            .insert("Type".to_string(), vec!["UI".to_string()]);
        both.tags
            .insert("Style".to_string(), vec!["Minimal".to_string()]);
        create_resource(&both, &con).unwrap();
        let mut only_type = test_resource(1, "only type");
        only_type
            .tags
            .insert("Type".to_string(), vec!["UI".to_string()]);
        create_resource(&only_type, &con).unwrap();
        let mut filter = HashMap::new();
        filter.insert("Type".to_string(), vec!["UI".to_string()]);
        filter.insert("Style".to_string(), vec!["Minimal".to_string()]);
        let found = search_resources(1, &None, &filter, 20, 0, &con).unwrap();
        con.close().unwrap();
        assert_eq!(1, found.len());
        assert_eq!("both", found[0].title);
        cleanup();
    }

    #[test]
    fn update_writes_null_for_cleared_fields() {
        refresh_db();
        create_user_db_entry("username");
        let con = open_connection();
        let mut resource = test_resource(1, "before");
        resource.url = Some("https://example.com".to_string());
        resource.notes = Some("keep me".to_string());
        let id = create_resource(&resource, &con).unwrap();
        let patch = ResourcePatch {
            title: Some("after".to_string()),
            url: Some(None),
            ..Default::default()
        };
        let touched = update_resource(id, 1, &patch, Utc::now().naive_utc(), &con).unwrap();
        let fetched = get_resource(id, 1, &con).unwrap();
        con.close().unwrap();
        assert_eq!(1, touched);
        assert_eq!("after", fetched.title);
        assert_eq!(None, fetched.url);
        // untouched column survives
        assert_eq!(Some("keep me".to_string()), fetched.notes);
        cleanup();
    }

    #[test]
    fn update_is_owner_scoped() {
        refresh_db();
        create_user_db_entry("username");
        create_user_db_entry("second");
        let con = open_connection();
        let id = create_resource(&test_resource(1, "mine"), &con).unwrap();
        let patch = ResourcePatch {
            title: Some("stolen".to_string()),
            ..Default::default()
        };
        let touched = update_resource(id, 2, &patch, Utc::now().naive_utc(), &con).unwrap();
        let untouched = get_resource(id, 1, &con).unwrap();
        con.close().unwrap();
        assert_eq!(0, touched);
        assert_eq!("mine", untouched.title);
        cleanup();
    }

    #[test]
    fn delete_reports_touched_rows() {
        refresh_db();
        create_user_db_entry("username");
        let con = open_connection();
        let id = create_resource(&test_resource(1, "goner"), &con).unwrap();
        assert_eq!(1, delete_resource(id, 1, &con).unwrap());
        assert_eq!(0, delete_resource(id, 1, &con).unwrap());
        con.close().unwrap();
        cleanup();
    }

    #[test]
    fn filter_clause_is_empty_without_filters() {
        let (clause, params) = filter_clause(&None, &HashMap::new());
        assert_eq!("", clause);
        assert!(params.is_empty());
    }

    #[test]
    fn filter_clause_binds_category_name_and_options_json() {
        let mut filter = HashMap::new();
        filter.insert("Style".to_string(), vec!["Minimal".to_string()]);
        let (clause, params) = filter_clause(&None, &filter);
        assert!(clause.contains("json_each"));
        assert_eq!(
            vec![
                Value::Text("Style".to_string()),
                Value::Text("[\"Minimal\"]".to_string()),
            ],
            params
        );
    }
}
