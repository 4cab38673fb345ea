use std::backtrace::Backtrace;
use std::collections::HashMap;

use chrono::Utc;

use crate::model::api::{ResourceApi, ResourcePage};
use crate::model::error::resource_errors::{
    CreateResourceError, DeleteResourceError, GetResourceError, ListResourcesError,
    UpdateResourceError,
};
use crate::model::repository::{Resource, ResourcePatch};
use crate::model::request::resource_requests::{CreateResourceRequest, UpdateResourceRequest};
use crate::repository;
use crate::repository::resource_repository;

/// how many items a page holds when the client doesn't say
static DEFAULT_PAGE_SIZE: u32 = 20;
/// the most items a single page may hold, no matter what the client asks for
static MAX_PAGE_SIZE: u32 = 100;

/// pulls one page of the caller's resources, newest first.
///
/// `search` matches against title and notes, `tags` is the raw query parameter
/// holding a category-to-options map. Page numbers start at 1 and out-of-range
/// paging inputs are clamped rather than rejected.
pub fn search_resources(
    user_id: u32,
    search: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
    tags: Option<String>,
) -> Result<ResourcePage, ListResourcesError> {
    let page = page.unwrap_or(1).max(1);
    let limit = match limit {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(limit) => limit.min(MAX_PAGE_SIZE),
    };
    // a distant page has to come back empty, so the offset can't stay in u32
    let offset = i64::from(page - 1) * i64::from(limit);
    let search = search.filter(|s| !s.is_empty());
    let tag_filter = parse_tag_filter(tags);
    let con = repository::open_connection();
    let total = match resource_repository::count_resources(user_id, &search, &tag_filter, &con) {
        Ok(total) => total,
        Err(e) => {
            con.close().unwrap();
            log::error!(
                "Failed to count resources for user {user_id}. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(ListResourcesError::DbError(e.to_string()));
        }
    };
    let found =
        resource_repository::search_resources(user_id, &search, &tag_filter, limit, offset, &con);
    con.close().unwrap();
    match found {
        Ok(items) => Ok(ResourcePage {
            items: items.into_iter().map(ResourceApi::from).collect(),
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }),
        Err(e) => {
            log::error!(
                "Failed to search resources for user {user_id}. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(ListResourcesError::DbError(e.to_string()))
        }
    }
}

pub fn get_resource(id: u32, user_id: u32) -> Result<ResourceApi, GetResourceError> {
    let con = repository::open_connection();
    let result = resource_repository::get_resource(id, user_id, &con);
    con.close().unwrap();
    match result {
        Ok(resource) => Ok(ResourceApi::from(resource)),
        Err(e) if e == rusqlite::Error::QueryReturnedNoRows => Err(GetResourceError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to pull resource {id} from the database. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetResourceError::DbError(e.to_string()))
        }
    }
}

/// saves a new resource owned by the passed user and returns it with its
/// generated id. The title is required; other string fields collapse to null
/// when they arrive empty
pub fn create_resource(
    user_id: u32,
    request: CreateResourceRequest,
) -> Result<ResourceApi, CreateResourceError> {
    let title = match request.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => String::from(title),
        _ => return Err(CreateResourceError::MissingTitle),
    };
    let now = Utc::now().naive_utc();
    let mut resource = Resource {
        id: None,
        user_id,
        title,
        url: blank_to_none(request.url),
        screenshot: blank_to_none(request.screenshot),
        embed_code: blank_to_none(request.embed_code),
        embed_type: request.embed_type,
        notes: blank_to_none(request.notes),
        tags: request.tags.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };
    let con = repository::open_connection();
    let created = resource_repository::create_resource(&resource, &con);
    con.close().unwrap();
    match created {
        Ok(id) => {
            resource.id = Some(id);
            Ok(ResourceApi::from(resource))
        }
        Err(e) => {
            log::error!(
                "Failed to save new resource for user {user_id}. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateResourceError::DbError(e.to_string()))
        }
    }
}

/// applies a partial update to one of the caller's resources and returns the
/// row as it looks afterwards
pub fn update_resource(
    id: u32,
    user_id: u32,
    request: UpdateResourceRequest,
) -> Result<ResourceApi, UpdateResourceError> {
    if request.is_empty() {
        return Err(UpdateResourceError::NoFields);
    }
    // a patch can change the title but never blank it out
    let title = match request.title {
        Some(new_title) => match new_title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => Some(String::from(title)),
            _ => return Err(UpdateResourceError::MissingTitle),
        },
        None => None,
    };
    let patch = ResourcePatch {
        title,
        url: request.url.map(blank_to_none),
        screenshot: request.screenshot.map(blank_to_none),
        embed_code: request.embed_code.map(blank_to_none),
        embed_type: request.embed_type,
        notes: request.notes.map(blank_to_none),
        tags: request.tags,
    };
    let con = repository::open_connection();
    let touched =
        match resource_repository::update_resource(id, user_id, &patch, Utc::now().naive_utc(), &con)
        {
            Ok(touched) => touched,
            Err(e) => {
                con.close().unwrap();
                log::error!(
                    "Failed to update resource {id}. Exception is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                return Err(UpdateResourceError::DbError(e.to_string()));
            }
        };
    if touched == 0 {
        con.close().unwrap();
        return Err(UpdateResourceError::NotFound);
    }
    let updated = resource_repository::get_resource(id, user_id, &con);
    con.close().unwrap();
    match updated {
        Ok(resource) => Ok(ResourceApi::from(resource)),
        Err(e) => {
            log::error!(
                "Failed to read resource {id} back after updating it. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(UpdateResourceError::DbError(e.to_string()))
        }
    }
}

/// removes the resource with the passed id if the caller owns it. Deleting a
/// row that's already gone, or was never yours, is not an error
pub fn delete_resource(id: u32, user_id: u32) -> Result<(), DeleteResourceError> {
    let con = repository::open_connection();
    let result = resource_repository::delete_resource(id, user_id, &con);
    con.close().unwrap();
    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!(
                "Failed to delete resource {id}. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(DeleteResourceError::DbError(e.to_string()))
        }
    }
}

// private functions

/// collapses absent and empty-string inputs into a single null representation
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// parses the `tags` query parameter, a json object mapping category names to
/// option lists. Categories with no options can never match anything, so they
/// are dropped; a value that doesn't parse at all leaves the page unfiltered
fn parse_tag_filter(raw: Option<String>) -> HashMap<String, Vec<String>> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return HashMap::new(),
    };
    match serde_json::from_str::<HashMap<String, Vec<String>>>(raw.as_str()) {
        Ok(parsed) => parsed
            .into_iter()
            .filter(|(_, options)| !options.is_empty())
            .collect(),
        Err(e) => {
            log::warn!("Ignoring tags parameter that isn't a category-to-options map: {e:?}");
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{cleanup, create_user_db_entry, refresh_db};

    #[test]
    fn create_trims_title_and_blanks_optionals() {
        refresh_db();
        create_user_db_entry("username");
        let created = create_resource(
            1,
            CreateResourceRequest {
                title: Some("  padded  ".to_string()),
                url: Some(String::new()),
                notes: Some("kept".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(1, created.id);
        assert_eq!("padded", created.title);
        assert_eq!(None, created.url);
        assert_eq!(Some("kept".to_string()), created.notes);
        assert!(created.tags.is_empty());
        cleanup();
    }

    #[test]
    fn create_requires_a_title() {
        let missing = create_resource(1, CreateResourceRequest::default());
        assert_eq!(Err(CreateResourceError::MissingTitle), missing);
        let blank = create_resource(
            1,
            CreateResourceRequest {
                title: Some("   ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(Err(CreateResourceError::MissingTitle), blank);
    }

    #[test]
    fn update_rejects_empty_patches() {
        let res = update_resource(1, 1, UpdateResourceRequest::default());
        assert_eq!(Err(UpdateResourceError::NoFields), res);
    }

    #[test]
    fn update_rejects_blanked_titles() {
        let nulled = update_resource(
            1,
            1,
            UpdateResourceRequest {
                title: Some(None),
                ..Default::default()
            },
        );
        assert_eq!(Err(UpdateResourceError::MissingTitle), nulled);
        let blank = update_resource(
            1,
            1,
            UpdateResourceRequest {
                title: Some(Some(" ".to_string())),
                ..Default::default()
            },
        );
        assert_eq!(Err(UpdateResourceError::MissingTitle), blank);
    }

    #[test]
    fn update_returns_the_changed_row() {
        refresh_db();
        create_user_db_entry("username");
        let created = create_resource(
            1,
            CreateResourceRequest {
                title: Some("before".to_string()),
                notes: Some("original".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let updated = update_resource(
            created.id,
            1,
            UpdateResourceRequest {
                notes: Some(Some("rewritten".to_string())),
                ..Default::default()
            },
        )
        .unwrap();
        // only the patched column changes
        assert_eq!("before", updated.title);
        assert_eq!(Some("rewritten".to_string()), updated.notes);
        cleanup();
    }

    #[test]
    fn update_misses_resources_of_other_users() {
        refresh_db();
        create_user_db_entry("username");
        create_user_db_entry("second");
        let created = create_resource(
            1,
            CreateResourceRequest {
                title: Some("mine".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let res = update_resource(
            created.id,
            2,
            UpdateResourceRequest {
                title: Some(Some("stolen".to_string())),
                ..Default::default()
            },
        );
        assert_eq!(Err(UpdateResourceError::NotFound), res);
        cleanup();
    }

    #[test]
    fn delete_is_ok_even_when_nothing_matches() {
        refresh_db();
        create_user_db_entry("username");
        assert_eq!(Ok(()), delete_resource(999, 1));
        cleanup();
    }

    #[test]
    fn search_clamps_paging_inputs() {
        refresh_db();
        create_user_db_entry("username");
        for i in 0..3 {
            create_resource(
                1,
                CreateResourceRequest {
                    title: Some(format!("resource {i}")),
                    ..Default::default()
                },
            )
            .unwrap();
        }
        let first = search_resources(1, None, Some(0), Some(2), None).unwrap();
        assert_eq!(1, first.page);
        assert_eq!(2, first.items.len());
        assert_eq!(3, first.total);
        assert_eq!(2, first.total_pages);
        let second = search_resources(1, None, Some(2), Some(2), None).unwrap();
        assert_eq!(1, second.items.len());
        let huge = search_resources(1, None, None, Some(500), None).unwrap();
        assert_eq!(100, huge.limit);
        let zero = search_resources(1, None, None, Some(0), None).unwrap();
        assert_eq!(20, zero.limit);
        cleanup();
    }

    #[test]
    fn search_serves_distant_pages_empty() {
        refresh_db();
        create_user_db_entry("username");
        create_resource(
            1,
            CreateResourceRequest {
                title: Some("only one".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        let distant = search_resources(1, None, Some(50_000_000), Some(100), None).unwrap();
        assert_eq!(50_000_000, distant.page);
        assert!(distant.items.is_empty());
        assert_eq!(1, distant.total);
        assert_eq!(1, distant.total_pages);
        cleanup();
    }

    #[test]
    fn search_returns_newest_first() {
        refresh_db();
        create_user_db_entry("username");
        for title in ["oldest", "middle", "newest"] {
            create_resource(
                1,
                CreateResourceRequest {
                    title: Some(title.to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        }
        let page = search_resources(1, None, None, None, None).unwrap();
        let titles: Vec<String> = page.items.iter().map(|i| i.title.clone()).collect();
        assert_eq!(vec!["newest", "middle", "oldest"], titles);
        cleanup();
    }

    #[test]
    fn parse_tag_filter_ignores_garbage() {
        assert!(parse_tag_filter(None).is_empty());
        assert!(parse_tag_filter(Some(String::new())).is_empty());
        assert!(parse_tag_filter(Some("not json".to_string())).is_empty());
        assert!(parse_tag_filter(Some("[\"a list\"]".to_string())).is_empty());
    }

    #[test]
    fn parse_tag_filter_drops_empty_categories() {
        let parsed = parse_tag_filter(Some(
            r#"{"Style":["Minimal"],"Type":[]}"#.to_string(),
        ));
        assert_eq!(1, parsed.len());
        assert_eq!(vec!["Minimal".to_string()], parsed["Style"]);
    }
}
