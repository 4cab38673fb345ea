use std::backtrace::Backtrace;

use chrono::Utc;

use crate::model::api::CategoryApi;
use crate::model::error::category_errors::{
    GetCategoriesError, ReplaceCategoriesError, ResetCategoriesError,
};
use crate::model::repository::Category;
use crate::model::request::category_requests::CategoryDescriptor;
use crate::repository;
use crate::repository::category_repository;

/// pulls the category set the passed user works against: their own saved set
/// when one exists, the shared default set otherwise.
///
/// Default rows come back with their real ids and no owner, so a client can
/// tell it's still on defaults
pub fn get_effective_categories(user_id: u32) -> Result<Vec<CategoryApi>, GetCategoriesError> {
    let con = repository::open_connection();
    let own = match category_repository::get_categories_for_user(user_id, &con) {
        Ok(own) => own,
        Err(e) => {
            con.close().unwrap();
            log::error!(
                "Failed to pull categories for user {user_id}. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(GetCategoriesError::DbError(e.to_string()));
        }
    };
    if !own.is_empty() {
        con.close().unwrap();
        return Ok(own.into_iter().map(CategoryApi::from).collect());
    }
    let defaults = category_repository::get_default_categories(&con);
    con.close().unwrap();
    match defaults {
        Ok(defaults) => Ok(defaults.into_iter().map(CategoryApi::from).collect()),
        Err(e) => {
            log::error!(
                "Failed to pull the default categories. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetCategoriesError::DbError(e.to_string()))
        }
    }
}

/// swaps the caller's whole category set for the passed one; submission order
/// becomes sort order. An empty submission just clears the set, which makes
/// the defaults visible again.
///
/// The delete and the inserts run as separate statements. Two overlapping
/// replaces for the same user can interleave, but every row involved belongs
/// to that user, so the damage stays theirs
pub fn replace_categories(
    user_id: u32,
    descriptors: Vec<CategoryDescriptor>,
) -> Result<Vec<CategoryApi>, ReplaceCategoriesError> {
    let now = Utc::now().naive_utc();
    let con = repository::open_connection();
    if let Err(e) = category_repository::delete_categories_for_user(user_id, &con) {
        con.close().unwrap();
        log::error!(
            "Failed to clear categories for user {user_id}. Exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(ReplaceCategoriesError::DbError(e.to_string()));
    }
    let mut created: Vec<CategoryApi> = Vec::new();
    for (position, descriptor) in descriptors.into_iter().enumerate() {
        let mut category = Category {
            id: None,
            user_id: Some(user_id),
            name: descriptor.name,
            kind: descriptor.kind,
            options: descriptor.options,
            sort_order: position as u32,
            created_at: now,
            updated_at: now,
        };
        match category_repository::create_category(&category, &con) {
            Ok(id) => {
                category.id = Some(id);
                created.push(CategoryApi::from(category));
            }
            Err(e) => {
                con.close().unwrap();
                log::error!(
                    "Failed to save category at position {position} for user {user_id}. Exception is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                return Err(ReplaceCategoriesError::DbError(e.to_string()));
            }
        }
    }
    con.close().unwrap();
    Ok(created)
}

/// drops the caller's own category set so the defaults apply again, and
/// returns those defaults
pub fn reset_categories(user_id: u32) -> Result<Vec<CategoryApi>, ResetCategoriesError> {
    let con = repository::open_connection();
    if let Err(e) = category_repository::delete_categories_for_user(user_id, &con) {
        con.close().unwrap();
        log::error!(
            "Failed to clear categories for user {user_id}. Exception is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(ResetCategoriesError::DbError(e.to_string()));
    }
    let defaults = category_repository::get_default_categories(&con);
    con.close().unwrap();
    match defaults {
        Ok(defaults) => Ok(defaults.into_iter().map(CategoryApi::from).collect()),
        Err(e) => {
            log::error!(
                "Failed to pull the default categories. Exception is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(ResetCategoriesError::DbError(e.to_string()))
        }
    }
}
