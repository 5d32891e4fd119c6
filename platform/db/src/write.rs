use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, Iterable, PrimaryKeyTrait,
    SqlErr,
};
use uuid::Uuid;

use crate::{DbError, DbResult};

/// Marks every column of an active model built from a full [`Model`] as set,
/// so an update writes the whole validated row instead of nothing.
///
/// [`Model`]: sea_orm::ModelTrait
pub(crate) fn all_set<A>(mut active: A) -> A
where
    A: ActiveModelTrait,
{
    for column in <A::Entity as EntityTrait>::Column::iter() {
        if let ActiveValue::Unchanged(value) = active.get(column) {
            active.set(column, value);
        }
    }
    active
}

/// Fails with [`DbError::MissingReference`] unless a row with `id` exists.
pub(crate) async fn ensure_exists<E, C>(db: &C, id: Uuid, entity: &'static str) -> DbResult<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    C: ConnectionTrait,
{
    match E::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(DbError::MissingReference { entity }),
    }
}

/// Turns a zero-row delete into [`DbError::NotFound`].
pub(crate) fn deleted(rows_affected: u64, entity: &'static str) -> DbResult<()> {
    if rows_affected == 0 {
        Err(DbError::NotFound { entity })
    } else {
        Ok(())
    }
}

/// Reports a unique-index clash on one of `fields` as [`DbError::Duplicate`].
/// Any other failure stays a database error.
pub(crate) fn unique_violation(err: DbErr, fields: &[&'static str]) -> DbError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        if let Some(field) = fields.iter().find(|field| message.contains(**field)) {
            return DbError::Duplicate { field: *field };
        }
    }
    DbError::Db(err)
}

/// Applies a patch value to a field when the caller supplied one.
pub(crate) fn patch<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::location;
    use sea_orm::IntoActiveModel;

    #[test]
    fn all_set_turns_loaded_values_into_writes() {
        let model = location::Model { id: Uuid::new_v4() };
        let active = all_set(model.clone().into_active_model());
        assert!(matches!(active.id, ActiveValue::Set(id) if id == model.id));
    }

    #[test]
    fn patch_only_overwrites_supplied_values() {
        let mut title = String::from("Lease review");
        patch(&mut title, None);
        assert_eq!(title, "Lease review");
        patch(&mut title, Some("Lease renewal".into()));
        assert_eq!(title, "Lease renewal");

        let mut due: Option<u8> = Some(3);
        patch(&mut due, Some(None));
        assert_eq!(due, None);
    }

    #[test]
    fn zero_rows_deleted_is_not_found() {
        assert!(matches!(
            deleted(0, "matter"),
            Err(DbError::NotFound { entity: "matter" })
        ));
        assert!(deleted(1, "matter").is_ok());
    }

    #[test]
    fn other_database_errors_are_not_duplicates() {
        let err = unique_violation(DbErr::RecordNotInserted, &["email"]);
        assert!(matches!(err, DbError::Db(DbErr::RecordNotInserted)));
    }
}
