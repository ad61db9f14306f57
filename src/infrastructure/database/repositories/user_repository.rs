use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::domain::{DomainError, DomainResult, NewUser, User, UserRepositoryInterface, UserRole};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Staff => UserRole::Staff,
        user::UserRole::Technician => UserRole::Technician,
        user::UserRole::ProductManager => UserRole::ProductManager,
        user::UserRole::WarehouseManager => UserRole::WarehouseManager,
        user::UserRole::Customer => UserRole::Customer,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Staff => user::UserRole::Staff,
        UserRole::Technician => user::UserRole::Technician,
        UserRole::ProductManager => user::UserRole::ProductManager,
        UserRole::WarehouseManager => user::UserRole::WarehouseManager,
        UserRole::Customer => user::UserRole::Customer,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        phone: model.phone,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        last_login: model.last_login,
    }
}

/// Map a query-path database error. Connection-level failures are
/// transient (`StoreUnavailable`); the rest are permanent.
fn db_err(e: DbErr) -> DomainError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            DomainError::StoreUnavailable(e.to_string())
        }
        other => DomainError::Validation(format!("Database error: {}", other)),
    }
}

/// Map an insert failure. The unique indexes on username and email are
/// the arbiter of uniqueness; the engine names the violated column.
fn insert_err(e: DbErr) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        if msg.contains("email") {
            DomainError::DuplicateEmail
        } else {
            DomainError::DuplicateUsername
        }
    } else {
        db_err(e)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, new_user: NewUser) -> DomainResult<User> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let model = user::ActiveModel {
            id: Set(id),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            full_name: Set(new_user.full_name),
            phone: Set(new_user.phone),
            role: Set(domain_role_to_entity(new_user.role)),
            created_at: Set(now),
            last_login: Set(None),
        };

        let inserted = model.insert(&self.db).await.map_err(insert_err)?;
        Ok(user_model_to_domain(inserted))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let found = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(user_model_to_domain))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(user_model_to_domain))
    }

    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>> {
        let found = user::Entity::find()
            .filter(
                user::Column::Username
                    .eq(login)
                    .or(user::Column::Email.eq(login)),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(user_model_to_domain))
    }

    async fn touch_last_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let Some(found) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Err(DomainError::NotFound {
                entity: "user",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: user::ActiveModel = found.into();
        active.last_login = Set(Some(at));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()> {
        let Some(found) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Err(DomainError::NotFound {
                entity: "user",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: user::ActiveModel = found.into();
        active.password_hash = Set(new_password_hash.to_string());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_on_username_maps_to_duplicate_username() {
        let err = DbErr::Custom("UNIQUE constraint failed: users.username".to_string());
        assert!(matches!(insert_err(err), DomainError::DuplicateUsername));
    }

    #[test]
    fn unique_violation_on_email_maps_to_duplicate_email() {
        let err = DbErr::Custom("UNIQUE constraint failed: users.email".to_string());
        assert!(matches!(insert_err(err), DomainError::DuplicateEmail));
    }

    #[test]
    fn other_insert_errors_are_not_duplicates() {
        let err = DbErr::Custom("no such table: users".to_string());
        assert!(matches!(insert_err(err), DomainError::Validation(_)));
    }
}
