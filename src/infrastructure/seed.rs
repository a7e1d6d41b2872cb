//! First-run seed data

use uuid::Uuid;

use crate::domain::book::{Book, BookRepository};
use crate::domain::user::{Role, User, UserRepository};
use crate::domain::DomainError;

/// Username of the built-in administrator account
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

const DEFAULT_ADMIN_PASSWORD: &str = "123";

/// Seed the store on first run: a default administrator (without one,
/// nobody can pass the `ManageUsers` gate to create accounts) and one
/// sample printed book when the catalog is empty.
///
/// Runs against the repositories directly - seeding precedes any
/// authenticated actor, so there is no role to gate on.
pub async fn ensure_seed_data<U, B>(users: &U, books: &B) -> Result<(), DomainError>
where
    U: UserRepository,
    B: BookRepository,
{
    if users.get_by_username(DEFAULT_ADMIN_USERNAME).await?.is_none() {
        let admin = User::new(
            format!("u-{}", Uuid::new_v4()),
            DEFAULT_ADMIN_USERNAME,
            DEFAULT_ADMIN_PASSWORD,
            Role::Admin,
        );
        users.create(admin).await?;
        tracing::info!("Seeded default administrator account");
    }

    if books.list().await?.is_empty() {
        books
            .create(Book::printed("VN-001", "Java Core", "G. Gosling", 500))
            .await?;
        tracing::info!("Seeded sample catalog entry");
    }

    Ok(())
}
