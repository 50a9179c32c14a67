//! Generated-style account operations running against in-memory SQLite.
//!
//! Run with: cargo run --example accounts

use querybind::{Backend, ExecResult, FromRow, Query, QueryAs, Result, Row, SqliteBackend};
use sqlx::sqlite::SqlitePoolOptions;

// What a query generator emits: one template const, one params struct,
// one row struct, and one thin façade function per named query.

const GET_ACCOUNT: &str = "-- name: GetAccount :one
SELECT pk, id, display_name, email FROM account WHERE id = ?1";

const LIST_ACCOUNTS_BY_IDS: &str = "-- name: ListAccountsByIds :many
SELECT pk, id, display_name, email FROM account WHERE id IN (/*SLICE:ids*/?) ORDER BY pk";

const CREATE_ACCOUNT: &str = "-- name: CreateAccount :exec
INSERT INTO account (id, display_name, email) VALUES (?1, ?2, ?3)";

#[derive(Debug)]
struct AccountRow {
    pk: i64,
    id: String,
    display_name: String,
    email: Option<String>,
}

impl FromRow for AccountRow {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            pk: row.i64("pk")?,
            id: row.text("id")?,
            display_name: row.text("display_name")?,
            email: row.opt_text("email")?,
        })
    }
}

struct CreateAccountParams<'a> {
    id: &'a str,
    display_name: &'a str,
    email: Option<&'a str>,
}

async fn get_account<B: Backend>(backend: &B, account_id: &str) -> Result<Option<AccountRow>> {
    QueryAs::new(GET_ACCOUNT)
        .bind(account_id)
        .fetch_one(backend)
        .await
}

async fn list_accounts_by_ids<B: Backend>(backend: &B, ids: &[&str]) -> Result<Vec<AccountRow>> {
    QueryAs::new(LIST_ACCOUNTS_BY_IDS)
        .bind_slice("ids", ids.iter().copied())
        .fetch_all(backend)
        .await
}

async fn create_account<B: Backend>(
    backend: &B,
    args: CreateAccountParams<'_>,
) -> Result<ExecResult> {
    Query::new(CREATE_ACCOUNT)
        .bind(args.id)
        .bind(args.display_name)
        .bind(args.email)
        .execute(backend)
        .await
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::query(
        "CREATE TABLE account (
            pk INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL,
            email TEXT
        )",
    )
    .execute(&pool)
    .await?;
    let backend = SqliteBackend::new(pool);

    println!("--- creating accounts ---");
    for (id, display_name, email) in [
        ("u1", "Ann", None),
        ("u2", "Bo", Some("bo@example.com")),
        ("u3", "Cy", None),
    ] {
        let result = create_account(
            &backend,
            CreateAccountParams {
                id,
                display_name,
                email,
            },
        )
        .await?;
        println!("created {id}: {} row(s) affected", result.rows_affected);
    }

    println!("\n--- single-row fetch ---");
    match get_account(&backend, "u1").await? {
        Some(account) => println!("found: {account:?}"),
        None => println!("not found"),
    }
    match get_account(&backend, "u9").await? {
        Some(account) => println!("found: {account:?}"),
        None => println!("u9 not found (absent, not a null row)"),
    }

    println!("\n--- IN-list fetch, expanded at call time ---");
    for account in list_accounts_by_ids(&backend, &["u1", "u3"]).await? {
        println!(
            "{} {} {} {:?}",
            account.pk, account.id, account.display_name, account.email
        );
    }

    println!("\n--- empty IN-list is rejected up front ---");
    match list_accounts_by_ids(&backend, &[]).await {
        Err(err) => println!("rejected: {err}"),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
