use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use fintrack_rs::{
    CategoryName, CategoryType, Email, NewCategory, NewTransaction, NewUser, PasswordHash,
    ValidatedPassword, create_category, create_transaction, create_user, initialize_db,
};

/// A utility for creating a test database for the fintrack API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "password";

/// Categories as (name, type, [(days ago, amount, description)]).
const DEMO_DATA: [(&str, CategoryType, &[(i64, f64, &str)]); 5] = [
    (
        "Salary",
        CategoryType::Income,
        &[(3, 4200.0, "Monthly pay"), (33, 4200.0, "Monthly pay")],
    ),
    (
        "Freelance",
        CategoryType::Income,
        &[(12, 650.0, "Logo design")],
    ),
    (
        "Rent",
        CategoryType::Expense,
        &[(1, 1800.0, "Rent"), (31, 1800.0, "Rent")],
    ),
    (
        "Groceries",
        CategoryType::Expense,
        &[
            (2, 84.3, "Supermarket"),
            (9, 61.75, "Farmers market"),
            (16, 102.1, "Supermarket"),
            (38, 95.4, "Supermarket"),
            (45, 23.0, "Bakery"),
        ],
    ),
    (
        "Transport",
        CategoryType::Expense,
        &[(5, 40.0, "Bus pass"), (40, 40.0, "Bus pass"), (52, 18.5, "Taxi")],
    ),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path
        .extension()
        .is_none_or(|extension| extension.is_empty())
    {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating test user {DEMO_EMAIL} with the password '{DEMO_PASSWORD}'...");
    let user = create_user(
        NewUser {
            name: "Demo User".to_owned(),
            email: Email::new(DEMO_EMAIL)?,
            password_hash: PasswordHash::new(
                ValidatedPassword::new_unchecked(DEMO_PASSWORD),
                PasswordHash::DEFAULT_COST,
            )?,
        },
        &connection,
    )?;

    println!("Creating categories and transactions...");
    let now = OffsetDateTime::now_utc();
    let mut transaction_count = 0;

    for (name, category_type, transactions) in DEMO_DATA {
        let category = create_category(
            NewCategory {
                name: CategoryName::new(name)?,
                category_type,
                user_id: user.id,
            },
            &connection,
        )?;

        for &(days_ago, amount, description) in transactions {
            create_transaction(
                NewTransaction {
                    user_id: user.id,
                    transaction_type: category_type,
                    category_id: category.id,
                    amount,
                    description: description.to_owned(),
                    date: Some(now - Duration::days(days_ago)),
                },
                &connection,
            )?;
            transaction_count += 1;
        }
    }

    println!(
        "Created {} categories and {transaction_count} transactions.",
        DEMO_DATA.len()
    );
    println!("Success!");

    Ok(())
}
