use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finance_manager::{
    Cpf, PasswordHash, PaymentStatus, Transaction, TransactionKind, ValidatedPassword,
    create_transaction, create_user, initialize_db,
};

/// A utility for creating a test database for the Meu Bolso server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;

    let user = create_user(
        "Teste",
        "test@example.com".parse()?,
        Cpf::new("529.982.247-25")?,
        password_hash,
        &connection,
    )?;

    println!("Creating test transactions...");

    let today = OffsetDateTime::now_utc().date();

    create_transaction(
        Transaction::build(TransactionKind::Income, 3_500.0, today - Duration::days(10), "Salário")
            .description("Salário de agosto"),
        user.id,
        &connection,
    )?;

    create_transaction(
        Transaction::build(TransactionKind::Expense, 120.5, today - Duration::days(3), "Alimentação")
            .description("Supermercado")
            .status(PaymentStatus::Paid),
        user.id,
        &connection,
    )?;

    // A pending expense due in a few days so the dashboard alert has something to show.
    create_transaction(
        Transaction::build(TransactionKind::Expense, 1_800.0, today + Duration::days(4), "Moradia")
            .description("Aluguel")
            .status(PaymentStatus::Pending),
        user.id,
        &connection,
    )?;

    println!("Success!");

    Ok(())
}
