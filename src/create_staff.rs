//! Creates a staff account from the command line.

use clap::Parser;
use color_eyre::eyre::{Result, bail};
use dotenv::dotenv;
use labslot_core::{
    models::account::{NewAccount, SignupRequest},
    repositories::AccountRepository,
};
use labslot_db::{create_pool, repositories::PgAccountRepository, schema::initialize_database};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "create-staff", about = "Create a LabSlot staff account")]
struct Args {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Phone number (at most 15 characters)
    #[arg(long)]
    phone: String,

    /// Password for the new account
    #[arg(long, env = "LABSLOT_STAFF_PASSWORD")]
    password: String,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    dotenv().ok();
    let args = Args::parse();

    let signup = SignupRequest {
        name: Some(args.name),
        email: Some(args.email),
        phone: Some(args.phone),
        password: Some(args.password.clone()),
        confirm_password: Some(args.password),
    }
    .validate()?;

    let db_pool = create_pool(&args.database_url).await?;
    initialize_database(&db_pool).await?;
    let accounts = PgAccountRepository::new(db_pool);

    if accounts.email_exists(&signup.email).await? {
        bail!("An account with email {} already exists", signup.email);
    }
    if accounts.phone_exists(&signup.phone).await? {
        bail!("An account with phone {} already exists", signup.phone);
    }

    let account = accounts
        .create_account(&NewAccount {
            name: signup.name,
            email: signup.email,
            phone: signup.phone,
            password_hash: labslot_api::middleware::auth::hash_password(&signup.password)?,
            is_staff: true,
        })
        .await?;

    info!("Staff account created: id={}, email={}", account.id, account.email);
    Ok(())
}
