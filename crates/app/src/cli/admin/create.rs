use clap::Args;
use rand::{Rng, distributions::Alphanumeric};
use wisteria_app::auth::PgAdminUsersService;

use crate::cli::DatabaseArgs;

const GENERATED_PASSWORD_LENGTH: usize = 20;

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Admin email address
    #[arg(long)]
    email: String,

    /// Admin password; a random one is generated when omitted
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let generated = args.password.is_none();
    let password = args.password.unwrap_or_else(generate_password);

    let service = PgAdminUsersService::new(args.database.connect().await?);

    let admin = service
        .create_admin(&args.email, &password)
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("admin_email: {}", admin.email);

    if generated {
        println!("password: {password}");
        println!("store this password now; it is only shown once");
    }

    Ok(())
}

fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}
