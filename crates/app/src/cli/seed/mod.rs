use clap::Args;
use wisteria_app::{
    auth::{AuthServiceError, PgAdminUsersService},
    domain::products::{
        NewProduct, PgProductsService, ProductUuid, ProductsService, ProductsServiceError,
    },
};

use crate::cli::DatabaseArgs;

mod catalog;

const ADMIN_EMAIL: &str = "admin@wisteria.com";
const ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let admins = PgAdminUsersService::new(db.clone());

    match admins.create_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await {
        Ok(admin) => println!("created admin user: {} / {ADMIN_PASSWORD}", admin.email),
        Err(AuthServiceError::AlreadyExists) => {
            println!("admin user already exists: {ADMIN_EMAIL}");
        }
        Err(error) => return Err(format!("failed to create admin: {error}")),
    }

    let products = PgProductsService::new(db);

    let mut created = 0_usize;
    let mut skipped = 0_usize;

    for product in &catalog::SAMPLE_PRODUCTS {
        let result = products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: product.name.to_string(),
                slug: product.slug.to_string(),
                description: product.description.to_string(),
                price_cents: product.price_cents,
                condition: product.condition,
                category: product.category,
                image_url: product.image_url.to_string(),
                is_available: product.is_available,
                quantity: product.quantity,
            })
            .await;

        match result {
            Ok(_) => created += 1,
            Err(ProductsServiceError::AlreadyExists) => skipped += 1,
            Err(error) => return Err(format!("failed to seed {}: {error}", product.slug)),
        }
    }

    println!("products: {created} created, {skipped} already existed");

    Ok(())
}
