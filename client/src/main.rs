use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use real_estate_marketplace_client::board::{PropertyBoard, SearchForm};
use real_estate_marketplace_client::format::{
    format_date, format_inquiry_status, format_offer_status, format_price, format_rental_status,
};
use real_estate_marketplace_client::models::{Property, User};
use real_estate_marketplace_client::properties::ImageFile;
use real_estate_marketplace_client::rental::{calculate_rental_end_date, days_until_expiry};
use real_estate_marketplace_client::rental_agreements::DEFAULT_EXPIRING_WITHIN_DAYS;
use real_estate_marketplace_client::storage::LocalStore;
use real_estate_marketplace_client::{ClientConfig, MarketplaceClient, PropertyFilters};

const CURRENT_USER_KEY: &str = "currentUser";

#[derive(Parser)]
#[command(name = "marketplace", about = "Real estate marketplace client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List properties, optionally filtered
    Properties {
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        min_price: Option<String>,
        #[arg(long)]
        max_price: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Write the rendered property grid to this file instead of printing a list
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Render the available-listings grid for a search, as the listing page does
    Search {
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        min_price: Option<String>,
        #[arg(long)]
        max_price: Option<String>,
        #[arg(long, default_value = "properties.html")]
        html: PathBuf,
    },
    /// Show one property
    Property { id: i64 },
    /// Upload listing images and print their stored paths
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    #[command(subcommand)]
    Offers(OffersCommand),
    #[command(subcommand)]
    Inquiries(InquiriesCommand),
    #[command(subcommand)]
    Agreements(AgreementsCommand),
    /// Log in and remember the user locally
    Login { username: String, password: String },
    /// Forget the remembered user
    Logout,
    /// End date and days left for a rental starting on <start> (YYYY-MM-DD)
    Expiry { start: NaiveDate, months: i32 },
}

#[derive(Subcommand)]
enum OffersCommand {
    Pending,
}

#[derive(Subcommand)]
enum InquiriesCommand {
    Open,
}

#[derive(Subcommand)]
enum AgreementsCommand {
    Expiring {
        #[arg(long, default_value_t = DEFAULT_EXPIRING_WITHIN_DAYS)]
        days: u32,
    },
}

fn print_property(property: &Property) {
    let price = match property.kind.as_deref() {
        Some("SALE") => format_price(property.price, None),
        _ => format_price(property.rent_amount, Some("RENT")),
    };
    println!(
        "#{:<5} {:<40} {:<25} {:<22} {}",
        property.id.map(|id| id.to_string()).unwrap_or_default(),
        property.title.as_deref().unwrap_or("Untitled Property"),
        property.location.as_deref().unwrap_or("Location not specified"),
        price,
        property.status.as_deref().unwrap_or("UNKNOWN"),
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let cli = Cli::parse();
    let config = ClientConfig::load()?;
    log::info!("Loaded config: {:?}", config);

    let client = MarketplaceClient::new(&config)?;
    let store = LocalStore::new(&config.storage_path);

    match cli.command {
        Command::Properties {
            kind,
            location,
            min_price,
            max_price,
            status,
            html,
        } => {
            let filters = PropertyFilters {
                kind,
                status,
                location,
                min_price,
                max_price,
                ..PropertyFilters::default()
            };
            let properties = client.fetch_all_properties(&filters).await?;
            match html {
                Some(path) => {
                    let mut board = PropertyBoard::new();
                    board.display_properties(&properties)?;
                    std::fs::write(&path, board.grid_html())?;
                    println!("Wrote property grid to {}", path.display());
                }
                None => properties.iter().for_each(print_property),
            }
        }
        Command::Search {
            kind,
            location,
            min_price,
            max_price,
            html,
        } => {
            let form = SearchForm {
                kind: kind.unwrap_or_default(),
                location: location.unwrap_or_default(),
                min_price: min_price.unwrap_or_default(),
                max_price: max_price.unwrap_or_default(),
            };
            let mut board = PropertyBoard::new();
            board.search_properties(&client, &form).await;
            if let Some(message) = board.error() {
                return Err(message.into());
            }
            std::fs::write(&html, board.grid_html())?;
            println!("Wrote property grid to {}", html.display());
        }
        Command::Property { id } => {
            let property = client.fetch_property_by_id(id).await?;
            print_property(&property);
            if let Some(description) = &property.description {
                println!("\n{}", description);
            }
        }
        Command::Upload { files } => {
            let mut images = Vec::with_capacity(files.len());
            for path in &files {
                images.push(ImageFile::read(path).await?);
            }
            for stored in client.upload_property_images(images).await? {
                println!("{}", stored);
            }
        }
        Command::Offers(OffersCommand::Pending) => {
            for offer in client.fetch_pending_offers().await? {
                println!(
                    "#{:<5} {:<35} {:<20} {}",
                    offer.id.unwrap_or_default(),
                    offer.property_title.as_deref().unwrap_or("-"),
                    format_price(offer.price, None),
                    format_offer_status(offer.status.as_deref().unwrap_or_default()),
                );
            }
        }
        Command::Inquiries(InquiriesCommand::Open) => {
            for inquiry in client.fetch_open_inquiries().await? {
                println!(
                    "#{:<5} {:<35} {:<10} {}",
                    inquiry.id.unwrap_or_default(),
                    inquiry.property_title.as_deref().unwrap_or("-"),
                    format_inquiry_status(inquiry.status.as_deref().unwrap_or_default()),
                    inquiry.message.as_deref().unwrap_or_default(),
                );
            }
        }
        Command::Agreements(AgreementsCommand::Expiring { days }) => {
            for agreement in client.fetch_expiring_agreements(days).await? {
                let ends = match (agreement.start_date, agreement.duration_months) {
                    (Some(start), Some(months)) => i32::try_from(months)
                        .ok()
                        .and_then(|months| calculate_rental_end_date(start, months))
                        .map(format_date)
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                println!(
                    "#{:<5} {:<35} {:<12} ends {}",
                    agreement.id.unwrap_or_default(),
                    agreement.property_title.as_deref().unwrap_or("-"),
                    format_rental_status(agreement.status.as_deref().unwrap_or_default()),
                    ends,
                );
            }
        }
        Command::Login { username, password } => {
            let user = client.login_user(&username, &password).await?;
            store.save(CURRENT_USER_KEY, &user);
            println!(
                "Logged in as {} ({})",
                user.username.as_deref().unwrap_or(&username),
                user.role.as_deref().unwrap_or("UNKNOWN"),
            );
        }
        Command::Logout => {
            if let Some(user) = store.get::<User>(CURRENT_USER_KEY) {
                log::info!("Forgetting user {:?}", user.username);
            }
            store.remove(CURRENT_USER_KEY);
        }
        Command::Expiry { start, months } => {
            let end = calculate_rental_end_date(start, months).ok_or("end date out of range")?;
            let days = days_until_expiry(start, months).ok_or("end date out of range")?;
            println!("Ends {} ({} days)", format_date(end), days);
        }
    }

    Ok(())
}
